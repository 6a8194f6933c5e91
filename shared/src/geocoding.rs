use serde::Deserialize;

use crate::geo::LngLat;
use crate::marker::Marker;

pub const DEFAULT_GEOCODING_HOST: &str = "https://api.mapbox.com/geocoding/v5/mapbox.places";

#[derive(Debug, Default, Deserialize)]
struct GeocodingResponse {
    #[serde(default)]
    features: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct RawFeature {
    #[serde(default)]
    id: String,
    #[serde(default)]
    place_name: String,
    #[serde(default)]
    center: Option<[f64; 2]>,
}

/// One selectable search result.
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    pub id: String,
    pub label: String,
    pub center: LngLat,
}

impl Suggestion {
    pub fn to_marker(&self) -> Marker {
        Marker::new(self.center, self.label.clone())
    }
}

/// `<host>/<query>.json?access_token=<token>`, or `None` for a blank query.
///
/// `encode` turns the trimmed query into a single URL path segment.
pub fn geocoding_url(
    host: &str,
    query: &str,
    access_token: &str,
    encode: impl FnOnce(&str) -> String,
) -> Option<String> {
    let query = query.trim();
    if query.is_empty() {
        return None;
    }
    Some(format!(
        "{}/{}.json?access_token={}",
        host.trim_end_matches('/'),
        encode(query),
        access_token
    ))
}

/// Suggestions from a geocoding response body.
///
/// A body that is not JSON or lacks `features` yields no suggestions. Each
/// feature is read on its own; one with a bad field or no usable `center` is
/// skipped.
pub fn parse_suggestions(body: &str) -> Vec<Suggestion> {
    let response: GeocodingResponse = serde_json::from_str(body).unwrap_or_default();
    response
        .features
        .into_iter()
        .filter_map(|value| {
            let f: RawFeature = serde_json::from_value(value).ok()?;
            let [lng, lat] = f.center?;
            let center = LngLat::new(lng, lat).ok()?;
            Some(Suggestion {
                id: f.id,
                label: f.place_name,
                center,
            })
        })
        .collect()
}
