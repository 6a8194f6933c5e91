use serde::Deserialize;
use thiserror::Error;

use crate::geo::LngLat;

pub const DEFAULT_DIRECTIONS_HOST: &str = "https://api.mapbox.com/directions/v5/mapbox";
pub const DRIVING_PROFILE: &str = "driving";
const NO_ROUTE_CODE: &str = "NoRoute";
const NO_ROUTE_FALLBACK_MESSAGE: &str = "No route found between the selected markers";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectionsError {
    #[error("{message}")]
    NoRoute { message: String },

    #[error("directions service error ({code}): {message}")]
    Upstream { code: String, message: String },

    #[error("failed to parse directions response: {0}")]
    Malformed(String),

    #[error("directions request failed: {0}")]
    Transport(String),
}

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    routes: Vec<RawRoute>,
}

#[derive(Debug, Deserialize)]
struct RawRoute {
    geometry: RawGeometry,
}

#[derive(Debug, Deserialize)]
struct RawGeometry {
    coordinates: Vec<[f64; 2]>,
}

/// `<host>/driving/<lng,lat;...>?geometries=geojson&access_token=<token>`.
pub fn directions_url(host: &str, waypoints: &str, access_token: &str) -> String {
    format!(
        "{}/{DRIVING_PROFILE}/{waypoints}?geometries=geojson&access_token={access_token}",
        host.trim_end_matches('/'),
    )
}

/// Geometry of the first route in a directions response body.
pub fn parse_route(body: &str) -> Result<Vec<LngLat>, DirectionsError> {
    let response: DirectionsResponse =
        serde_json::from_str(body).map_err(|e| DirectionsError::Malformed(e.to_string()))?;

    match response.code.as_deref() {
        None | Some("Ok") => {}
        Some(NO_ROUTE_CODE) => {
            return Err(DirectionsError::NoRoute {
                message: response
                    .message
                    .unwrap_or_else(|| NO_ROUTE_FALLBACK_MESSAGE.to_string()),
            });
        }
        Some(code) => {
            return Err(DirectionsError::Upstream {
                code: code.to_string(),
                message: response.message.unwrap_or_default(),
            });
        }
    }

    let Some(route) = response.routes.into_iter().next() else {
        return Err(DirectionsError::NoRoute {
            message: NO_ROUTE_FALLBACK_MESSAGE.to_string(),
        });
    };

    route
        .geometry
        .coordinates
        .into_iter()
        .map(|pair| LngLat::try_from(pair).map_err(|e| DirectionsError::Malformed(e.to_string())))
        .collect()
}
