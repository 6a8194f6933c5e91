use chrono::{DateTime, Utc};
use serde_json::{Value, json};

use crate::directions::DirectionsError;
use crate::geo::LngLat;
use crate::notice::{NoticeBoard, NoticeLevel};
use crate::view::MapView;

pub const ROUTE_SOURCE_ID: &str = "route";
pub const ROUTE_LAYER_ID: &str = "route";
pub const ROUTE_COLOR: &str = "#3887be";
pub const ROUTE_WIDTH: f64 = 5.0;
pub const ROUTE_OPACITY: f64 = 0.75;
const ROUND: &str = "round";

#[derive(Debug, Clone, PartialEq)]
pub struct LineStyle {
    pub join: &'static str,
    pub cap: &'static str,
    pub color: &'static str,
    pub width: f64,
    pub opacity: f64,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            join: ROUND,
            cap: ROUND,
            color: ROUTE_COLOR,
            width: ROUTE_WIDTH,
            opacity: ROUTE_OPACITY,
        }
    }
}

/// A line layer bound to a named source.
#[derive(Debug, Clone, PartialEq)]
pub struct LineLayer {
    pub id: &'static str,
    pub source: &'static str,
    pub style: LineStyle,
}

impl LineLayer {
    /// Layer specification in the map style format.
    pub fn to_spec(&self) -> Value {
        json!({
            "id": self.id,
            "type": "line",
            "source": self.source,
            "layout": {
                "line-join": self.style.join,
                "line-cap": self.style.cap,
            },
            "paint": {
                "line-color": self.style.color,
                "line-width": self.style.width,
                "line-opacity": self.style.opacity,
            },
        })
    }
}

/// GeoJSON Feature holding `path` as a single connected LineString.
pub fn line_feature(path: &[LngLat]) -> Value {
    let coordinates: Vec<[f64; 2]> = path.iter().map(|p| (*p).into()).collect();
    json!({
        "type": "Feature",
        "properties": {},
        "geometry": {
            "type": "LineString",
            "coordinates": coordinates,
        },
    })
}

/// GeoJSON source specification wrapping [`line_feature`].
pub fn line_source_spec(path: &[LngLat]) -> Value {
    json!({
        "type": "geojson",
        "data": line_feature(path),
    })
}

/// The single route line on the map.
///
/// The first application registers the source and its layer; later ones only
/// swap the source geometry, so the layer keeps its identity and style.
#[derive(Debug, Clone)]
pub struct RouteOverlay {
    layer: LineLayer,
}

impl Default for RouteOverlay {
    fn default() -> Self {
        Self {
            layer: LineLayer {
                id: ROUTE_LAYER_ID,
                source: ROUTE_SOURCE_ID,
                style: LineStyle::default(),
            },
        }
    }
}

impl RouteOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply_route<V: MapView + ?Sized>(&self, view: &mut V, path: &[LngLat]) {
        if view.has_source(self.layer.source) {
            view.set_line_source_data(self.layer.source, path);
            return;
        }
        view.add_line_source(self.layer.source, path);
        view.add_line_layer(&self.layer);
    }

    /// Draw a successful directions result, or post exactly one notice and
    /// leave the overlay untouched.
    pub fn apply_directions<V: MapView + ?Sized>(
        &self,
        view: &mut V,
        result: Result<Vec<LngLat>, DirectionsError>,
        notices: &mut NoticeBoard,
        now: DateTime<Utc>,
    ) -> RouteOutcome {
        match result {
            Ok(path) => {
                self.apply_route(view, &path);
                RouteOutcome::Drawn {
                    points: path.len(),
                }
            }
            Err(DirectionsError::NoRoute { message }) => {
                RouteOutcome::Noticed(notices.raise(NoticeLevel::Warning, message, now))
            }
            Err(e) => RouteOutcome::Noticed(notices.raise(NoticeLevel::Warning, e.to_string(), now)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    Drawn { points: usize },
    /// Id of the notice that was raised instead.
    Noticed(u64),
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::{ROUTE_SOURCE_ID, RouteOutcome, RouteOverlay, line_source_spec};
    use crate::directions::{DirectionsError, parse_route};
    use crate::notice::NoticeBoard;
    use crate::test_support::{RecordingView, lnglat};

    #[test]
    fn first_application_creates_source_and_layer() {
        let mut view = RecordingView::default();
        let path = [lnglat(12.49, 41.89), lnglat(11.25, 43.77), lnglat(9.19, 45.46)];

        RouteOverlay::new().apply_route(&mut view, &path);

        assert_eq!(view.sources.get(ROUTE_SOURCE_ID).map(Vec::len), Some(3));
        assert_eq!(view.layers.len(), 1);
        let spec = view.layers[0].to_spec();
        assert_eq!(spec["type"], "line");
        assert_eq!(spec["source"], ROUTE_SOURCE_ID);
        assert_eq!(spec["layout"]["line-join"], "round");
        assert_eq!(spec["layout"]["line-cap"], "round");
        assert_eq!(spec["paint"]["line-width"], 5.0);
        assert_eq!(spec["paint"]["line-opacity"], 0.75);
    }

    #[test]
    fn repeated_application_is_idempotent() {
        let mut view = RecordingView::default();
        let overlay = RouteOverlay::new();
        let path = [lnglat(12.49, 41.89), lnglat(9.19, 45.46)];

        overlay.apply_route(&mut view, &path);
        overlay.apply_route(&mut view, &path);

        assert_eq!(view.sources.len(), 1);
        assert_eq!(view.layers.len(), 1);
        assert_eq!(view.sources[ROUTE_SOURCE_ID], path.to_vec());
    }

    #[test]
    fn new_route_replaces_geometry_in_place() {
        let mut view = RecordingView::default();
        let overlay = RouteOverlay::new();
        overlay.apply_route(&mut view, &[lnglat(0.0, 0.0), lnglat(1.0, 1.0)]);
        let layer_before = view.layers[0].clone();

        let replacement = [lnglat(2.0, 2.0), lnglat(3.0, 3.0), lnglat(4.0, 4.0)];
        overlay.apply_route(&mut view, &replacement);

        assert_eq!(view.sources[ROUTE_SOURCE_ID], replacement.to_vec());
        assert_eq!(view.layers, vec![layer_before]);
        assert_eq!(view.source_writes, 2);
    }

    #[test]
    fn source_spec_is_a_geojson_line_string() {
        let spec = line_source_spec(&[lnglat(-74.0, 40.7), lnglat(-0.1, 51.5)]);
        assert_eq!(spec["type"], "geojson");
        assert_eq!(spec["data"]["geometry"]["type"], "LineString");
        assert_eq!(
            spec["data"]["geometry"]["coordinates"],
            serde_json::json!([[-74.0, 40.7], [-0.1, 51.5]])
        );
    }

    #[test]
    fn no_route_posts_one_notice_and_draws_nothing() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let mut view = RecordingView::default();
        let mut notices = NoticeBoard::new();

        let result = parse_route(r#"{"code": "NoRoute", "message": "No route found"}"#);
        let outcome = RouteOverlay::new().apply_directions(&mut view, result, &mut notices, now);

        assert!(matches!(outcome, RouteOutcome::Noticed(_)));
        assert!(view.sources.is_empty());
        assert!(view.layers.is_empty());
        assert_eq!(notices.len(), 1);
        assert_eq!(notices.active()[0].message, "No route found");
    }

    #[test]
    fn successful_directions_draw_the_route() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let mut view = RecordingView::default();
        let mut notices = NoticeBoard::new();

        let outcome = RouteOverlay::new().apply_directions(
            &mut view,
            Ok(vec![lnglat(12.49, 41.89), lnglat(9.19, 45.46)]),
            &mut notices,
            now,
        );

        assert_eq!(outcome, RouteOutcome::Drawn { points: 2 });
        assert_eq!(view.layers.len(), 1);
        assert!(notices.is_empty());
    }

    #[test]
    fn upstream_failure_is_surfaced_as_notice() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let mut view = RecordingView::default();
        let mut notices = NoticeBoard::new();

        RouteOverlay::new().apply_directions(
            &mut view,
            Err(DirectionsError::Malformed("eof".to_string())),
            &mut notices,
            now,
        );

        assert!(view.sources.is_empty());
        assert_eq!(notices.len(), 1);
    }
}
