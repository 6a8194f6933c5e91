use serde::{Deserialize, Serialize};

use crate::geo::{BoundingBox, LngLat};
use crate::marker::Marker;
use crate::route::LineLayer;

/// Opaque handle to a rendered pin. Released through [`MapView::remove_marker`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerHandle(pub u64);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitBoundsOptions {
    pub padding: f64,
}

impl Default for FitBoundsOptions {
    fn default() -> Self {
        Self { padding: 60.0 }
    }
}

/// The rendered map. Only the UI event loop drives it.
pub trait MapView {
    fn fly_to(&mut self, center: LngLat, zoom: f64);
    fn fit_bounds(&mut self, bounds: &BoundingBox, options: FitBoundsOptions);

    /// Render a pin with a popup carrying the marker label.
    fn add_marker(&mut self, marker: &Marker) -> MarkerHandle;
    fn remove_marker(&mut self, handle: MarkerHandle);

    fn has_source(&self, id: &str) -> bool;
    /// Register a GeoJSON source holding `path` as one LineString.
    fn add_line_source(&mut self, id: &str, path: &[LngLat]);
    /// Replace the geometry of an existing source, leaving its layers alone.
    fn set_line_source_data(&mut self, id: &str, path: &[LngLat]);
    fn add_line_layer(&mut self, layer: &LineLayer);
}

/// Center and zoom as reported by the map's `move` event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraState {
    pub lng: f64,
    pub lat: f64,
    pub zoom: f64,
}

impl CameraState {
    pub fn readout(&self) -> String {
        format!(
            "Longitude: {:.4} | Latitude: {:.4} | Zoom: {:.2}",
            self.lng, self.lat, self.zoom
        )
    }
}
