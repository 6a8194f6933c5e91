use std::collections::HashMap;

use crate::geo::{BoundingBox, LngLat};
use crate::marker::Marker;
use crate::route::LineLayer;
use crate::view::{FitBoundsOptions, MapView, MarkerHandle};

/// In-memory map view that records every call and rejects duplicate
/// source/layer ids the way the map SDK does.
#[derive(Debug, Default)]
pub(crate) struct RecordingView {
    next_handle: u64,
    pub pins: Vec<(MarkerHandle, Marker)>,
    pub released: Vec<MarkerHandle>,
    pub sources: HashMap<String, Vec<LngLat>>,
    pub source_writes: usize,
    pub layers: Vec<LineLayer>,
    pub flights: Vec<(LngLat, f64)>,
    pub fitted: Vec<(BoundingBox, FitBoundsOptions)>,
}

impl MapView for RecordingView {
    fn fly_to(&mut self, center: LngLat, zoom: f64) {
        self.flights.push((center, zoom));
    }

    fn fit_bounds(&mut self, bounds: &BoundingBox, options: FitBoundsOptions) {
        self.fitted.push((*bounds, options));
    }

    fn add_marker(&mut self, marker: &Marker) -> MarkerHandle {
        self.next_handle += 1;
        let handle = MarkerHandle(self.next_handle);
        self.pins.push((handle, marker.clone()));
        handle
    }

    fn remove_marker(&mut self, handle: MarkerHandle) {
        self.pins.retain(|(h, _)| *h != handle);
        self.released.push(handle);
    }

    fn has_source(&self, id: &str) -> bool {
        self.sources.contains_key(id)
    }

    fn add_line_source(&mut self, id: &str, path: &[LngLat]) {
        assert!(!self.sources.contains_key(id), "source {id} already exists");
        self.sources.insert(id.to_string(), path.to_vec());
        self.source_writes += 1;
    }

    fn set_line_source_data(&mut self, id: &str, path: &[LngLat]) {
        let source = self.sources.get_mut(id).expect("source exists");
        *source = path.to_vec();
        self.source_writes += 1;
    }

    fn add_line_layer(&mut self, layer: &LineLayer) {
        assert!(
            self.layers.iter().all(|l| l.id != layer.id),
            "layer {} already exists",
            layer.id
        );
        self.layers.push(layer.clone());
    }
}

pub(crate) fn lnglat(lng: f64, lat: f64) -> LngLat {
    LngLat::new(lng, lat).expect("valid position")
}
