use crate::geo::BoundingBox;
use crate::marker::{Marker, MarkerError, MarkerSet};
use crate::store::MarkerStore;
use crate::view::{MapView, MarkerHandle};

/// A route needs at least an origin and a destination.
pub const MIN_ROUTE_WAYPOINTS: usize = 2;

/// Owns the marker set, its rendered pins, and its persistence.
///
/// `pins[i]` is the rendering handle of `markers[i]`; markers loaded from the
/// store stay unpinned until [`MarkerManager::restore_pins`] runs.
pub struct MarkerManager<S: MarkerStore> {
    markers: MarkerSet,
    pins: Vec<Option<MarkerHandle>>,
    store: S,
}

impl<S: MarkerStore> MarkerManager<S> {
    pub fn new(store: S) -> Self {
        let markers = store.load();
        let pins = vec![None; markers.len()];
        Self {
            markers,
            pins,
            store,
        }
    }

    pub fn markers(&self) -> &MarkerSet {
        &self.markers
    }

    /// Render pins for markers that do not have one yet.
    pub fn restore_pins<V: MapView + ?Sized>(&mut self, view: &mut V) {
        for (marker, pin) in self.markers.iter().zip(self.pins.iter_mut()) {
            if pin.is_none() {
                *pin = Some(view.add_marker(marker));
            }
        }
    }

    pub fn add<V: MapView + ?Sized>(&mut self, view: &mut V, marker: Marker) -> &MarkerSet {
        let handle = view.add_marker(&marker);
        self.markers = self.markers.with(marker);
        self.pins.push(Some(handle));
        self.store.save(&self.markers);
        &self.markers
    }

    /// Remove the marker at `index`, releasing its pin first.
    /// An invalid index leaves both the set and the view untouched.
    pub fn remove_at<V: MapView + ?Sized>(
        &mut self,
        view: &mut V,
        index: usize,
    ) -> Result<Marker, MarkerError> {
        let next = self.markers.without(index)?;
        let removed = self.markers.get(index).cloned().ok_or(MarkerError::IndexOutOfRange {
            index,
            len: self.markers.len(),
        })?;

        if let Some(handle) = self.pins.remove(index) {
            view.remove_marker(handle);
        }
        self.markers = next;
        self.store.save(&self.markers);
        Ok(removed)
    }

    pub fn coordinates_path(&self) -> String {
        self.markers.coordinates_path()
    }

    pub fn bounding_box(&self) -> Option<BoundingBox> {
        self.markers.bounding_box()
    }

    /// Waypoint path for a directions request, once enough markers exist.
    pub fn routable_path(&self) -> Option<String> {
        (self.markers.len() >= MIN_ROUTE_WAYPOINTS).then(|| self.markers.coordinates_path())
    }
}
