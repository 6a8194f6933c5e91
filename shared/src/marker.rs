use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geo::{BoundingBox, LngLat};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MarkerError {
    #[error("marker index {index} is out of range for a set of {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

/// A user-placed point of interest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub position: LngLat,
    pub label: String,
}

impl Marker {
    pub fn new(position: LngLat, label: impl Into<String>) -> Self {
        Self {
            position,
            label: label.into(),
        }
    }
}

/// Ordered markers. Insertion order is route waypoint order and list order.
///
/// Updates return a new set instead of mutating in place, so a snapshot held
/// by the UI never aliases the live set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarkerSet {
    markers: Vec<Marker>,
}

impl MarkerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Marker> {
        self.markers.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Marker> {
        self.markers.iter()
    }

    /// Copy of this set with `marker` appended.
    pub fn with(&self, marker: Marker) -> Self {
        let mut markers = Vec::with_capacity(self.markers.len() + 1);
        markers.extend_from_slice(&self.markers);
        markers.push(marker);
        Self { markers }
    }

    /// Copy of this set without the marker at `index`.
    pub fn without(&self, index: usize) -> Result<Self, MarkerError> {
        if index >= self.markers.len() {
            return Err(MarkerError::IndexOutOfRange {
                index,
                len: self.markers.len(),
            });
        }
        let markers = self
            .markers
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, m)| m.clone())
            .collect();
        Ok(Self { markers })
    }

    pub fn positions(&self) -> impl Iterator<Item = LngLat> + '_ {
        self.markers.iter().map(|m| m.position)
    }

    /// `"lng,lat;lng,lat;..."` in insertion order. Empty for an empty set.
    pub fn coordinates_path(&self) -> String {
        self.positions()
            .map(|p| p.to_pair_string())
            .collect::<Vec<_>>()
            .join(";")
    }

    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::from_positions(self.positions())
    }
}

impl<'a> IntoIterator for &'a MarkerSet {
    type Item = &'a Marker;
    type IntoIter = std::slice::Iter<'a, Marker>;

    fn into_iter(self) -> Self::IntoIter {
        self.markers.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::{Marker, MarkerError, MarkerSet};
    use crate::geo::LngLat;

    fn marker(lng: f64, lat: f64, label: &str) -> Marker {
        Marker::new(LngLat::new(lng, lat).expect("valid position"), label)
    }

    #[test]
    fn empty_set_has_empty_path_and_no_bounds() {
        let set = MarkerSet::new();
        assert_eq!(set.coordinates_path(), "");
        assert_eq!(set.bounding_box(), None);
    }

    #[test]
    fn path_preserves_insertion_order() {
        let set = MarkerSet::new()
            .with(marker(-74.0, 40.7, "New York"))
            .with(marker(-0.1, 51.5, "London"));
        assert_eq!(set.coordinates_path(), "-74,40.7;-0.1,51.5");
    }

    #[test]
    fn rome_and_milan() {
        let set = MarkerSet::new()
            .with(marker(12.49, 41.89, "Rome"))
            .with(marker(9.19, 45.46, "Milan"));
        let bounds = set.bounding_box().expect("bounds");
        assert_eq!(bounds.northeast, LngLat::new(12.49, 45.46).expect("ne"));
        assert_eq!(bounds.southwest, LngLat::new(9.19, 41.89).expect("sw"));
        assert_eq!(set.coordinates_path(), "12.49,41.89;9.19,45.46");
    }

    #[test]
    fn duplicates_are_kept() {
        let set = MarkerSet::new()
            .with(marker(1.0, 1.0, "a"))
            .with(marker(1.0, 1.0, "b"));
        assert_eq!(set.len(), 2);
        assert_eq!(set.coordinates_path(), "1,1;1,1");
    }

    #[test]
    fn without_returns_new_set_and_leaves_original() {
        let set = MarkerSet::new()
            .with(marker(12.49, 41.89, "Rome"))
            .with(marker(9.19, 45.46, "Milan"))
            .with(marker(11.25, 43.77, "Florence"));
        let trimmed = set.without(1).expect("remove milan");

        assert_eq!(set.len(), 3);
        assert_eq!(trimmed.coordinates_path(), "12.49,41.89;11.25,43.77");
        let bounds = trimmed.bounding_box().expect("bounds");
        assert_eq!(bounds.northeast, LngLat::new(12.49, 43.77).expect("ne"));
        assert_eq!(bounds.southwest, LngLat::new(11.25, 41.89).expect("sw"));
    }

    #[test]
    fn removing_last_marker_empties_views() {
        let set = MarkerSet::new().with(marker(12.49, 41.89, "Rome"));
        let empty = set.without(0).expect("remove");
        assert!(empty.is_empty());
        assert_eq!(empty.coordinates_path(), "");
        assert_eq!(empty.bounding_box(), None);
    }

    #[test]
    fn out_of_range_removal_fails() {
        let set = MarkerSet::new().with(marker(12.49, 41.89, "Rome"));
        assert_eq!(
            set.without(1),
            Err(MarkerError::IndexOutOfRange { index: 1, len: 1 })
        );
        assert_eq!(
            MarkerSet::new().without(0),
            Err(MarkerError::IndexOutOfRange { index: 0, len: 0 })
        );
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn persists_as_plain_array() {
        let set = MarkerSet::new().with(marker(9.19, 45.46, "Milan"));
        let json = serde_json::to_string(&set).expect("serialize");
        assert_eq!(json, r#"[{"position":[9.19,45.46],"label":"Milan"}]"#);
        let back: MarkerSet = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, set);
    }
}
