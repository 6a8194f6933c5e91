use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum PositionError {
    #[error("coordinate is not a finite number")]
    NotFinite,
    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),
    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),
}

/// A validated WGS84 position in degrees, longitude first.
///
/// Serialized as a `[lng, lat]` pair, the layout used by GeoJSON and the
/// geocoding/directions payloads. Deserialization re-validates the range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; 2]", into = "[f64; 2]")]
pub struct LngLat {
    lng: f64,
    lat: f64,
}

impl LngLat {
    pub fn new(lng: f64, lat: f64) -> Result<Self, PositionError> {
        if !lng.is_finite() || !lat.is_finite() {
            return Err(PositionError::NotFinite);
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(PositionError::LongitudeOutOfRange(lng));
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(PositionError::LatitudeOutOfRange(lat));
        }
        Ok(Self { lng, lat })
    }

    pub const fn lng(&self) -> f64 {
        self.lng
    }

    pub const fn lat(&self) -> f64 {
        self.lat
    }

    /// `"lng,lat"` in shortest round-trip decimal form (`-74.0` renders as `-74`).
    pub fn to_pair_string(&self) -> String {
        format!("{},{}", self.lng, self.lat)
    }
}

impl TryFrom<[f64; 2]> for LngLat {
    type Error = PositionError;

    fn try_from([lng, lat]: [f64; 2]) -> Result<Self, Self::Error> {
        Self::new(lng, lat)
    }
}

impl From<LngLat> for [f64; 2] {
    fn from(p: LngLat) -> Self {
        [p.lng, p.lat]
    }
}

/// Axis-aligned rectangle spanning a set of positions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub northeast: LngLat,
    pub southwest: LngLat,
}

impl BoundingBox {
    /// Min/max fold seeded with the first position. `None` for an empty input.
    /// No antimeridian handling: a set straddling 180° yields a box spanning the globe.
    pub fn from_positions<I>(positions: I) -> Option<Self>
    where
        I: IntoIterator<Item = LngLat>,
    {
        let mut iter = positions.into_iter();
        let first = iter.next()?;
        let (mut west, mut south, mut east, mut north) = (first.lng, first.lat, first.lng, first.lat);
        for p in iter {
            west = west.min(p.lng);
            south = south.min(p.lat);
            east = east.max(p.lng);
            north = north.max(p.lat);
        }
        Some(Self {
            northeast: LngLat {
                lng: east,
                lat: north,
            },
            southwest: LngLat {
                lng: west,
                lat: south,
            },
        })
    }

    /// `[[west, south], [east, north]]`, the bounds layout the map SDK expects.
    pub fn to_sw_ne(&self) -> [[f64; 2]; 2] {
        [self.southwest.into(), self.northeast.into()]
    }
}
