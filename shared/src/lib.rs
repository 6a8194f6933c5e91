pub mod config;
pub mod directions;
pub mod geo;
pub mod geocoding;
pub mod manager;
pub mod marker;
pub mod notice;
pub mod route;
pub mod sequence;
pub mod store;
pub mod view;

#[cfg(test)]
mod test_support;

pub use config::{ClientConfig, ConfigError};
pub use directions::DirectionsError;
pub use geo::{BoundingBox, LngLat, PositionError};
pub use geocoding::Suggestion;
pub use manager::MarkerManager;
pub use marker::{Marker, MarkerError, MarkerSet};
pub use notice::{Notice, NoticeBoard, NoticeLevel};
pub use route::{LineLayer, RouteOutcome, RouteOverlay};
pub use sequence::{RequestSequencer, RequestTicket};
pub use store::{MarkerStore, MemoryStore, NoopStore};
pub use view::{CameraState, FitBoundsOptions, MapView, MarkerHandle};
