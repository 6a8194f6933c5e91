use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::directions::DEFAULT_DIRECTIONS_HOST;
use crate::geocoding::DEFAULT_GEOCODING_HOST;
use crate::view::CameraState;

pub const DEFAULT_MAP_STYLE: &str = "mapbox://styles/mapbox/dark-v10";
pub const INITIAL_CAMERA: CameraState = CameraState {
    lng: 12.1539,
    lat: 42.1048,
    zoom: 5.46,
};
pub const INITIAL_PITCH: f64 = 40.0;
/// Zoom used when flying to a selected search result.
pub const SELECT_ZOOM: f64 = 12.0;
pub const SCALE_CONTROL_MAX_WIDTH: u32 = 80;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("map access token is not configured")]
    MissingToken,
}

/// Runtime settings handed to the browser client at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub access_token: String,
    pub geocoding_host: String,
    pub directions_host: String,
    pub map_style: String,
    pub initial_camera: CameraState,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            access_token: String::new(),
            geocoding_host: DEFAULT_GEOCODING_HOST.to_string(),
            directions_host: DEFAULT_DIRECTIONS_HOST.to_string(),
            map_style: DEFAULT_MAP_STYLE.to_string(),
            initial_camera: INITIAL_CAMERA,
        }
    }
}

impl ClientConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.access_token.trim().is_empty() {
            return Err(ConfigError::MissingToken);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ClientConfig, ConfigError, INITIAL_CAMERA};

    #[test]
    fn partial_payload_keeps_defaults() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"access_token": "pk.test"}"#).expect("parse");
        assert_eq!(config.access_token, "pk.test");
        assert_eq!(config.initial_camera, INITIAL_CAMERA);
        assert!(config.geocoding_host.starts_with("https://"));
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn blank_token_is_rejected() {
        let config = ClientConfig {
            access_token: "  ".to_string(),
            ..ClientConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::MissingToken));
    }
}
