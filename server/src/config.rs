use pinroute_shared::ClientConfig;

pub const DEFAULT_SERVER_PORT: u16 = 3000;
pub const DEFAULT_CLIENT_DIST_DIR: &str = "client/dist";

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

pub fn server_port() -> u16 {
    std::env::var("PINROUTE_PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(DEFAULT_SERVER_PORT)
}

pub fn client_dist_dir() -> String {
    non_empty_var("CLIENT_DIST_DIR").unwrap_or_else(|| DEFAULT_CLIENT_DIST_DIR.to_string())
}

/// Settings served to the browser. Read once at startup.
pub fn client_config() -> ClientConfig {
    let defaults = ClientConfig::default();
    ClientConfig {
        access_token: non_empty_var("MAPBOX_TOKEN").unwrap_or_default(),
        geocoding_host: non_empty_var("GEOCODING_HOST").unwrap_or(defaults.geocoding_host),
        directions_host: non_empty_var("DIRECTIONS_HOST").unwrap_or(defaults.directions_host),
        map_style: non_empty_var("MAP_STYLE").unwrap_or(defaults.map_style),
        initial_camera: defaults.initial_camera,
    }
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_SERVER_PORT, client_config, client_dist_dir, server_port};
    use pinroute_shared::ClientConfig;

    #[test]
    fn port_falls_back_on_garbage_and_zero() {
        temp_env::with_var("PINROUTE_PORT", Some("not-a-port"), || {
            assert_eq!(server_port(), DEFAULT_SERVER_PORT);
        });
        temp_env::with_var("PINROUTE_PORT", Some("0"), || {
            assert_eq!(server_port(), DEFAULT_SERVER_PORT);
        });
        temp_env::with_var("PINROUTE_PORT", Some("8088"), || {
            assert_eq!(server_port(), 8088);
        });
    }

    #[test]
    fn client_config_reads_overrides() {
        temp_env::with_vars(
            [
                ("MAPBOX_TOKEN", Some(" pk.abc ")),
                ("GEOCODING_HOST", Some("http://localhost:9000/geo")),
                ("DIRECTIONS_HOST", None),
                ("MAP_STYLE", Some("   ")),
            ],
            || {
                let config = client_config();
                let defaults = ClientConfig::default();
                assert_eq!(config.access_token, "pk.abc");
                assert_eq!(config.geocoding_host, "http://localhost:9000/geo");
                assert_eq!(config.directions_host, defaults.directions_host);
                assert_eq!(config.map_style, defaults.map_style);
            },
        );
    }

    #[test]
    fn dist_dir_defaults_to_client_build() {
        temp_env::with_var_unset("CLIENT_DIST_DIR", || {
            assert_eq!(client_dist_dir(), "client/dist");
        });
    }
}
