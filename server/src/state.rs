use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use pinroute_shared::ClientConfig;

#[derive(Clone)]
pub struct AppState {
    pub client_config: Arc<ClientConfig>,
    /// Serialized once at startup; every `/api/config` hit serves the same bytes.
    pub client_config_json: Arc<String>,
    pub dist_dir: Arc<String>,
    pub observability: Arc<ObservabilityCounters>,
}

#[derive(Debug, Default)]
pub struct ObservabilityCounters {
    config_requests_total: AtomicU64,
}

#[derive(Debug, Clone, Copy)]
pub struct ObservabilitySnapshot {
    pub config_requests_total: u64,
}

impl ObservabilityCounters {
    pub fn snapshot(&self) -> ObservabilitySnapshot {
        ObservabilitySnapshot {
            config_requests_total: self.config_requests_total.load(Ordering::Relaxed),
        }
    }

    pub fn record_config_request(&self) {
        self.config_requests_total.fetch_add(1, Ordering::Relaxed);
    }
}

impl AppState {
    pub fn new(client_config: ClientConfig, dist_dir: String) -> Self {
        let client_config_json = serde_json::to_string(&client_config).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "failed to serialize client config, serving defaults");
            String::from("{}")
        });
        Self {
            client_config: Arc::new(client_config),
            client_config_json: Arc::new(client_config_json),
            dist_dir: Arc::new(dist_dir),
            observability: Arc::new(ObservabilityCounters::default()),
        }
    }

    pub fn token_configured(&self) -> bool {
        self.client_config.validate().is_ok()
    }
}
