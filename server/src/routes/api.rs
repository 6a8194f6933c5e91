use axum::Json;
use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;

use crate::state::AppState;

pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    let observability = state.observability.snapshot();
    Json(serde_json::json!({
        "status": "ok",
        "token_configured": state.token_configured(),
        "observability": {
            "config_requests_total": observability.config_requests_total,
        }
    }))
}

/// Serve the pre-serialized client config.
pub async fn get_config(State(state): State<AppState>) -> impl IntoResponse {
    state.observability.record_config_request();
    (
        [
            (header::CONTENT_TYPE, "application/json"),
            (header::CACHE_CONTROL, "no-store"),
        ],
        state.client_config_json.as_str().to_owned(),
    )
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;

    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use pinroute_shared::ClientConfig;
    use tower::ServiceExt;

    use crate::state::AppState;

    fn test_state(token: &str) -> AppState {
        AppState::new(
            ClientConfig {
                access_token: token.to_string(),
                ..ClientConfig::default()
            },
            "does-not-exist".to_string(),
        )
    }

    async fn spawn_test_server(state: AppState) -> (SocketAddr, tokio::task::JoinHandle<()>) {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test listener");
        let addr = listener.local_addr().expect("listener address");
        let app = crate::app::build_app(state);
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve test app");
        });
        (addr, handle)
    }

    #[tokio::test]
    async fn config_round_trips_to_the_client_type() {
        let state = test_state("pk.test-token");
        let (addr, server_handle) = spawn_test_server(state).await;
        let client = reqwest::Client::new();

        let config = client
            .get(format!("http://{addr}/api/config"))
            .send()
            .await
            .expect("config request")
            .error_for_status()
            .expect("config status")
            .json::<ClientConfig>()
            .await
            .expect("parse config");

        assert_eq!(config.access_token, "pk.test-token");
        assert_eq!(config, ClientConfig {
            access_token: "pk.test-token".to_string(),
            ..ClientConfig::default()
        });

        server_handle.abort();
    }

    #[tokio::test]
    async fn health_counts_config_requests() {
        let state = test_state("");
        let (addr, server_handle) = spawn_test_server(state).await;
        let base_url = format!("http://{addr}");
        let client = reqwest::Client::new();

        for _ in 0..2 {
            client
                .get(format!("{base_url}/api/config"))
                .send()
                .await
                .expect("config request");
        }

        let health = client
            .get(format!("{base_url}/api/health"))
            .send()
            .await
            .expect("health request")
            .json::<serde_json::Value>()
            .await
            .expect("parse health");

        assert_eq!(health.get("status").and_then(|v| v.as_str()), Some("ok"));
        assert_eq!(
            health.get("token_configured").and_then(|v| v.as_bool()),
            Some(false)
        );
        assert_eq!(
            health
                .pointer("/observability/config_requests_total")
                .and_then(|v| v.as_u64()),
            Some(2)
        );

        server_handle.abort();
    }

    #[tokio::test]
    async fn config_is_never_cached() {
        let app = crate::app::build_app(test_state("pk.x"));
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/config")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::CACHE_CONTROL)
                .and_then(|v| v.to_str().ok()),
            Some("no-store")
        );
    }
}
