use axum::{
    Router,
    extract::Request,
    http::{HeaderValue, header},
    middleware::{self, Next},
    response::Response,
};
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;

use crate::routes;
use crate::state::AppState;

/// Length of the content hash Trunk appends to bundle file stems.
const TRUNK_HASH_LEN: usize = 16;

pub(crate) fn build_app(state: AppState) -> Router {
    let client_bundle = Router::new()
        .fallback_service(
            ServeDir::new(state.dist_dir.as_str())
                .precompressed_br()
                .precompressed_gzip(),
        )
        .layer(middleware::from_fn(set_bundle_cache_control));

    Router::new()
        .route("/api/config", axum::routing::get(routes::api::get_config))
        .route("/api/health", axum::routing::get(routes::api::health))
        .layer(CompressionLayer::new())
        .fallback_service(client_bundle)
        .with_state(state)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BundleCache {
    /// Content-addressed output: `pinroute-client-<hash>.js`, `..._bg.wasm`.
    Immutable,
    /// The page that names the current hashes; must be revalidated on deploy.
    Revalidate,
}

impl BundleCache {
    fn header_value(self) -> HeaderValue {
        match self {
            Self::Immutable => HeaderValue::from_static("public, max-age=31536000, immutable"),
            Self::Revalidate => HeaderValue::from_static("no-cache"),
        }
    }

    fn for_path(path: &str) -> Option<Self> {
        if path == "/" || path == "/index.html" {
            return Some(Self::Revalidate);
        }
        trunk_hashed(path).then_some(Self::Immutable)
    }
}

async fn set_bundle_cache_control(request: Request, next: Next) -> Response {
    let policy = BundleCache::for_path(request.uri().path());
    let mut response = next.run(request).await;

    if let Some(policy) = policy
        && response.status().is_success()
    {
        response
            .headers_mut()
            .insert(header::CACHE_CONTROL, policy.header_value());
    }
    response
}

/// `<stem>-<16 hex>.js`, `<stem>-<16 hex>_bg.wasm` or `<stem>-<16 hex>.css`.
fn trunk_hashed(path: &str) -> bool {
    let file = path.rsplit('/').next().unwrap_or(path);
    let Some(rest) = file
        .strip_suffix("_bg.wasm")
        .or_else(|| file.strip_suffix(".js"))
        .or_else(|| file.strip_suffix(".css"))
    else {
        return false;
    };
    let Some((stem, hash)) = rest.rsplit_once('-') else {
        return false;
    };
    !stem.is_empty()
        && hash.len() == TRUNK_HASH_LEN
        && hash.chars().all(|c| c.is_ascii_hexdigit())
}
