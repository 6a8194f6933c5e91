use gloo_net::http::Request;

use pinroute_shared::directions::{directions_url, parse_route};
use pinroute_shared::geocoding::{geocoding_url, parse_suggestions};
use pinroute_shared::{ClientConfig, DirectionsError, LngLat, Suggestion};

/// Fetch runtime settings from the hosting server.
pub async fn fetch_config() -> Result<ClientConfig, String> {
    let resp = Request::get("/api/config")
        .send()
        .await
        .map_err(|e| format!("fetch error: {e}"))?;

    if !resp.ok() {
        return Err(format!("HTTP {}", resp.status()));
    }

    resp.json::<ClientConfig>()
        .await
        .map_err(|e| format!("parse error: {e}"))
}

/// Geocode `query`. An unusable response body is an empty list, not an error.
pub async fn fetch_suggestions(config: &ClientConfig, query: &str) -> Result<Vec<Suggestion>, String> {
    let Some(url) = geocoding_url(&config.geocoding_host, query, &config.access_token, |q| {
        js_sys::encode_uri_component(q).as_string().unwrap_or_default()
    }) else {
        return Ok(Vec::new());
    };

    let resp = Request::get(&url)
        .send()
        .await
        .map_err(|e| format!("fetch error: {e}"))?;
    if !resp.ok() {
        web_sys::console::warn_1(&format!("Geocoding returned HTTP {}", resp.status()).into());
    }

    let body = resp
        .text()
        .await
        .map_err(|e| format!("read error: {e}"))?;
    Ok(parse_suggestions(&body))
}

/// Request a driving route through `waypoints` (`"lng,lat;..."`).
pub async fn fetch_route(config: &ClientConfig, waypoints: &str) -> Result<Vec<LngLat>, DirectionsError> {
    let url = directions_url(&config.directions_host, waypoints, &config.access_token);

    let resp = Request::get(&url)
        .send()
        .await
        .map_err(|e| DirectionsError::Transport(e.to_string()))?;

    // Error payloads (NoRoute, InvalidInput) carry a JSON body regardless of status.
    let body = resp
        .text()
        .await
        .map_err(|e| DirectionsError::Transport(e.to_string()))?;
    parse_route(&body)
}
