// CORS for the campaign callback scope
// The dispatcher authenticates with a shared secret, not cookies, so the
// policy is a plain wildcard with an explicit allowed-headers list. Preflight
// OPTIONS is answered unconditionally by the layer.

use axum::http::{header, HeaderName, Method};
use tower_http::cors::{Any, CorsLayer};

pub fn callback_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
        ])
}
