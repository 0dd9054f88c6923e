//! Route modules for the SocraticStudy server

pub mod doubt;
pub mod health;
pub mod summarize;
pub mod tts;
pub mod upload;

use axum::http::HeaderValue;
use axum::Router;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::CorsConfig;
use crate::state::AppState;
use crate::storage::MEDIA_URL_PREFIX;

/// Build the full application router
pub fn router(state: AppState) -> Router {
    let max_upload_bytes = state.config().server.max_upload_bytes;
    let cors = cors_layer(&state.config().cors);
    let media = ServeDir::new(state.files().media_dir());

    Router::new()
        .merge(health::router())
        .merge(upload::router(max_upload_bytes))
        .merge(summarize::router())
        .merge(tts::router())
        .merge(doubt::router())
        .nest_service(MEDIA_URL_PREFIX, media)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// CORS for the configured browser origins.
///
/// A `*` entry allows any origin without credentials; otherwise only the
/// listed origins are allowed, with credentials.
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    if config.allows_any() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}
