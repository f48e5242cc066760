//! Router construction.

use std::sync::Arc;

use axum::Router;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::security;
use crate::state::AppState;

/// Create the application router.
///
/// Every path goes to a single fallback handler, which dispatches on the
/// serve mode.
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .fallback(handlers::serve)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(security::content_type_options_layer()),
        )
        .with_state(state)
}
