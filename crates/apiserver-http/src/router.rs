//! Axum router construction for the apiserver API.
//!
//! Registers the trailing-slash and bare forms of each versioned path as
//! distinct routes, with a fallback that renders the uniform not-found
//! response for everything else.

use std::sync::Arc;

use axum::routing::any;
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router for the apiserver.
///
/// The router includes:
/// - any `/` -- informational root message
/// - any `/v1/hello`, `/v1/hello/` -- fixed hello payload
/// - `POST /v1/echo`, `/v1/echo/` -- echo of the request body
///
/// Routes accept any method so the handlers decide how to answer; only
/// echo rejects non-`POST` requests, with a 405. Unregistered paths fall
/// through to the not-found handler.
pub fn build_router(state: Arc<AppState>) -> Router {
    let mut router = Router::new().route(handlers::ROOT_PATH, any(handlers::root));
    debug!(path = handlers::ROOT_PATH, "registered route");

    for path in handlers::HELLO_PATHS {
        router = router.route(path, any(handlers::hello));
        debug!(path, "registered route");
    }

    for path in handlers::ECHO_PATHS {
        router = router.route(path, any(handlers::echo));
        debug!(path, "registered route");
    }

    router
        .fallback(handlers::fallback)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
