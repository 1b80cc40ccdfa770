//! HTTP surface for the apiserver demo API.
//!
//! This crate provides an Axum HTTP server exposing three fixed endpoints:
//!
//! - **`/`** -- informational root message
//! - **`/v1/hello`** (and `/v1/hello/`) -- fixed hello payload
//! - **`/v1/echo`** (and `/v1/echo/`, `POST` only) -- echo of the request body
//!
//! The response encoding is negotiated per request: any `Accept` header
//! value equal to `application/json` selects a JSON body with a trailing
//! newline; anything else selects plain text, wrapped in HTML document
//! chrome when the server runs with the HTML flag enabled.
//!
//! # Architecture
//!
//! Each handler composes three small pieces held together by the shared
//! [`AppState`]: the [`negotiate`] step picks the format, the
//! [`FaultInjector`] decides whether this request is forced to fail, and
//! the renderer turns a payload plus chrome into the response bytes. The
//! injector is a single process-wide counter, so a configured rate of N
//! fails exactly every Nth eligible request across all connections.

pub mod error;
pub mod fault;
pub mod handlers;
pub mod negotiate;
pub mod render;
pub mod router;
pub mod server;
pub mod state;

// Re-export primary types for convenience.
pub use fault::FaultInjector;
pub use negotiate::{negotiate, ResponseFormat};
pub use router::build_router;
pub use server::{start_server, ServerConfig, ServerError};
pub use state::AppState;
