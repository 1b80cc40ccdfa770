//! Endpoint handlers for the apiserver API.
//!
//! Each handler negotiates the response format, re-checks its exact path,
//! consults the shared [`FaultInjector`](crate::fault::FaultInjector), and
//! hands the payload to the renderer. The path re-check keeps handler
//! behavior independent of how the router matched the request.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | any | `/` | Informational root message |
//! | any | `/v1/hello`, `/v1/hello/` | Fixed hello payload |
//! | `POST` | `/v1/echo`, `/v1/echo/` | Echo of the request body |

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{ConnectInfo, Request, State};
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::response::Response;
use tracing::{error, info, warn};

use crate::error::ApiError;
use crate::negotiate::{negotiate, ResponseFormat};
use crate::render::{self, Chrome, Payload};
use crate::state::AppState;

/// Exact path served by the root handler.
pub const ROOT_PATH: &str = "/";

/// Exact paths served by the hello handler.
pub const HELLO_PATHS: [&str; 2] = ["/v1/hello", "/v1/hello/"];

/// Exact paths served by the echo handler.
pub const ECHO_PATHS: [&str; 2] = ["/v1/echo", "/v1/echo/"];

// ---------------------------------------------------------------------------
// any / -- informational root message
// ---------------------------------------------------------------------------

/// Serve the root endpoint.
///
/// Answers any method on exactly `/` with an informational message in the
/// negotiated format. The body is error-shaped (a lone `message` field) and
/// the status is 200; existing clients parse it that way.
pub async fn root(
    State(state): State<Arc<AppState>>,
    ConnectInfo(remote): ConnectInfo<SocketAddr>,
    req: Request,
) -> Result<Response, ApiError> {
    let format = negotiate(req.headers());
    let method = req.method().clone();
    let path = req.uri().path().to_owned();

    if path != ROOT_PATH {
        return Err(not_found("root", &method, path, remote, format, state.html));
    }

    info!(handler = "root", method = %method, path, from = %remote, json = format.is_json(), "handling request");

    if state.faults.should_fail() {
        warn!(handler = "root", method = %method, path, from = %remote, "forcing error");
        return Err(ApiError::Injected);
    }

    let payload = Payload::error(format!("nothing to see here: [{path}]"));
    Ok(render::render(
        format,
        &payload,
        Chrome::ROOT,
        state.html,
        StatusCode::OK,
    ))
}

// ---------------------------------------------------------------------------
// any /v1/hello -- fixed hello payload
// ---------------------------------------------------------------------------

/// Serve the hello endpoint.
///
/// Answers any method on exactly `/v1/hello` or `/v1/hello/` with the fixed
/// hello payload and a permissive cross-origin header.
pub async fn hello(
    State(state): State<Arc<AppState>>,
    ConnectInfo(remote): ConnectInfo<SocketAddr>,
    req: Request,
) -> Result<Response, ApiError> {
    let format = negotiate(req.headers());
    let method = req.method().clone();
    let path = req.uri().path().to_owned();

    if !HELLO_PATHS.contains(&path.as_str()) {
        return Err(not_found("hello", &method, path, remote, format, state.html));
    }

    info!(handler = "hello", method = %method, path, from = %remote, json = format.is_json(), "handling request");

    if state.faults.should_fail() {
        warn!(handler = "hello", method = %method, path, from = %remote, "forcing error");
        return Err(ApiError::Injected);
    }

    let mut response = render::render(
        format,
        &Payload::hello(),
        Chrome::HELLO,
        state.html,
        StatusCode::OK,
    );
    allow_any_origin(&mut response);
    Ok(response)
}

// ---------------------------------------------------------------------------
// POST /v1/echo -- echo of the request body
// ---------------------------------------------------------------------------

/// Serve the echo endpoint.
///
/// Requires `POST` on exactly `/v1/echo` or `/v1/echo/`. The entire request
/// body becomes the echoed message; any other method gets a 405 with an
/// `Allow: POST` header.
pub async fn echo(
    State(state): State<Arc<AppState>>,
    ConnectInfo(remote): ConnectInfo<SocketAddr>,
    req: Request,
) -> Result<Response, ApiError> {
    let format = negotiate(req.headers());
    let method = req.method().clone();
    let path = req.uri().path().to_owned();

    if !ECHO_PATHS.contains(&path.as_str()) {
        return Err(not_found("echo", &method, path, remote, format, state.html));
    }

    if method != Method::POST {
        warn!(handler = "echo", method = %method, path, from = %remote, json = format.is_json(), "method not supported");
        return Err(ApiError::MethodNotAllowed { method });
    }

    info!(handler = "echo", method = %method, path, from = %remote, json = format.is_json(), "handling request");

    if state.faults.should_fail() {
        warn!(handler = "echo", method = %method, path, from = %remote, "forcing error");
        return Err(ApiError::Injected);
    }

    let body = axum::body::to_bytes(req.into_body(), usize::MAX)
        .await
        .map_err(|err| {
            error!(handler = "echo", path, from = %remote, error = %err, "body read failed");
            ApiError::BodyRead(err.to_string())
        })?;

    let message = String::from_utf8_lossy(&body).into_owned();
    let mut response = render::render(
        format,
        &Payload::echo(message),
        Chrome::ECHO,
        state.html,
        StatusCode::OK,
    );
    allow_any_origin(&mut response);
    Ok(response)
}

// ---------------------------------------------------------------------------
// Fallback -- uniform not-found response
// ---------------------------------------------------------------------------

/// Answer requests for paths outside the registered route table.
///
/// Produces the same not-found response the per-handler path checks do, in
/// the negotiated format and with chrome when the HTML flag is on.
pub async fn fallback(
    State(state): State<Arc<AppState>>,
    ConnectInfo(remote): ConnectInfo<SocketAddr>,
    req: Request,
) -> ApiError {
    let format = negotiate(req.headers());
    not_found(
        "fallback",
        req.method(),
        req.uri().path().to_owned(),
        remote,
        format,
        state.html,
    )
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Log a path mismatch and build the not-found error for it.
fn not_found(
    handler: &str,
    method: &Method,
    path: String,
    remote: SocketAddr,
    format: ResponseFormat,
    html: bool,
) -> ApiError {
    warn!(handler, method = %method, path, from = %remote, json = format.is_json(), "path not found");
    ApiError::NotFound { path, format, html }
}

/// Mark a response as callable from any origin.
fn allow_any_origin(response: &mut Response) {
    response.headers_mut().insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
}
