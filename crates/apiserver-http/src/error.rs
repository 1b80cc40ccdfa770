//! Per-request error taxonomy for the apiserver.
//!
//! [`ApiError`] unifies every failure a request can hit into a single
//! enum whose [`IntoResponse`] implementation produces the exact wire
//! behavior: a format-aware 404, a plain-text 405 with the `Allow`
//! header, and plain-text 500s for injected and body-read failures.
//! None of these propagate beyond the request that produced them.
//!
//! Startup failures (bind/serve) live in
//! [`ServerError`](crate::server::ServerError); serialization failures
//! are absorbed inside the renderer.

use axum::http::{Method, StatusCode, header};
use axum::response::{IntoResponse, Response};

use crate::negotiate::ResponseFormat;
use crate::render::{self, Chrome, Payload};

/// Body of every forced or internal 500 response.
const INTERNAL_ERROR_BODY: &str = "Internal server error\n";

/// Errors translated directly into an HTTP response.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request path matched no registered route.
    ///
    /// Rendered in the negotiated format with the uniform not-found
    /// chrome, so the body always contains the offending path.
    #[error("path not found: [{path}]")]
    NotFound {
        /// The path the client requested.
        path: String,
        /// Format negotiated for this request.
        format: ResponseFormat,
        /// Whether HTML chrome is enabled.
        html: bool,
    },

    /// A non-POST request reached the echo endpoint.
    ///
    /// Always plain text, ignoring format negotiation and HTML mode.
    #[error("{method} method not supported (only POST is supported)")]
    MethodNotAllowed {
        /// The unsupported method the client used.
        method: Method,
    },

    /// The fault injector forced this request to fail.
    #[error("forced error")]
    Injected,

    /// The request body could not be read.
    #[error("body read error: {0}")]
    BodyRead(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        match self {
            Self::NotFound { format, html, .. } => render::render(
                format,
                &Payload::error(message),
                Chrome::NOT_FOUND,
                html,
                StatusCode::NOT_FOUND,
            ),
            Self::MethodNotAllowed { .. } => (
                StatusCode::METHOD_NOT_ALLOWED,
                [(header::ALLOW, "POST")],
                format!("{message}\n"),
            )
                .into_response(),
            Self::Injected | Self::BodyRead(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_BODY).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_display_contains_path() {
        let err = ApiError::NotFound {
            path: String::from("/missing"),
            format: ResponseFormat::Text,
            html: false,
        };
        assert_eq!(err.to_string(), "path not found: [/missing]");
    }

    #[test]
    fn method_not_allowed_display_names_method() {
        let err = ApiError::MethodNotAllowed {
            method: Method::GET,
        };
        assert_eq!(
            err.to_string(),
            "GET method not supported (only POST is supported)"
        );
    }

    #[test]
    fn not_found_response_is_404() {
        let err = ApiError::NotFound {
            path: String::from("/missing"),
            format: ResponseFormat::Json,
            html: false,
        };
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn method_not_allowed_response_carries_allow_header() {
        let response = ApiError::MethodNotAllowed {
            method: Method::GET,
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            response
                .headers()
                .get(header::ALLOW)
                .and_then(|v| v.to_str().ok()),
            Some("POST")
        );
    }

    #[test]
    fn injected_response_is_plain_500() {
        let response = ApiError::Injected.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
