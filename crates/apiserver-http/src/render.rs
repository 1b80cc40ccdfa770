//! Response rendering: logical payloads to wire bytes.
//!
//! A handler produces a [`Payload`] (the logical content) and a
//! [`Chrome`] (the endpoint's page title and heading); the renderer
//! turns them into the final response for the negotiated format.
//!
//! JSON responses are a compact object followed by a trailing newline.
//! Text responses are three lines (title, heading, content); when HTML
//! mode is on they are wrapped in a fixed document shell and the
//! heading gains an `<h2>` tag. The templates are pure functions of
//! their inputs, so rendering depends on the HTML mode flag only
//! through an explicit parameter.
//!
//! Title and heading strings carry their own trailing newline: the
//! newline lands inside the `<title>`/`<h2>` element in HTML mode and
//! terminates the plain line otherwise.

use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::error;

use crate::negotiate::ResponseFormat;

/// Opening shell up to the title text.
const HEADER_TITLE_BEFORE: &str = "<!DOCTYPE html>\n<html>\n  <head>\n    <title>";

/// Shell between the title text and the page body.
const HEADER_TITLE_AFTER: &str = "</title>\n  </head>\n  <body>\n";

/// Closing shell.
const FOOTER: &str = "</body>\n</html>\n";

/// The hello endpoint's fixed message.
const HELLO_MESSAGE: &str = "hello world";

/// The hello endpoint's fixed age field.
const HELLO_AGE: u32 = 17;

/// Logical response content, independent of the negotiated format.
///
/// Serializes untagged: `Hello` becomes `{"message":...,"age":...}`,
/// the other variants `{"message":...}`.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Payload {
    /// The hello endpoint's greeting.
    Hello {
        /// Fixed greeting text.
        message: String,
        /// Fixed demo field.
        age: u32,
    },
    /// An error-shaped message (also used by the root endpoint).
    Error {
        /// Human-readable description.
        message: String,
    },
    /// An echo of the request body.
    Echo {
        /// The echoed text.
        message: String,
    },
}

impl Payload {
    /// The fixed hello payload.
    pub fn hello() -> Self {
        Self::Hello {
            message: String::from(HELLO_MESSAGE),
            age: HELLO_AGE,
        }
    }

    /// An error-shaped payload with the given message.
    pub const fn error(message: String) -> Self {
        Self::Error { message }
    }

    /// An echo payload carrying the request body text.
    pub const fn echo(message: String) -> Self {
        Self::Echo { message }
    }

    /// The content line rendered on the text path.
    pub fn content(&self) -> &str {
        match self {
            Self::Hello { message, .. } | Self::Error { message } | Self::Echo { message } => {
                message.as_str()
            }
        }
    }
}

/// Fixed page title and heading for one endpoint.
///
/// Both strings include their trailing newline.
#[derive(Debug, Clone, Copy)]
pub struct Chrome {
    /// Text inside `<title>` (HTML mode) or the first plain line.
    pub title: &'static str,
    /// Text inside `<h2>` (HTML mode) or the second plain line.
    pub heading: &'static str,
}

impl Chrome {
    /// Chrome for the root endpoint.
    pub const ROOT: Self = Self {
        title: "api root\n",
        heading: "root handler\n",
    };

    /// Chrome for the hello endpoint.
    pub const HELLO: Self = Self {
        title: "api hello\n",
        heading: "hello handler\n",
    };

    /// Chrome for the echo endpoint.
    pub const ECHO: Self = Self {
        title: "api echo\n",
        heading: "echo handler\n",
    };

    /// Uniform chrome for every not-found response.
    pub const NOT_FOUND: Self = Self {
        title: "api - not found\n",
        heading: "path not found\n",
    };
}

/// Render a payload in the negotiated format.
///
/// `html` selects HTML chrome on the text path and is ignored for
/// JSON. A serialization failure (not reachable for these fixed
/// shapes) is logged and yields the status with an empty body, so no
/// partial output is ever written.
pub fn render(
    format: ResponseFormat,
    payload: &Payload,
    chrome: Chrome,
    html: bool,
    status: StatusCode,
) -> Response {
    match format {
        ResponseFormat::Json => match json_body(payload) {
            Ok(body) => (
                status,
                [(header::CONTENT_TYPE, "application/json")],
                body,
            )
                .into_response(),
            Err(e) => {
                error!(error = %e, "payload serialization failed, aborting response");
                status.into_response()
            }
        },
        ResponseFormat::Text => {
            let content_type = if html {
                "text/html; charset=utf-8"
            } else {
                "text/plain; charset=utf-8"
            };
            (
                status,
                [(header::CONTENT_TYPE, content_type)],
                page(chrome, payload.content(), html),
            )
                .into_response()
        }
    }
}

/// Compact JSON object plus trailing newline.
fn json_body(payload: &Payload) -> Result<String, serde_json::Error> {
    let mut body = serde_json::to_string(payload)?;
    body.push('\n');
    Ok(body)
}

/// Full text body for a page: title, heading, content line.
fn page(chrome: Chrome, content: &str, html: bool) -> String {
    let mut body = String::new();
    if html {
        body.push_str(&html_header(chrome.title));
        body.push_str(&tag("h2", chrome.heading));
    } else {
        body.push_str(chrome.title);
        body.push_str(chrome.heading);
    }
    body.push_str(content);
    body.push('\n');
    if html {
        body.push_str(FOOTER);
    }
    body
}

/// Document shell up to and including the opening body tag.
fn html_header(title: &str) -> String {
    format!("{HEADER_TITLE_BEFORE}{title}{HEADER_TITLE_AFTER}")
}

/// Wrap text in a simple element.
fn tag(name: &str, text: &str) -> String {
    format!("<{name}>{text}</{name}>")
}
