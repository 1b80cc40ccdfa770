//! Content negotiation between JSON and text responses.
//!
//! The negotiated format is derived once per request from the `Accept`
//! header collection: if any value equals exactly `application/json`
//! the response is JSON, otherwise it is text (optionally wrapped in
//! HTML chrome by the renderer).
//!
//! The comparison is deliberately a whole-value string equality, not a
//! media-type parse: `application/json; charset=utf-8` or a combined
//! `text/html, application/json` line do not select JSON. Clients of
//! this demo server send the bare value.

use axum::http::{HeaderMap, header};
use tracing::debug;

/// The response encoding chosen for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    /// Serialize the payload to a JSON object.
    Json,
    /// Emit plain text lines, with HTML chrome when HTML mode is on.
    Text,
}

impl ResponseFormat {
    /// Whether the JSON encoding was negotiated.
    pub const fn is_json(self) -> bool {
        matches!(self, Self::Json)
    }
}

/// Derive the response format from a request's header collection.
///
/// Scans every value under `Accept` (ordered, case-normalized name
/// lookup) and returns [`ResponseFormat::Json`] if any equals exactly
/// `application/json`. An absent header, or values that are not valid
/// ASCII, yield [`ResponseFormat::Text`]. Each scanned value is
/// debug-logged.
pub fn negotiate(headers: &HeaderMap) -> ResponseFormat {
    let mut format = ResponseFormat::Text;

    for value in headers.get_all(header::ACCEPT).iter() {
        if let Ok(value) = value.to_str() {
            debug!(accept = value, "scanned Accept value");
            if value == "application/json" {
                format = ResponseFormat::Json;
            }
        }
    }

    format
}
