//! Configuration for the apiserver binary.
//!
//! All configuration is read from environment variables at startup and
//! none of it is required: every variable has a usable default, and a
//! malformed error rate only disables injection instead of failing boot.

use std::num::NonZeroU32;

use tracing::warn;

/// Listen address used when `LISTEN` is unset or empty.
const DEFAULT_LISTEN: &str = ":3000";

/// Complete apiserver configuration loaded from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address to bind, either `host:port` or the `:port` shorthand.
    pub listen: String,
    /// Whether text responses get HTML document chrome.
    pub html: bool,
    /// Forced-failure cadence; `None` disables injection.
    pub error_rate: Option<NonZeroU32>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `LISTEN` -- bind address (default `:3000`)
    /// - `HTML` -- any non-empty value enables HTML chrome
    /// - `ERROR` -- integer injection rate; every `ERROR`-th eligible
    ///   request is forced to fail. Non-numeric values log a warning and
    ///   leave injection disabled, as do values below 1.
    pub fn from_env() -> Self {
        let mut listen = std::env::var("LISTEN").unwrap_or_default();
        if listen.is_empty() {
            listen = String::from(DEFAULT_LISTEN);
        }

        let html = std::env::var("HTML").is_ok_and(|value| !value.is_empty());

        let error_rate = std::env::var("ERROR")
            .ok()
            .and_then(|raw| parse_error_rate(&raw));

        Self {
            listen,
            html,
            error_rate,
        }
    }
}

/// Parse the `ERROR` rate, warning on garbage and clamping huge values.
fn parse_error_rate(raw: &str) -> Option<NonZeroU32> {
    match raw.parse::<i128>() {
        Ok(value) if value >= 1 => {
            let rate = u32::try_from(value).unwrap_or(u32::MAX);
            NonZeroU32::new(rate)
        }
        Ok(_) => None,
        Err(err) => {
            warn!(error_rate = raw, error = %err, "bad error rate, injection disabled");
            None
        }
    }
}
