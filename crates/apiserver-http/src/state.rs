//! Shared application state for the apiserver.
//!
//! [`AppState`] holds the two process-wide values that outlive a single
//! request: the HTML mode flag and the fault injector. Both are fixed
//! at startup; only the injector's internal counter mutates afterwards.
//!
//! The state is wrapped in [`Arc`](std::sync::Arc) and injected via
//! Axum's `State` extractor rather than living in globals, so tests can
//! run many independently configured server instances in one process.

use std::num::NonZeroU32;

use crate::fault::FaultInjector;

/// Shared state for the Axum application.
#[derive(Debug)]
pub struct AppState {
    /// Whether text responses are wrapped in HTML document chrome.
    ///
    /// Never affects the JSON rendering path.
    pub html: bool,

    /// Deterministic forced-failure source shared by all handlers.
    pub faults: FaultInjector,
}

impl AppState {
    /// Create state with the given HTML mode and error-injection rate.
    pub const fn new(html: bool, error_rate: Option<NonZeroU32>) -> Self {
        Self {
            html,
            faults: FaultInjector::new(error_rate),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(false, None)
    }
}
