//! Deterministic error injection for client-resilience testing.
//!
//! A [`FaultInjector`] carries a rate `N` fixed at construction and a
//! shared counter. Every `N`-th eligible request is forced to fail with
//! a 500 response before any handler logic runs. Handlers consult the
//! injector on their success path only; 404 and 405 responses never
//! advance the counter.
//!
//! The counter is a single process-wide value per injector, shared by
//! every in-flight request through [`AppState`](crate::state::AppState).
//! Updates use [`AtomicU64::fetch_update`] so each eligible request
//! advances the counter exactly once and the modulo cadence holds under
//! concurrency.

use std::num::NonZeroU32;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

/// Shared deterministic failure source.
///
/// Owned by the server state rather than a global so several server
/// instances can coexist in one process (the integration tests build
/// one per case).
#[derive(Debug)]
pub struct FaultInjector {
    /// Forced-failure rate; `None` disables injection entirely.
    rate: Option<NonZeroU32>,

    /// Eligible-request counter, always in `[0, rate)`.
    counter: AtomicU64,
}

impl FaultInjector {
    /// Create an injector that fails every `rate`-th eligible request.
    pub const fn new(rate: Option<NonZeroU32>) -> Self {
        Self {
            rate,
            counter: AtomicU64::new(0),
        }
    }

    /// Create an injector that never fires.
    pub const fn disabled() -> Self {
        Self::new(None)
    }

    /// The configured rate, or 0 when injection is disabled.
    pub const fn rate(&self) -> u32 {
        match self.rate {
            Some(rate) => rate.get(),
            None => 0,
        }
    }

    /// Advance the counter and report whether this request must fail.
    ///
    /// Called once per eligible request. With rate `N`, returns `true`
    /// on exactly the `N`-th, `2N`-th, ... call; with rate 1 every call
    /// fails. When disabled, returns `false` without touching the
    /// counter.
    pub fn should_fail(&self) -> bool {
        let Some(rate) = self.rate else {
            return false;
        };
        let rate = u64::from(rate.get());

        let Ok(previous) = self
            .counter
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |count| {
                Some(step(count, rate))
            })
        else {
            // The closure above never returns None.
            return false;
        };
        let count = step(previous, rate);

        debug!(rate, count, "fault injector advanced");

        count == 0
    }
}

/// One counter step: increment modulo `rate`.
const fn step(count: u64, rate: u64) -> u64 {
    match count.wrapping_add(1).checked_rem(rate) {
        Some(next) => next,
        // rate comes from a NonZeroU32.
        None => 0,
    }
}
