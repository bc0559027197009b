//! Last-request-wins tokens for hosts that fetch events asynchronously.
//!
//! The layout core is synchronous and never cancels anything; this is the
//! counter a fetch collaborator holds so a late result from a superseded
//! fetch can be recognised and dropped.

use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies one fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestToken(u64);

#[derive(Debug, Default)]
pub struct RequestSequence {
    latest: AtomicU64,
}

impl RequestSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request, superseding every earlier token.
    pub fn begin(&self) -> RequestToken {
        RequestToken(self.latest.fetch_add(1, Ordering::AcqRel) + 1)
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        self.latest.load(Ordering::Acquire) == token.0
    }

    /// Pass `value` through only if `token` is still the latest request.
    pub fn accept<T>(&self, token: RequestToken, value: T) -> Option<T> {
        if self.is_current(token) {
            Some(value)
        } else {
            log::debug!("discarding result of superseded request {}", token.0);
            None
        }
    }
}
