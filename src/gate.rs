//! Single-flight request gating.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use tracing::debug;

use crate::client::SearchBackend;
use crate::result::SearchResponse;
use crate::{Result, SearchError};

/// Lifecycle of the one real request a mounted search view performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum RequestState {
    /// No request has been attempted yet.
    Idle = 0,
    /// The request is on the wire.
    InFlight = 1,
    /// The request completed; no further request will be issued.
    Succeeded = 2,
    /// The request failed; a manual retry is not blocked.
    Failed = 3,
}

impl RequestState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Idle,
            1 => Self::InFlight,
            2 => Self::Succeeded,
            _ => Self::Failed,
        }
    }
}

/// Wraps a search backend with single-flight semantics.
///
/// `execute` may be invoked any number of times; reactive re-evaluation of
/// the surrounding view tends to do exactly that. The underlying network
/// call fires at most once for the lifetime of the gate: a call observing
/// an in-flight or succeeded gate is a no-op, and a successful response
/// latches the gate permanently. A failure returns the gate to a retryable
/// state so a deliberate retry path is not blocked, but the gate never
/// retries on its own.
pub struct RequestGate {
    backend: Arc<dyn SearchBackend>,
    state: AtomicU8,
}

impl RequestGate {
    /// Creates a gate over the given backend.
    pub fn new(backend: Arc<dyn SearchBackend>) -> Self {
        Self {
            backend,
            state: AtomicU8::new(RequestState::Idle as u8),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> RequestState {
        RequestState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Executes the search, at most once.
    ///
    /// Returns `Ok(Some(response))` for the invocation that performed the
    /// network call, `Ok(None)` for invocations suppressed by the guard.
    /// An empty token fails with [`SearchError::MissingToken`] before the
    /// guard is consulted and without any network activity.
    pub async fn execute(&self, query: &str, token: &str) -> Result<Option<SearchResponse>> {
        if token.is_empty() {
            return Err(SearchError::MissingToken);
        }

        // Claim the in-flight slot. Anything already in flight or
        // succeeded collapses this invocation into a no-op.
        let mut current = self.state.load(Ordering::Acquire);
        loop {
            let state = RequestState::from_u8(current);
            if state == RequestState::InFlight || state == RequestState::Succeeded {
                debug!(?state, "suppressing duplicate search request");
                return Ok(None);
            }
            match self.state.compare_exchange(
                current,
                RequestState::InFlight as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => break,
                Err(observed) => current = observed,
            }
        }

        match self.backend.search(query, token).await {
            Ok(response) => {
                self.state
                    .store(RequestState::Succeeded as u8, Ordering::Release);
                Ok(Some(response))
            }
            Err(e) => {
                self.state
                    .store(RequestState::Failed as u8, Ordering::Release);
                Err(e)
            }
        }
    }
}
