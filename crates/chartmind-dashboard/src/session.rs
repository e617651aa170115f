use std::sync::{Mutex, PoisonError};

/// The signal the user can currently give feedback on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentSignal {
    pub id: String,
    pub market: String,
    pub pair: String,
}

/// Identifies one analyze request. Only the most recently issued token may
/// commit its response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestToken(u64);

#[derive(Debug, Default)]
struct SessionState {
    latest: u64,
    current: Option<CurrentSignal>,
}

/// Client-side state shared between the dashboard's handlers.
///
/// The current signal is created by the first committed analysis and replaced
/// by every later one. Responses carrying a superseded token are refused.
#[derive(Debug, Default)]
pub struct Session {
    state: Mutex<SessionState>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Issue a token for a new analyze request, superseding all earlier ones.
    pub fn begin_request(&self) -> RequestToken {
        let mut state = self.lock();
        state.latest += 1;
        RequestToken(state.latest)
    }

    /// Commit an analysis result if `token` is still the latest.
    ///
    /// `render` runs under the session lock so that a concurrent commit
    /// cannot interleave its view updates with this one. Returns `false`
    /// (and runs nothing) for a stale token.
    pub fn commit<F>(&self, token: RequestToken, signal: Option<CurrentSignal>, render: F) -> bool
    where
        F: FnOnce(),
    {
        let mut state = self.lock();
        if state.latest != token.0 {
            return false;
        }
        state.current = signal;
        render();
        true
    }

    pub fn current(&self) -> Option<CurrentSignal> {
        self.lock().current.clone()
    }
}
