//! Application state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use reia_client::AnalysisClient;
use reia_core::SnapshotStore;

/// State shared across handlers: the service client, the session snapshot
/// slot, and the single-flight gate for submissions.
#[derive(Clone)]
pub struct AppState {
    pub client: AnalysisClient,
    pub snapshots: Arc<SnapshotStore>,
    in_flight: Arc<AtomicBool>,
}

impl AppState {
    pub fn new(client: AnalysisClient) -> Self {
        Self {
            client,
            snapshots: Arc::new(SnapshotStore::new()),
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Claim the submission slot.
    ///
    /// Returns `None` while an analysis is in flight. The guard releases the
    /// slot on drop, whichever way the request ends. This is the only
    /// duplicate-submit protection; there is no request-identity check and no
    /// cancellation of in-flight work.
    pub fn try_begin_analysis(&self) -> Option<AnalysisGuard> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| AnalysisGuard {
                flag: Arc::clone(&self.in_flight),
            })
    }

    pub fn analysis_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }
}

/// RAII handle for the submission slot.
pub struct AnalysisGuard {
    flag: Arc<AtomicBool>,
}

impl Drop for AnalysisGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_is_single_flight() {
        let state = AppState::new(AnalysisClient::default_client());

        let guard = state.try_begin_analysis();
        assert!(guard.is_some());
        assert!(state.analysis_in_flight());
        assert!(state.try_begin_analysis().is_none());

        drop(guard);
        assert!(!state.analysis_in_flight());
        assert!(state.try_begin_analysis().is_some());
    }
}
