use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Allows at most one outstanding reservation submission.
///
/// The submit control is disabled while a [`SubmissionTicket`] is alive and
/// re-enabled when it is dropped, whatever the outcome of the request.
/// Repeated submissions are rejected, never queued.
#[derive(Debug, Clone, Default)]
pub struct SubmissionGate {
    in_flight: Arc<AtomicBool>,
}

impl SubmissionGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_begin(&self) -> Option<SubmissionTicket> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SubmissionTicket {
                in_flight: Arc::clone(&self.in_flight),
            })
    }

    /// Whether the submit control is currently disabled
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }
}

#[derive(Debug)]
pub struct SubmissionTicket {
    in_flight: Arc<AtomicBool>,
}

impl Drop for SubmissionTicket {
    fn drop(&mut self) {
        self.in_flight.store(false, Ordering::Release);
    }
}
