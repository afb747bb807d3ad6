// src/submission.rs
//! Per-form in-flight flag: one outstanding request per form, extra
//! submissions are rejected rather than queued.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Default, Clone)]
pub struct SubmissionGate {
    in_flight: Arc<AtomicBool>,
}

/// Held for the lifetime of one request; dropping it reopens the gate.
#[derive(Debug)]
pub struct SubmissionGuard {
    in_flight: Arc<AtomicBool>,
}

impl SubmissionGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `None` while another submission from the same form is pending.
    pub fn try_acquire(&self) -> Option<SubmissionGuard> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SubmissionGuard {
                in_flight: Arc::clone(&self.in_flight),
            })
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }
}

impl Drop for SubmissionGuard {
    fn drop(&mut self) {
        self.in_flight.store(false, Ordering::Release);
    }
}

/// One gate per form of the job agent.
#[derive(Debug, Default)]
pub struct FormGates {
    pub analyze_text: SubmissionGate,
    pub analyze_pdf: SubmissionGate,
    pub reanalyze: SubmissionGate,
    pub extract_pdf: SubmissionGate,
    pub upload_cv: SubmissionGate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_submission_rejected_while_pending() {
        let gate = SubmissionGate::new();
        let guard = gate.try_acquire().expect("gate starts open");

        assert!(gate.is_busy());
        assert!(gate.try_acquire().is_none());

        drop(guard);
        assert!(!gate.is_busy());
        assert!(gate.try_acquire().is_some());
    }

    #[test]
    fn test_forms_are_independent() {
        let gates = FormGates::default();
        let _text = gates.analyze_text.try_acquire().unwrap();

        assert!(gates.analyze_pdf.try_acquire().is_some());
        assert!(gates.analyze_text.try_acquire().is_none());
    }

    #[tokio::test]
    async fn test_released_when_task_fails() {
        let gate = SubmissionGate::new();
        let task_gate = gate.clone();

        let handle = tokio::spawn(async move {
            let _guard = task_gate.try_acquire().unwrap();
            Err::<(), &str>("backend unreachable")
        });

        assert!(handle.await.unwrap().is_err());
        assert!(!gate.is_busy());
    }
}
