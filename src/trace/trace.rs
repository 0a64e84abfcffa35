use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::capture::capture_loop::CaptureOutcome;

/// One line of the capture journal: what a single poll cycle decided.
#[derive(Debug, Serialize)]
pub struct CaptureEvent {
    pub timestamp_ms: u128,
    pub cycle: u64,

    pub outcome: String,

    pub fingerprint: Option<String>,
    pub saved_as: Option<String>,
    pub active_app: Option<String>,
    pub error: Option<String>,
}

impl CaptureEvent {
    pub fn now(cycle: u64, outcome: impl ToString) -> Self {
        Self {
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or_default(),
            cycle,
            outcome: outcome.to_string(),
            fingerprint: None,
            saved_as: None,
            active_app: None,
            error: None,
        }
    }

    pub fn from_outcome(cycle: u64, outcome: &CaptureOutcome) -> Self {
        let event = Self::now(cycle, outcome.kind());
        match outcome {
            CaptureOutcome::Saved {
                location,
                fingerprint,
                ..
            } => event
                .with_fingerprint(fingerprint)
                .with_saved_as(location),
            CaptureOutcome::Duplicate { fingerprint } => event.with_fingerprint(fingerprint),
            CaptureOutcome::ForeignApp { current } => event.with_active_app(current),
            CaptureOutcome::Exhausted => event,
        }
    }

    pub fn with_fingerprint(mut self, fingerprint: impl ToString) -> Self {
        self.fingerprint = Some(fingerprint.to_string());
        self
    }

    pub fn with_saved_as(mut self, location: impl ToString) -> Self {
        self.saved_as = Some(location.to_string());
        self
    }

    pub fn with_active_app(mut self, app: impl ToString) -> Self {
        self.active_app = Some(app.to_string());
        self
    }

    pub fn with_error(mut self, error: impl ToString) -> Self {
        self.error = Some(error.to_string());
        self
    }
}
