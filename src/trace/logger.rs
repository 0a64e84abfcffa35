use std::{fs::OpenOptions, io::Write, sync::Mutex};

use tracing::warn;

use crate::trace::trace::CaptureEvent;

/// Append-only JSONL journal of capture cycles.
///
/// Journal problems never stop a capture run; they are reported through
/// `tracing` and the event is dropped.
pub struct CaptureJournal {
    file: Option<Mutex<std::fs::File>>,
}

impl CaptureJournal {
    pub fn new(path: &str) -> Self {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path);

        match file {
            Ok(f) => Self {
                file: Some(Mutex::new(f)),
            },
            Err(e) => {
                warn!("Could not open capture journal '{}': {}", path, e);
                Self { file: None }
            }
        }
    }

    /// A journal that records nothing.
    pub fn disabled() -> Self {
        Self { file: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.file.is_some()
    }

    pub fn log(&self, event: &CaptureEvent) {
        let file_mutex = match &self.file {
            Some(f) => f,
            None => return,
        };

        let json = match serde_json::to_string(event) {
            Ok(j) => j,
            Err(e) => {
                warn!("Failed to serialize capture event: {}", e);
                return;
            }
        };

        let mut file = match file_mutex.lock() {
            Ok(f) => f,
            Err(e) => {
                warn!("Capture journal lock poisoned: {}", e);
                return;
            }
        };

        if let Err(e) = writeln!(file, "{}", json) {
            warn!("Failed to write capture event: {}", e);
        }
    }
}
