use std::collections::VecDeque;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{HarvestError, Result};

/// Where page sources come from: a live automation driver, a replayed
/// recording, or a scripted fake in tests.
pub trait SnapshotSource {
    /// Identifier of the foreground app for the next cycle.
    /// `Ok(None)` means the source has nothing more to offer.
    fn active_app_identifier(&mut self) -> Result<Option<String>>;

    /// Raw serialized UI tree of the current screen.
    fn snapshot_markup(&mut self) -> Result<String>;

    /// Release whatever session the source holds. Called exactly once when a
    /// capture run ends, however it ends.
    fn release(&mut self) -> Result<()> {
        Ok(())
    }
}

/// One recorded poll: the foreground app and the page source at that moment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedFrame {
    pub app: String,
    pub source: String,
}

/// Replays a JSONL recording, one `RecordedFrame` per line.
#[derive(Debug)]
pub struct RecordingSource {
    frames: VecDeque<RecordedFrame>,
    current: Option<RecordedFrame>,
}

impl RecordingSource {
    pub fn from_frames(frames: impl IntoIterator<Item = RecordedFrame>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
            current: None,
        }
    }

    /// Parse a recording. Blank lines are skipped; any other line that is not
    /// a frame fails with its 1-based line number.
    pub fn from_jsonl(content: &str) -> Result<Self> {
        let mut frames = Vec::new();

        for (i, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let frame: RecordedFrame = serde_json::from_str(line)
                .map_err(|source| HarvestError::Recording { line: i + 1, source })?;
            frames.push(frame);
        }

        Ok(Self::from_frames(frames))
    }

    pub fn open(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| HarvestError::io(path, e))?;
        let source = Self::from_jsonl(&content)?;
        debug!("Loaded {} frames from {}", source.remaining(), path.display());
        Ok(source)
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl SnapshotSource for RecordingSource {
    fn active_app_identifier(&mut self) -> Result<Option<String>> {
        self.current = self.frames.pop_front();
        Ok(self.current.as_ref().map(|f| f.app.clone()))
    }

    fn snapshot_markup(&mut self) -> Result<String> {
        self.current
            .take()
            .map(|f| f.source)
            .ok_or_else(|| HarvestError::SourceUnavailable("no frame selected".into()))
    }
}
