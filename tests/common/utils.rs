#![allow(dead_code)]

use std::collections::VecDeque;
use std::path::PathBuf;

use locator_harvest::capture::source::SnapshotSource;
use locator_harvest::error::{HarvestError, Result};
use locator_harvest::tree::tree_model::Snapshot;

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn fixture(name: &str) -> String {
    std::fs::read_to_string(fixture_path(name)).unwrap()
}

pub fn snapshot(name: &str) -> Snapshot {
    Snapshot::parse(name, &fixture(name)).unwrap()
}

/// One scripted poll result.
pub enum Step {
    Frame { app: &'static str, markup: String },
    Unavailable,
}

/// Test double for a live driver: replays scripted steps and counts
/// `release` calls.
pub struct ScriptedSource {
    steps: VecDeque<Step>,
    pending: Option<String>,
    pub released: usize,
}

impl ScriptedSource {
    pub fn new(steps: Vec<Step>) -> Self {
        Self {
            steps: steps.into(),
            pending: None,
            released: 0,
        }
    }

    pub fn frames(app: &'static str, markups: &[&str]) -> Self {
        Self::new(
            markups
                .iter()
                .map(|m| Step::Frame {
                    app,
                    markup: m.to_string(),
                })
                .collect(),
        )
    }
}

impl SnapshotSource for ScriptedSource {
    fn active_app_identifier(&mut self) -> Result<Option<String>> {
        match self.steps.pop_front() {
            None => Ok(None),
            Some(Step::Unavailable) => Err(HarvestError::SourceUnavailable(
                "driver not responding".into(),
            )),
            Some(Step::Frame { app, markup }) => {
                self.pending = Some(markup);
                Ok(Some(app.to_string()))
            }
        }
    }

    fn snapshot_markup(&mut self) -> Result<String> {
        self.pending
            .take()
            .ok_or_else(|| HarvestError::SourceUnavailable("no frame".into()))
    }

    fn release(&mut self) -> Result<()> {
        self.released += 1;
        Ok(())
    }
}
