use std::path::{Path, PathBuf};

use crate::error::{HarvestError, Result};

/// Destination for novel page sources.
pub trait SnapshotSink {
    /// Persist the raw markup under sequence number `seq` and return where
    /// it went.
    fn save(&mut self, seq: u64, markup: &str) -> Result<String>;
}

/// Writes `<dir>/<prefix><seq>.<extension>`, e.g. `page_3.xml`.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
    prefix: String,
    extension: String,
}

impl DirectorySink {
    pub fn create(dir: impl Into<PathBuf>, prefix: &str, extension: &str) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|e| HarvestError::io(&dir, e))?;
        Ok(Self {
            dir,
            prefix: prefix.to_string(),
            extension: extension.trim_start_matches('.').to_string(),
        })
    }

    pub fn path_for(&self, seq: u64) -> PathBuf {
        self.dir
            .join(format!("{}{}.{}", self.prefix, seq, self.extension))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl SnapshotSink for DirectorySink {
    fn save(&mut self, seq: u64, markup: &str) -> Result<String> {
        let path = self.path_for(seq);
        std::fs::write(&path, markup).map_err(|e| HarvestError::io(&path, e))?;
        Ok(path.display().to_string())
    }
}

/// Keeps saved snapshots in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub saved: Vec<(u64, String)>,
}

impl SnapshotSink for MemorySink {
    fn save(&mut self, seq: u64, markup: &str) -> Result<String> {
        self.saved.push((seq, markup.to_string()));
        Ok(format!("memory:{}", seq))
    }
}
