use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HarvestError {
    /// Markup could not be parsed into a single well-formed tree
    #[error("Malformed markup: {0}")]
    MalformedMarkup(String),

    /// Node is not reachable from the root it was looked up against
    #[error("Node <{tag}> is not reachable from the snapshot root")]
    DetachedNode { tag: String },

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The snapshot source could not answer right now (skip and retry)
    #[error("Snapshot source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("Recording line {line} is not a valid frame: {source}")]
    Recording {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

impl HarvestError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        HarvestError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, HarvestError>;
