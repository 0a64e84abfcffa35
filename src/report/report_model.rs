use std::collections::BTreeMap;

use tracing::warn;

use crate::locator::candidates::{LocatorCandidate, UniqueKey, candidates, unique_key};
use crate::locator::path_index::TreeIndex;
use crate::screen::classifier::classify;
use crate::screen::screen_model::{Classification, ClassifierConfig};
use crate::tree::tree_model::{Snapshot, UiNode};

// ============================================================================
// Per-element report
// ============================================================================

/// Everything known about one node of one snapshot.
///
/// `path` is `None` when the node could not be resolved against the root;
/// formatters render that as an explicit marker rather than a guess.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementReport {
    pub tag: String,
    pub attributes: BTreeMap<String, String>,
    pub path: Option<String>,
    pub classification: Classification,
    pub candidates: Vec<LocatorCandidate>,
    pub key: UniqueKey,
}

impl ElementReport {
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    pub fn is_interactive(&self) -> bool {
        self.classification.is_interactive()
    }
}

fn element_report(node: &UiNode, index: &TreeIndex<'_>, config: &ClassifierConfig) -> ElementReport {
    let path = match index.absolute_path(node) {
        Ok(path) => Some(path),
        Err(e) => {
            warn!("{}", e);
            None
        }
    };

    ElementReport {
        tag: node.tag.clone(),
        attributes: node.attributes.clone(),
        path,
        classification: classify(node, config),
        candidates: candidates(node),
        key: unique_key(node),
    }
}

// ============================================================================
// Per-snapshot report
// ============================================================================

#[derive(Debug, Clone)]
pub struct SnapshotReport {
    pub source: String,

    /// One entry per node, in document order
    pub elements: Vec<ElementReport>,
}

impl SnapshotReport {
    pub fn interactive(&self) -> impl Iterator<Item = &ElementReport> {
        self.elements.iter().filter(|e| e.is_interactive())
    }

    pub fn interactive_count(&self) -> usize {
        self.interactive().count()
    }
}

/// Index, classify and generate candidates for every node of `snapshot`.
///
/// The parent index is built once and shared by all path lookups.
pub fn build_snapshot_report(snapshot: &Snapshot, config: &ClassifierConfig) -> SnapshotReport {
    let index = TreeIndex::build(&snapshot.root);

    let elements = snapshot
        .root
        .descendants()
        .map(|node| element_report(node, &index, config))
        .collect();

    SnapshotReport {
        source: snapshot.source.clone(),
        elements,
    }
}
