use std::collections::HashSet;

use crate::locator::candidates::UniqueKey;
use crate::report::report_model::{ElementReport, SnapshotReport};

/// Unique Interactive elements across every snapshot of an extraction run,
/// in first-seen order.
#[derive(Debug, Default)]
pub struct MasterCatalog {
    seen: HashSet<UniqueKey>,
    entries: Vec<ElementReport>,
}

impl MasterCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `element` if it is Interactive and its key is new.
    /// Repeats and Non-Interactive elements are skipped.
    pub fn insert(&mut self, element: &ElementReport) -> bool {
        if !element.is_interactive() || self.seen.contains(&element.key) {
            return false;
        }

        self.seen.insert(element.key.clone());
        self.entries.push(element.clone());
        true
    }

    /// Fold a snapshot's Interactive elements in. Returns how many were new.
    pub fn absorb(&mut self, report: &SnapshotReport) -> usize {
        report
            .interactive()
            .filter(|element| self.insert(element))
            .count()
    }

    pub fn entries(&self) -> &[ElementReport] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
