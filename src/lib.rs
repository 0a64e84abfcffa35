use crate::{
    canonical::fingerprint::{Fingerprint, fingerprint},
    report::report_model::{SnapshotReport, build_snapshot_report},
    screen::screen_model::ClassifierConfig,
    tree::tree_model::Snapshot,
};

pub mod canonical;
pub mod capture;
pub mod cli;
pub mod error;
pub mod extract;
pub mod locator;
pub mod report;
pub mod screen;
pub mod trace;
pub mod tree;

pub use error::{HarvestError, Result};

/// Parse one page source and run both views over it: its dedup fingerprint
/// and its per-element locator report.
pub fn analyze_markup(
    source: &str,
    markup: &str,
    config: &ClassifierConfig,
) -> Result<(Fingerprint, SnapshotReport)> {
    let snapshot = Snapshot::parse(source, markup)?;
    Ok((fingerprint(&snapshot), build_snapshot_report(&snapshot, config)))
}
