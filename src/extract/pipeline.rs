use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::{HarvestError, Result};
use crate::report::catalog::MasterCatalog;
use crate::report::report_model::{SnapshotReport, build_snapshot_report};
use crate::report::text::{format_master_catalog, format_snapshot_report};
use crate::screen::screen_model::ClassifierConfig;
use crate::tree::tree_model::Snapshot;

// ============================================================================
// In-memory core
// ============================================================================

/// Accumulated state of one extraction run: the classifier configuration and
/// the master catalog every snapshot is folded into.
#[derive(Debug, Default)]
pub struct ExtractionRun {
    config: ClassifierConfig,
    catalog: MasterCatalog,
}

impl ExtractionRun {
    pub fn new(config: ClassifierConfig) -> Self {
        Self {
            config,
            catalog: MasterCatalog::new(),
        }
    }

    /// Build the snapshot's report and merge its unique Interactive
    /// elements into the catalog.
    pub fn process(&mut self, snapshot: &Snapshot) -> SnapshotReport {
        let report = build_snapshot_report(snapshot, &self.config);
        let added = self.catalog.absorb(&report);
        info!(
            "{}: {} elements, {} interactive, {} new in catalog",
            snapshot.source,
            report.elements.len(),
            report.interactive_count(),
            added
        );
        report
    }

    pub fn catalog(&self) -> &MasterCatalog {
        &self.catalog
    }

    pub fn into_catalog(self) -> MasterCatalog {
        self.catalog
    }
}

// ============================================================================
// Directory driver
// ============================================================================

#[derive(Debug, Clone)]
pub struct ExtractOptions {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Input extension, matched case-insensitively, without the dot
    pub extension: String,
    /// Appended to an input's base name to name its report
    pub report_suffix: String,
    pub master_file: String,
    pub classifier: ClassifierConfig,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("Input"),
            output_dir: PathBuf::from("Output"),
            extension: "xml".to_string(),
            report_suffix: "_output.txt".to_string(),
            master_file: "master_interactive.txt".to_string(),
            classifier: ClassifierConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ExtractionSummary {
    /// Report files written, in processing order
    pub reports: Vec<PathBuf>,
    /// Input files that could not be read or parsed, with the reason
    pub failed: Vec<(PathBuf, String)>,
    pub catalog_entries: usize,
    pub master_path: PathBuf,
}

/// Process every matching file of `options.input_dir` in file-name order.
///
/// A file that cannot be read or parsed is reported and skipped. The master
/// catalog is written once, after all inputs.
pub fn extract_directory(options: &ExtractOptions) -> Result<ExtractionSummary> {
    let inputs = list_inputs(&options.input_dir, &options.extension)?;
    std::fs::create_dir_all(&options.output_dir)
        .map_err(|e| HarvestError::io(&options.output_dir, e))?;

    let mut run = ExtractionRun::new(options.classifier.clone());
    let mut summary = ExtractionSummary::default();

    for input in inputs {
        let file_name = display_name(&input);
        let output_path = options
            .output_dir
            .join(format!("{}{}", base_name(&input), options.report_suffix));

        info!("Processing {} -> {}", input.display(), output_path.display());

        let snapshot = match load_snapshot(&input, &file_name) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!("Error parsing {}: {}", input.display(), e);
                summary.failed.push((input, e.to_string()));
                continue;
            }
        };

        let report = run.process(&snapshot);
        std::fs::write(&output_path, format_snapshot_report(&report))
            .map_err(|e| HarvestError::io(&output_path, e))?;
        summary.reports.push(output_path);
    }

    let master_path = options.output_dir.join(&options.master_file);
    std::fs::write(&master_path, format_master_catalog(run.catalog()))
        .map_err(|e| HarvestError::io(&master_path, e))?;
    info!("Master interactive file created at: {}", master_path.display());

    summary.catalog_entries = run.catalog().len();
    summary.master_path = master_path;
    Ok(summary)
}

fn list_inputs(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let wanted = extension.trim_start_matches('.');
    let mut inputs = Vec::new();

    for entry in std::fs::read_dir(dir).map_err(|e| HarvestError::io(dir, e))? {
        let path = entry.map_err(|e| HarvestError::io(dir, e))?.path();
        let matches = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(wanted));
        if matches && path.is_file() {
            inputs.push(path);
        }
    }

    // Sort by name for deterministic catalog order
    inputs.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(inputs)
}

fn load_snapshot(path: &Path, name: &str) -> Result<Snapshot> {
    let markup = std::fs::read_to_string(path).map_err(|e| HarvestError::io(path, e))?;
    Snapshot::parse(name, &markup)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn base_name(path: &Path) -> String {
    path.file_stem()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
