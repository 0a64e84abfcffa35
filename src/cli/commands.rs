use std::path::Path;

use tracing::info;

use crate::capture::capture_loop::CaptureSession;
use crate::capture::sink::DirectorySink;
use crate::capture::source::RecordingSource;
use crate::capture::stop::StopFlag;
use crate::cli::config::CaptureSettings;
use crate::extract::pipeline::{ExtractOptions, extract_directory};
use crate::trace::logger::CaptureJournal;

// ============================================================================
// capture subcommand
// ============================================================================

pub fn cmd_capture(
    recording: &str,
    settings: &CaptureSettings,
    stop: &StopFlag,
) -> Result<(), Box<dyn std::error::Error>> {
    let target_app = settings
        .target_app
        .as_deref()
        .ok_or("No target app: pass --target-app or set capture.target_app in the config")?;

    let mut source = RecordingSource::open(Path::new(recording))?;
    let mut sink = DirectorySink::create(
        &settings.output_dir,
        &settings.file_prefix,
        &settings.extension,
    )?;

    let journal = match settings.journal.as_deref() {
        Some(path) => CaptureJournal::new(path),
        None => CaptureJournal::disabled(),
    };

    let mut session =
        CaptureSession::new(target_app, settings.poll_interval).with_journal(journal);
    let summary = session.run(&mut source, &mut sink, stop)?;

    println!(
        "Saved {} new page sources to {} ({} duplicates, {} foreign-app cycles)",
        summary.saved,
        sink.dir().display(),
        summary.duplicates,
        summary.foreign_app
    );

    Ok(())
}

// ============================================================================
// extract subcommand
// ============================================================================

pub fn cmd_extract(options: &ExtractOptions) -> Result<(), Box<dyn std::error::Error>> {
    info!(
        "Extracting locators from {} into {}",
        options.input_dir.display(),
        options.output_dir.display()
    );

    let summary = extract_directory(options)?;

    println!(
        "Wrote {} reports, {} unique interactive elements in {}",
        summary.reports.len(),
        summary.catalog_entries,
        summary.master_path.display()
    );

    if !summary.failed.is_empty() {
        println!("Skipped {} files:", summary.failed.len());
        for (path, reason) in &summary.failed {
            println!("  - {}: {}", path.display(), reason);
        }
    }

    println!("Extraction complete.");
    Ok(())
}
