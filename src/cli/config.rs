use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::extract::pipeline::ExtractOptions;
use crate::screen::screen_model::ClassifierConfig;

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "locator-harvest",
    version,
    about = "Deduplicate mobile page sources and extract element locators"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: locator-harvest.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay a recorded page-source stream and save each new screen once
    Capture {
        /// JSONL recording, one {"app": ..., "source": ...} frame per line
        #[arg(long)]
        recording: String,

        /// Bundle identifier of the app to track
        #[arg(long)]
        target_app: Option<String>,

        /// Directory for page_<n>.xml files
        #[arg(short, long)]
        output_dir: Option<String>,

        /// Delay between poll cycles in milliseconds
        #[arg(long)]
        poll_interval_ms: Option<u64>,

        /// Append one JSON line per cycle to this file
        #[arg(long)]
        journal: Option<String>,
    },

    /// Extract locators from a directory of page sources
    Extract {
        /// Directory of page source files
        #[arg(short, long)]
        input_dir: Option<String>,

        /// Directory for per-file reports and the master catalog
        #[arg(short, long)]
        output_dir: Option<String>,

        /// Input file extension (case-insensitive)
        #[arg(long)]
        extension: Option<String>,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `locator-harvest.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub capture: CaptureConfig,
    #[serde(default)]
    pub extract: ExtractConfig,
    #[serde(default)]
    pub classifier: ClassifierConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    pub target_app: Option<String>,

    #[serde(default = "default_dot")]
    pub output_dir: String,

    #[serde(default = "default_page_prefix")]
    pub file_prefix: String,

    #[serde(default = "default_xml")]
    pub extension: String,

    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    pub journal: Option<String>,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            target_app: None,
            output_dir: ".".to_string(),
            file_prefix: "page_".to_string(),
            extension: "xml".to_string(),
            poll_interval_ms: 2000,
            journal: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractConfig {
    #[serde(default = "default_input")]
    pub input_dir: String,

    #[serde(default = "default_output")]
    pub output_dir: String,

    #[serde(default = "default_xml")]
    pub extension: String,

    #[serde(default = "default_report_suffix")]
    pub report_suffix: String,

    #[serde(default = "default_master_file")]
    pub master_file: String,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            input_dir: "Input".to_string(),
            output_dir: "Output".to_string(),
            extension: "xml".to_string(),
            report_suffix: "_output.txt".to_string(),
            master_file: "master_interactive.txt".to_string(),
        }
    }
}

// Serde default helpers
fn default_dot() -> String { ".".to_string() }
fn default_page_prefix() -> String { "page_".to_string() }
fn default_xml() -> String { "xml".to_string() }
fn default_poll_interval_ms() -> u64 { 2000 }
fn default_input() -> String { "Input".to_string() }
fn default_output() -> String { "Output".to_string() }
fn default_report_suffix() -> String { "_output.txt".to_string() }
fn default_master_file() -> String { "master_interactive.txt".to_string() }

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if the file is missing;
/// a malformed file is reported and also falls back to defaults.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or("locator-harvest.yaml");
    match std::fs::read_to_string(config_path) {
        Ok(content) => parse_config(&content).unwrap_or_else(|e| {
            warn!("Ignoring malformed config '{}': {}", config_path, e);
            AppConfig::default()
        }),
        Err(_) => AppConfig::default(),
    }
}

pub fn parse_config(content: &str) -> Result<AppConfig, serde_yaml::Error> {
    serde_yaml::from_str(content)
}

// ============================================================================
// Config Builders (merge CLI args with config file)
// ============================================================================

/// Capture settings after applying CLI overrides to the config file.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureSettings {
    pub target_app: Option<String>,
    pub output_dir: PathBuf,
    pub file_prefix: String,
    pub extension: String,
    pub poll_interval: Duration,
    pub journal: Option<String>,
}

pub fn build_capture_settings(
    config: &CaptureConfig,
    target_app: Option<&str>,
    output_dir: Option<&str>,
    poll_interval_ms: Option<u64>,
    journal: Option<&str>,
) -> CaptureSettings {
    CaptureSettings {
        target_app: target_app
            .map(str::to_string)
            .or_else(|| config.target_app.clone()),
        output_dir: PathBuf::from(output_dir.unwrap_or(config.output_dir.as_str())),
        file_prefix: config.file_prefix.clone(),
        extension: config.extension.clone(),
        poll_interval: Duration::from_millis(poll_interval_ms.unwrap_or(config.poll_interval_ms)),
        journal: journal.map(str::to_string).or_else(|| config.journal.clone()),
    }
}

pub fn build_extract_options(
    config: &AppConfig,
    input_dir: Option<&str>,
    output_dir: Option<&str>,
    extension: Option<&str>,
) -> ExtractOptions {
    let extract = &config.extract;
    ExtractOptions {
        input_dir: PathBuf::from(input_dir.unwrap_or(extract.input_dir.as_str())),
        output_dir: PathBuf::from(output_dir.unwrap_or(extract.output_dir.as_str())),
        extension: extension.unwrap_or(extract.extension.as_str()).to_string(),
        report_suffix: extract.report_suffix.clone(),
        master_file: extract.master_file.clone(),
        classifier: config.classifier.clone(),
    }
}
