use clap::Parser;
use locator_harvest::capture::stop::StopFlag;
use locator_harvest::cli::commands::{cmd_capture, cmd_extract};
use locator_harvest::cli::config::{
    Cli, Commands, build_capture_settings, build_extract_options, load_config,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(cli.config.as_deref());

    match cli.command {
        Commands::Capture {
            recording,
            target_app,
            output_dir,
            poll_interval_ms,
            journal,
        } => {
            let settings = build_capture_settings(
                &config.capture,
                target_app.as_deref(),
                output_dir.as_deref(),
                poll_interval_ms,
                journal.as_deref(),
            );
            cmd_capture(&recording, &settings, &StopFlag::new())?;
        }
        Commands::Extract {
            input_dir,
            output_dir,
            extension,
        } => {
            let options = build_extract_options(
                &config,
                input_dir.as_deref(),
                output_dir.as_deref(),
                extension.as_deref(),
            );
            cmd_extract(&options)?;
        }
    }

    Ok(())
}

/// RUST_LOG wins; otherwise -v raises the default level.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_level.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}
