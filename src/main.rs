//! jasub - Japanese video to Traditional Chinese subtitles
//!
//! Extracts the audio track with ffmpeg, transcribes it with whisper,
//! translates each segment and writes an SRT file.

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use tracing_appender::{non_blocking, rolling};

use jasub::cli::{Args, Commands};
use jasub::config::Config;
use jasub::workflow::{Delivery, Workflow};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Setup logging to both console and file
    setup_logging(args.verbose)?;

    // Load configuration
    let mut config = match &args.config {
        Some(config_path) => Config::from_file(config_path)?,
        None => {
            // Try to load jasub.toml from current directory first
            if std::path::Path::new("jasub.toml").exists() {
                info!("Found jasub.toml in current directory, loading...");
                Config::from_file("jasub.toml")?
            } else {
                Config::default()
            }
        }
    };

    match args.command {
        Commands::Process { input, output, source_lang, target_lang, translator, transcriber } => {
            if let Some(lang) = source_lang {
                config.transcriber.language = lang.clone();
                config.translate.source_language = lang;
            }
            if let Some(lang) = target_lang {
                config.translate.target_language = lang;
            }
            if let Some(choice) = translator {
                config.translate.backend = choice.into();
            }
            if let Some(choice) = transcriber {
                config.transcriber.backend = choice.into();
            }

            let delivery = output.delivery(&input, &config.translate.target_language);
            let workflow = Workflow::new(config)?;
            let report = workflow.process(&input, &delivery).await?;

            for notice in &report.notices {
                eprintln!("warning: {}", notice);
            }
            if let Delivery::File(path) = &report.delivered_to {
                eprintln!("Wrote {} cues to {}", report.cues, path.display());
            }
        }
        Commands::Extract { input, output } => {
            info!("Extracting audio from: {}", input.display());
            let workflow = Workflow::new(config)?;
            workflow.extract_audio(&input, &output).await?;
        }
        Commands::Transcribe { input, output, source_lang } => {
            info!("Transcribing audio: {}", input.display());
            if let Some(lang) = source_lang {
                config.transcriber.language = lang;
            }

            let delivery = output.delivery(&input, &config.transcriber.language);
            let workflow = Workflow::new(config)?;
            let cues = workflow.transcribe_audio(&input, &delivery).await?;
            if let Delivery::File(path) = &delivery {
                eprintln!("Wrote {} cues to {}", cues, path.display());
            }
        }
        Commands::Config { output } => {
            config.save_to_file(&output)?;
            eprintln!("Wrote configuration to {}", output.display());
        }
    }

    Ok(())
}

/// Setup logging to both console and file
fn setup_logging(verbose: bool) -> Result<()> {
    let log_dir = std::env::current_dir()?.join(".jasub").join("log");
    std::fs::create_dir_all(&log_dir)?;

    // Set up file appender with daily rotation
    let file_appender = rolling::daily(&log_dir, "jasub.log");
    let (non_blocking_file, guard) = non_blocking(file_appender);
    // Keep the guard alive for the duration of the program
    std::mem::forget(guard);

    let log_level = if verbose { Level::DEBUG } else { Level::INFO };

    // Console output goes to stderr so `--stdout` stays a clean SRT stream
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    info!("Logging initialized - console: {}, file: {}",
          log_level, log_dir.join("jasub.log").display());

    Ok(())
}
