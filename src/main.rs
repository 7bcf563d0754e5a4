// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, warn};
use std::fs::File;
use std::io::BufReader;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::app_controller::{Controller, TrackMetadata};

mod app_config;
mod app_controller;
mod challenge;
mod client;
mod errors;
mod file_utils;
mod live;
mod lrc;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate an LRC file and report issues
    Validate {
        /// Path to the LRC file
        input: PathBuf,

        /// Emit the full validation result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Normalize and sort an LRC file
    Normalize {
        /// Path to the LRC file
        input: PathBuf,

        /// Output path (defaults to <input>.normalized.lrc)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Sort an LRC file chronologically
    Sort {
        /// Path to the LRC file
        input: PathBuf,

        /// Output path (defaults to <input>.sorted.lrc)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Publish an LRC file to the lyrics database
    Publish {
        /// Path to the LRC file
        input: PathBuf,

        /// Track title
        #[arg(long)]
        track: String,

        /// Artist name
        #[arg(long)]
        artist: String,

        /// Album name
        #[arg(long)]
        album: Option<String>,

        /// Track duration in seconds
        #[arg(long)]
        duration: Option<u32>,

        /// Continue past unresolved validation issues
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions for lrcpress
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
#[command(name = "lrcpress", version, about = "Validate, normalize, and publish synchronized lyrics")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color code for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:<5} {}\x1B[0m",
                color,
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "lrcpress", &mut std::io::stdout());
        return Ok(());
    }

    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &cli.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level_filter(&config_log_level));
    }

    let config = load_or_create_config(&cli.config_path, cli.log_level.as_ref())?;

    // If log level was not set via command line, update it from config now
    if cli.log_level.is_none() {
        log::set_max_level(level_filter(&config.log_level));
    }

    let controller = Controller::with_config(config)?;

    match cli.command {
        Commands::Validate { input, json } => {
            let result = controller.run_validate(&input, json)?;
            if result.has_errors {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Normalize { input, output } => controller.run_normalize(&input, output),
        Commands::Sort { input, output } => controller.run_sort(&input, output),
        Commands::Publish {
            input,
            track,
            artist,
            album,
            duration,
            force,
        } => {
            let metadata = TrackMetadata {
                track_name: track,
                artist_name: artist,
                album_name: album,
                duration,
            };
            controller.run_publish(&input, metadata, force).await
        }
        Commands::Completions { .. } => unreachable!("handled above"),
    }
}

/// Load the configuration file, creating a default one when it does not
/// exist. A log level passed on the command line overrides the file.
fn load_or_create_config(
    config_path: &str,
    cli_log_level: Option<&CliLogLevel>,
) -> Result<Config> {
    let config = if Path::new(config_path).exists() {
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;
        let reader = BufReader::new(file);
        let mut config: Config = serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?;

        if let Some(log_level) = cli_log_level {
            config.log_level = log_level.clone().into();
        }

        config
    } else {
        warn!("Config file not found at '{}', creating default config.", config_path);

        let mut config = Config::default();
        if let Some(log_level) = cli_log_level {
            config.log_level = log_level.clone().into();
        }

        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        config
    };

    config.validate().context("Configuration validation failed")?;

    Ok(config)
}
