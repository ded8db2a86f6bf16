#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{debug, info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use serde_json::json;
use std::io::Write;
use std::path::{Path, PathBuf};

use seekthumbs::app_config::{Config, LogLevel};
use seekthumbs::file_utils::FileManager;
use seekthumbs::{ThumbnailEntry, ThumbnailIndex};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

/// Output format for the `cues` command
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CueOutputFormat {
    Json,
    Vtt,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse a cue file and print its cues
    Cues {
        /// WebVTT thumbnail track
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: CueOutputFormat,
    },

    /// Print the thumbnail nearest to one or more playback times
    Lookup {
        /// WebVTT thumbnail track
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Playback time in seconds (repeatable)
        #[arg(short, long = "time", required = true, allow_negative_numbers = true)]
        times: Vec<f64>,

        /// Sprite image shared by all cues (overrides the config file)
        #[arg(long)]
        sprite_base_url: Option<String>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions for seekthumbs
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// seekthumbs - seek bar thumbnails from WebVTT cues
#[derive(Parser, Debug)]
#[command(name = "seekthumbs")]
#[command(version)]
#[command(about = "Resolve seek bar thumbnails from WebVTT thumbnail tracks")]
#[command(long_about = "seekthumbs parses WebVTT thumbnail tracks and resolves the thumbnail closest to a playback time.

EXAMPLES:
    seekthumbs cues thumbs.vtt                          # Dump cues as JSON
    seekthumbs cues -f vtt thumbs.vtt                   # Normalized WebVTT output
    seekthumbs lookup thumbs.vtt -t 12.5                # Nearest thumbnail at 12.5s
    seekthumbs lookup thumbs.vtt -t 0 -t 60 --json      # Several times, JSON output
    seekthumbs lookup sprite.vtt -t 3 --sprite-base-url https://cdn.example/sprite.jpg
    seekthumbs completions bash > seekthumbs.bash

CONFIGURATION:
    An optional JSON file (default: seekthumbs.json) may set \"sprite_base_url\"
    and \"log_level\". Command line flags take precedence.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "seekthumbs.json")]
    config_path: PathBuf,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger { level: LevelFilter::Trace }))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color code for level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
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
            let _ = writeln!(
                std::io::stderr(),
                "\x1B[{}m{} {:<5} {}\x1B[0m",
                Self::color_for_level(record.level()),
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

fn main() -> Result<()> {
    CustomLogger::init(LevelFilter::Warn)?;

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "seekthumbs", &mut std::io::stdout());
        return Ok(());
    }

    // Command line level wins over the config file
    if let Some(level) = cli.log_level {
        log::set_max_level(LogLevel::from(level).into());
    }

    let mut config = Config::load_or_default(&cli.config_path)?;
    if let Some(level) = cli.log_level {
        config.log_level = level.into();
    } else {
        log::set_max_level(config.log_level.into());
    }

    match cli.command {
        Commands::Cues { file, format } => run_cues(&file, format),
        Commands::Lookup { file, times, sprite_base_url, json } => {
            if sprite_base_url.is_some() {
                config.sprite_base_url = sprite_base_url;
            }
            config.validate().context("Configuration validation failed")?;
            run_lookup(&file, &times, &config, json)
        }
        Commands::Completions { .. } => Ok(()),
    }
}

fn ensure_input(file: &Path) -> Result<()> {
    if !FileManager::file_exists(file) {
        return Err(anyhow!("Input file does not exist: {:?}", file));
    }
    if !FileManager::is_cue_file(file) {
        warn!("{:?} does not have a .vtt extension, parsing anyway", file);
    }
    Ok(())
}

fn run_cues(file: &Path, format: CueOutputFormat) -> Result<()> {
    ensure_input(file)?;
    let cues = FileManager::load_cues(file)?;
    info!("{} cue(s) in {:?}", cues.len(), file);

    let mut stdout = std::io::stdout().lock();
    match format {
        CueOutputFormat::Json => {
            serde_json::to_writer_pretty(&mut stdout, &cues).context("Failed to serialize cues")?;
            writeln!(stdout)?;
        }
        CueOutputFormat::Vtt => {
            writeln!(stdout, "WEBVTT")?;
            for cue in &cues {
                writeln!(stdout)?;
                write!(stdout, "{}", cue)?;
            }
        }
    }

    Ok(())
}

fn run_lookup(file: &Path, times: &[f64], config: &Config, as_json: bool) -> Result<()> {
    ensure_input(file)?;
    let cues = FileManager::load_cues(file)?;
    let index = ThumbnailIndex::build(&cues, &config.index_options())
        .with_context(|| format!("Failed to build thumbnail index from {:?}", file))?;
    debug!("Index holds {} thumbnail(s)", index.len());

    if index.is_empty() {
        info!("No thumbnails in {:?}, every lookup will be empty", file);
    }

    let mut stdout = std::io::stdout().lock();
    if as_json {
        let results: Vec<_> = times
            .iter()
            .map(|&time| lookup_json(time, index.nearest_entry(time)))
            .collect();
        serde_json::to_writer_pretty(&mut stdout, &results).context("Failed to serialize results")?;
        writeln!(stdout)?;
    } else {
        for &time in times {
            match index.nearest_locator(time) {
                Some(locator) => writeln!(stdout, "{}\t{}", time, locator)?,
                None => writeln!(stdout, "{}\t-", time)?,
            }
        }
    }

    Ok(())
}

fn lookup_json(time: f64, entry: Option<&ThumbnailEntry>) -> serde_json::Value {
    match entry {
        Some(entry) => json!({
            "time": time,
            "start_time": entry.start_time,
            "end_time": entry.end_time,
            "locator": entry.locator.as_str(),
            "region": entry.region(),
        }),
        None => json!({
            "time": time,
            "locator": null,
        }),
    }
}
