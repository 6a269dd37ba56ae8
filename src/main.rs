// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, debug, error, info, warn};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use romanize::app_config::{self, Config, StrategyKind};
use romanize::errors::AppError;
use romanize::Transliterator;
use romanize::transliteration::Deadline;

/// CLI Wrapper for StrategyKind to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliStrategy {
    Local,
    Aksharamukha,
    Azure,
    Llm,
    Translate,
}

impl From<CliStrategy> for StrategyKind {
    fn from(cli_strategy: CliStrategy) -> Self {
        match cli_strategy {
            CliStrategy::Local => StrategyKind::Local,
            CliStrategy::Aksharamukha => StrategyKind::Aksharamukha,
            CliStrategy::Azure => StrategyKind::Azure,
            CliStrategy::Llm => StrategyKind::Llm,
            CliStrategy::Translate => StrategyKind::Translate,
        }
    }
}

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

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check every configured networked provider
    Check,

    /// Generate shell completions for romanize
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// romanize - script-aware lyric transliteration
///
/// Rewrites lyrics written in non-Latin scripts into Latin letters, trying
/// a local converter first and then networked providers in order.
#[derive(Parser, Debug)]
#[command(name = "romanize")]
#[command(version = "0.1.0")]
#[command(about = "Romanize song lyrics written in non-Latin scripts")]
#[command(long_about = "romanize detects the script and language of lyrics and rewrites them in Latin letters.

EXAMPLES:
    romanize lyrics.txt                         # Romanize a file using default config
    echo 'こんにちは' | romanize                 # Read from stdin
    romanize --only local --only llm song.txt   # Restrict the strategy chain
    romanize --pretty --log-level debug -      # Pretty JSON, verbose logs
    romanize check                              # Check configured providers 
    romanize completions bash > romanize.bash   # Generate bash completions

CONFIGURATION:
    Configuration is stored in romanize.json by default. You can specify a
    different file with --config. If the config file doesn't exist, a default
    one will be created automatically. Credentials may also come from
    ANTHROPIC_API_KEY, AZURE_TRANSLATOR_KEY, AZURE_TRANSLATOR_REGION and
    LIBRETRANSLATE_API_KEY.

STRATEGIES:
    local        - Offline converters for kana, Han, Hangul, Cyrillic, Greek, Hebrew
    aksharamukha - Aksharamukha script converter (Indic, Arabic, Thai...)
    azure        - Translator transliterate endpoint (requires key)
    llm          - Anthropic Claude API (requires key)
    translate    - LibreTranslate machine translation (last resort)")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Lyrics file to romanize; '-' or nothing reads stdin
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, default_value = "romanize.json")]
    config: PathBuf,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Soft cap on chunk length, in chars
    #[arg(long)]
    max_chunk_chars: Option<usize>,

    /// Only try these strategies (repeatable); priority order is kept
    #[arg(long, value_enum)]
    only: Vec<CliStrategy>,

    /// Give up and return the input after this many seconds
    #[arg(long)]
    deadline_secs: Option<u64>,

    /// Pretty-print the JSON result
    #[arg(short, long)]
    pretty: bool,
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

    // @returns: Color escape for log level
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
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:<5} {}\x1B[0m",
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

#[tokio::main]
async fn main() -> Result<()> {
    // Trace is the ceiling; the effective level is set once config is loaded
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "romanize", &mut std::io::stdout());
        return Ok(());
    }

    if let Some(level) = &cli.log_level {
        let level: app_config::LogLevel = level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let config = load_config(&cli)?;
    let engine = Transliterator::from_config(&config);
    debug!("Strategy chain: {}", engine.strategy_names().join(" > "));

    match cli.command {
        Some(Commands::Check) => run_check(&engine).await,
        _ => run_romanize(&engine, &cli).await,
    }
}

/// Load, override and validate the configuration
fn load_config(cli: &CommandLineOptions) -> Result<Config> {
    let mut config = Config::load_or_create(&cli.config)?;
    config.apply_env_overrides();

    if let Some(max_chunk_chars) = cli.max_chunk_chars {
        config.max_chunk_chars = max_chunk_chars;
    }

    if !cli.only.is_empty() {
        let only: Vec<StrategyKind> = cli.only.iter().map(|s| (*s).into()).collect();
        config.restrict_chain(&only);
    }

    match &cli.log_level {
        Some(level) => config.log_level = level.clone().into(),
        None => log::set_max_level(config.log_level.to_level_filter()),
    }

    config.validate().context("Configuration validation failed")?;
    Ok(config)
}

/// Read the lyrics from a file, or stdin for `None` and `-`
fn read_input(input: Option<&Path>) -> Result<String, AppError> {
    let mut text = match input {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .map_err(|e| AppError::File(format!("{}: {}", path.display(), e)))?,
        _ => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    // the final line break of a file is not part of the lyrics
    if text.ends_with('\n') {
        text.pop();
        if text.ends_with('\r') {
            text.pop();
        }
    }
    Ok(text)
}

async fn run_romanize(engine: &Transliterator, cli: &CommandLineOptions) -> Result<()> {
    let text = read_input(cli.input.as_deref())?;

    let result = match cli.deadline_secs {
        Some(secs) => {
            let deadline = Deadline::after(Duration::from_secs(secs));
            engine.transliterate_by(Some(&text), deadline).await?
        }
        None => engine.transliterate(Some(&text)).await?,
    };

    let json = if cli.pretty {
        serde_json::to_string_pretty(&result)
    } else {
        serde_json::to_string(&result)
    }
    .context("Failed to serialize result")?;

    println!("{}", json);
    Ok(())
}

async fn run_check(engine: &Transliterator) -> Result<()> {
    let mut failures = 0;

    match engine.check_detector().await {
        Some(Ok(())) => info!("detection: reachable"),
        Some(Err(e)) => {
            failures += 1;
            error!("detection: {}", e);
        }
        None => info!("detection: heuristic only"),
    }

    for status in engine.check_strategies().await {
        if !status.enabled {
            warn!("{}: disabled (missing credential)", status.name);
            continue;
        }
        match status.outcome {
            Ok(()) => info!("{}: reachable", status.name),
            Err(e) => {
                failures += 1;
                error!("{}: {}", status.name, e);
            }
        }
    }

    if failures > 0 {
        return Err(AppError::Unknown(format!("{} provider(s) unreachable", failures)).into());
    }
    Ok(())
}
