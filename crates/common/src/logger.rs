use crate::config::AppConfig;
use crate::error::OutreachError;
use std::path::Path;
use tracing::Level;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

const LOG_FILE_NAME: &str = "outreach.log";

/// Console stays quiet about span lifecycles; the log file records span timings
const CONSOLE_SPAN_EVENTS: FmtSpan = FmtSpan::NONE;
const FILE_SPAN_EVENTS: FmtSpan = FmtSpan::CLOSE;

/// Initialize logging according to the configuration
///
/// Logs to console and `LOG_DIR/outreach.log` when a log directory is set,
/// console only otherwise.
pub fn init_from_config(config: &AppConfig) -> Result<(), OutreachError> {
    match &config.log_dir {
        Some(dir) => setup_logging(dir, &config.log_level),
        None => setup_console_logging(&config.log_level),
    }
}

/// Initialize logging system
///
/// Sets up logging to both console and file
///
/// # Arguments
/// * `log_dir` - Directory where log files will be stored
/// * `log_level` - Log level (trace, debug, info, warn, error)
pub fn setup_logging(log_dir: &Path, log_level: &str) -> Result<(), OutreachError> {
    if !log_dir.exists() {
        std::fs::create_dir_all(log_dir).map_err(|e| {
            OutreachError::config(format!(
                "Failed to create log directory {}: {}",
                log_dir.display(),
                e
            ))
        })?;
    }

    let log_file_path = log_dir.join(LOG_FILE_NAME);
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file_path)
        .map_err(|e| {
            OutreachError::config(format!(
                "Failed to open log file {}: {}",
                log_file_path.display(),
                e
            ))
        })?;

    let console_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_span_events(CONSOLE_SPAN_EVENTS)
        .with_filter(build_filter(log_level));

    let file_layer = fmt::layer()
        .with_writer(log_file)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .with_ansi(false)
        .with_span_events(FILE_SPAN_EVENTS)
        .with_filter(build_filter(log_level));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();

    tracing::info!(
        "Logging initialized: level={}, log_file={}",
        log_level,
        log_file_path.display()
    );

    Ok(())
}

/// Simple logging setup (console only)
pub fn setup_console_logging(log_level: &str) -> Result<(), OutreachError> {
    tracing_subscriber::fmt()
        .with_target(true)
        .with_line_number(true)
        .with_span_events(CONSOLE_SPAN_EVENTS)
        .with_env_filter(build_filter(log_level))
        .init();

    tracing::info!("Console logging initialized: level={}", log_level);

    Ok(())
}

/// Filter from RUST_LOG, falling back to the configured level
fn build_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level))
}

/// Parse string to tracing Level
pub fn parse_log_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" | "warning" => Level::WARN,
        "error" => Level::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to INFO", level);
            Level::INFO
        }
    }
}
