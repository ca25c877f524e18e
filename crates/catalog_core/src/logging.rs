//! Catalog logging bootstrap.
//!
//! # Responsibility
//! - Validate logging configuration supplied by the embedding process.
//! - Start rolling file logs exactly once per process.
//! - Capture panics as sanitized log events.
//!
//! # Invariants
//! - Initialization is idempotent for an identical [`LogConfig`].
//! - Re-initialization with a different level or directory is rejected.
//! - Initialization never panics.

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::{error, info};
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};

const LOG_FILE_BASENAME: &str = "catalog";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
const MAX_LOG_FILES: usize = 5;
const MAX_PANIC_PAYLOAD_CHARS: usize = 160;

static ACTIVE_LOGGER: OnceCell<ActiveLogger> = OnceCell::new();
static PANIC_HOOK: OnceCell<()> = OnceCell::new();

/// Validated logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    level: &'static str,
    log_dir: PathBuf,
}

impl LogConfig {
    /// Parses a level name and an absolute log directory.
    ///
    /// Accepted levels: `trace|debug|info|warn|error` (case-insensitive,
    /// `warning` is an alias of `warn`).
    pub fn parse(level: &str, log_dir: impl AsRef<Path>) -> Result<Self, String> {
        Ok(Self {
            level: parse_level(level)?,
            log_dir: parse_log_dir(log_dir.as_ref())?,
        })
    }

    /// Builds a config with [`default_log_level`] for the current build.
    pub fn with_default_level(log_dir: impl AsRef<Path>) -> Result<Self, String> {
        Self::parse(default_log_level(), log_dir)
    }

    pub fn level(&self) -> &'static str {
        self.level
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }
}

struct ActiveLogger {
    config: LogConfig,
    _handle: LoggerHandle,
}

/// Starts file logging for the process.
///
/// # Errors
/// - The log directory cannot be created.
/// - The flexi_logger backend fails to start.
/// - Logging is already active with a different config.
pub fn init_logging(config: &LogConfig) -> Result<(), String> {
    let active = ACTIVE_LOGGER.get_or_try_init(|| start_logger(config))?;

    if active.config.log_dir != config.log_dir {
        return Err(format!(
            "logging already initialized at `{}`; refusing to switch to `{}`",
            active.config.log_dir.display(),
            config.log_dir.display()
        ));
    }
    if active.config.level != config.level {
        return Err(format!(
            "logging already initialized with level `{}`; refusing to switch to `{}`",
            active.config.level, config.level
        ));
    }

    Ok(())
}

/// Returns the active logging config, `None` before [`init_logging`].
pub fn logging_status() -> Option<LogConfig> {
    ACTIVE_LOGGER.get().map(|active| active.config.clone())
}

/// `debug` in debug builds, `info` in release builds.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn start_logger(config: &LogConfig) -> Result<ActiveLogger, String> {
    std::fs::create_dir_all(&config.log_dir).map_err(|err| {
        format!(
            "failed to create log directory `{}`: {err}",
            config.log_dir.display()
        )
    })?;

    let handle = Logger::try_with_str(config.level)
        .map_err(|err| format!("invalid log level `{}`: {err}", config.level))?
        .log_to_file(
            FileSpec::default()
                .directory(config.log_dir.as_path())
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(MAX_LOG_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(|err| format!("failed to start logger: {err}"))?;

    install_panic_hook();

    info!(
        "event=catalog_start module=core status=ok platform={} version={} level={} log_dir={}",
        std::env::consts::OS,
        env!("CARGO_PKG_VERSION"),
        config.level,
        config.log_dir.display()
    );

    Ok(ActiveLogger {
        config: config.clone(),
        _handle: handle,
    })
}

fn parse_level(level: &str) -> Result<&'static str, String> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(format!(
            "unsupported log level `{other}`; expected trace|debug|info|warn|error"
        )),
    }
}

fn parse_log_dir(log_dir: &Path) -> Result<PathBuf, String> {
    if log_dir.as_os_str().is_empty() {
        return Err("log_dir cannot be empty".to_string());
    }
    if !log_dir.is_absolute() {
        return Err(format!(
            "log_dir must be an absolute path, got `{}`",
            log_dir.display()
        ));
    }
    Ok(log_dir.to_path_buf())
}

fn install_panic_hook() {
    if PANIC_HOOK.set(()).is_err() {
        return;
    }

    let previous_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let location = panic_info
            .location()
            .map(|loc| format!("{}:{}", loc.file(), loc.line()))
            .unwrap_or_else(|| "unknown".to_string());
        let payload = panic_info
            .payload()
            .downcast_ref::<&str>()
            .map(|message| (*message).to_string())
            .or_else(|| panic_info.payload().downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "non-string panic payload".to_string());
        error!(
            "event=panic_captured module=core status=error location={} payload={}",
            location,
            single_line(&payload, MAX_PANIC_PAYLOAD_CHARS)
        );
        previous_hook(panic_info);
    }));
}

/// Flattens newlines and caps the message at `max_chars` characters.
fn single_line(value: &str, max_chars: usize) -> String {
    let flattened = value.replace(['\n', '\r'], " ");
    if flattened.chars().count() <= max_chars {
        return flattened;
    }
    let mut truncated: String = flattened.chars().take(max_chars).collect();
    truncated.push_str("...");
    truncated
}

#[cfg(test)]
mod tests {
    use super::{default_log_level, init_logging, logging_status, single_line, LogConfig};

    #[test]
    fn parse_normalizes_level_names() {
        let dir = std::env::temp_dir();
        assert_eq!(LogConfig::parse("INFO", &dir).unwrap().level(), "info");
        assert_eq!(LogConfig::parse(" warning ", &dir).unwrap().level(), "warn");
        assert!(LogConfig::parse("verbose", &dir).is_err());
    }

    #[test]
    fn with_default_level_follows_build_mode() {
        let dir = std::env::temp_dir();
        let config = LogConfig::with_default_level(&dir).unwrap();
        assert_eq!(config.level(), default_log_level());
        assert_eq!(config.log_dir(), dir.as_path());

        assert!(LogConfig::with_default_level("relative/logs").is_err());
    }

    #[test]
    fn parse_rejects_relative_and_empty_dirs() {
        let error = LogConfig::parse("info", "logs/dev").unwrap_err();
        assert!(error.contains("absolute"));

        let error = LogConfig::parse("info", "").unwrap_err();
        assert!(error.contains("empty"));
    }

    #[test]
    fn single_line_strips_newlines_and_truncates() {
        let sanitized = single_line("line1\nline2\rline3", 8);
        assert!(!sanitized.contains('\n'));
        assert!(!sanitized.contains('\r'));
        assert_eq!(sanitized, "line1 li...");
        assert_eq!(single_line("short", 8), "short");
    }

    #[test]
    fn init_logging_is_idempotent_and_rejects_conflicts() {
        let first_dir = tempfile::tempdir().unwrap();
        let second_dir = tempfile::tempdir().unwrap();
        let config = LogConfig::parse("info", first_dir.path()).unwrap();

        init_logging(&config).unwrap();
        init_logging(&config).unwrap();

        let level_conflict = LogConfig::parse("debug", first_dir.path()).unwrap();
        let error = init_logging(&level_conflict).unwrap_err();
        assert!(error.contains("refusing to switch"));

        let dir_conflict = LogConfig::parse("info", second_dir.path()).unwrap();
        let error = init_logging(&dir_conflict).unwrap_err();
        assert!(error.contains("refusing to switch"));

        assert_eq!(logging_status(), Some(config));
    }
}
