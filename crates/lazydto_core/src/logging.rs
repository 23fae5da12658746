//! Logging bootstrap for hosts embedding lazydto.
//!
//! # Responsibility
//! - Install one `log` backend per process from a [`LoggingConfig`].
//! - Keep the crate's own diagnostics in the `event=... module=...` format.
//!
//! # Invariants
//! - Initialization is idempotent for an identical config.
//! - A different config after the first successful init is rejected.
//! - Initialization never panics.

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::info;
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};

const LOG_FILE_BASENAME: &str = "lazydto";
const DEFAULT_MAX_FILE_BYTES: u64 = 10 * 1024 * 1024;
const DEFAULT_MAX_FILES: usize = 5;

static LOGGING_STATE: OnceCell<LoggingState> = OnceCell::new();

struct LoggingState {
    config: LoggingConfig,
    _logger: LoggerHandle,
}

/// Logger settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// One of `trace|debug|info|warn|error`, case-insensitive.
    pub level: String,
    /// Absolute directory for rotated log files; `None` logs to stderr.
    pub log_dir: Option<PathBuf>,
    /// Size threshold that triggers file rotation.
    pub max_file_bytes: u64,
    /// Number of rotated files kept on disk.
    pub max_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level().to_string(),
            log_dir: None,
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
            max_files: DEFAULT_MAX_FILES,
        }
    }
}

impl LoggingConfig {
    /// File logging at `level` into `log_dir` with default rotation.
    pub fn to_dir(level: impl Into<String>, log_dir: impl Into<PathBuf>) -> Self {
        Self {
            level: level.into(),
            log_dir: Some(log_dir.into()),
            ..Self::default()
        }
    }

    /// Returns a copy with the level and directory normalized.
    ///
    /// # Errors
    /// - Unsupported level, empty or relative `log_dir`, or zero `max_files`.
    pub fn normalized(&self) -> Result<Self, String> {
        let level = normalize_level(&self.level)?;
        let log_dir = match &self.log_dir {
            Some(dir) => Some(normalize_log_dir(dir)?),
            None => None,
        };
        if self.max_files == 0 {
            return Err("max_files must be at least 1".to_string());
        }
        Ok(Self {
            level: level.to_string(),
            log_dir,
            max_file_bytes: self.max_file_bytes,
            max_files: self.max_files,
        })
    }
}

/// Initializes process-wide logging.
///
/// # Errors
/// - Returns an error for an invalid config.
/// - Returns an error when logging is already active with another config.
/// - Returns an error when the log directory or backend cannot be set up.
pub fn init_logging(config: &LoggingConfig) -> Result<(), String> {
    let config = config.normalized()?;

    let state = LOGGING_STATE.get_or_try_init(|| -> Result<LoggingState, String> {
        let logger = start_logger(&config)?;
        info!(
            "event=core_init module=logging status=ok level={} destination={} version={}",
            config.level,
            destination_label(&config),
            env!("CARGO_PKG_VERSION")
        );
        Ok(LoggingState {
            config: config.clone(),
            _logger: logger,
        })
    })?;

    if state.config != config {
        return Err(format!(
            "logging already initialized with level `{}` at `{}`; refusing to switch to level `{}` at `{}`",
            state.config.level,
            destination_label(&state.config),
            config.level,
            destination_label(&config)
        ));
    }

    Ok(())
}

/// Returns the active normalized config, or `None` before initialization.
pub fn logging_status() -> Option<LoggingConfig> {
    LOGGING_STATE.get().map(|state| state.config.clone())
}

/// Returns the default log level for the current build mode.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn start_logger(config: &LoggingConfig) -> Result<LoggerHandle, String> {
    let logger = Logger::try_with_str(&config.level)
        .map_err(|err| format!("invalid log level `{}`: {err}", config.level))?;

    let logger = match &config.log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir).map_err(|err| {
                format!("failed to create log directory `{}`: {err}", dir.display())
            })?;
            logger
                .log_to_file(
                    FileSpec::default()
                        .directory(dir.as_path())
                        .basename(LOG_FILE_BASENAME),
                )
                .rotate(
                    Criterion::Size(config.max_file_bytes),
                    Naming::Numbers,
                    Cleanup::KeepLogFiles(config.max_files),
                )
                .write_mode(WriteMode::BufferAndFlush)
                .append()
                .format_for_files(flexi_logger::detailed_format)
        }
        None => logger.log_to_stderr(),
    };

    logger
        .start()
        .map_err(|err| format!("failed to start logger: {err}"))
}

fn destination_label(config: &LoggingConfig) -> String {
    match &config.log_dir {
        Some(dir) => dir.display().to_string(),
        None => "stderr".to_string(),
    }
}

fn normalize_level(level: &str) -> Result<&'static str, String> {
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

fn normalize_log_dir(log_dir: &Path) -> Result<PathBuf, String> {
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

#[cfg(test)]
mod tests {
    use super::{init_logging, logging_status, normalize_level, LoggingConfig};
    use std::path::PathBuf;

    #[test]
    fn normalize_level_accepts_known_values() {
        assert_eq!(normalize_level("INFO").unwrap(), "info");
        assert_eq!(normalize_level(" warning ").unwrap(), "warn");
        assert!(normalize_level("loud").is_err());
    }

    #[test]
    fn normalized_rejects_relative_dir_and_zero_files() {
        let relative = LoggingConfig::to_dir("info", "logs/dev");
        assert!(relative.normalized().unwrap_err().contains("absolute"));

        let zero_files = LoggingConfig {
            max_files: 0,
            ..LoggingConfig::default()
        };
        assert!(zero_files.normalized().is_err());
    }

    #[test]
    fn init_logging_is_idempotent_and_rejects_conflicts() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let config = LoggingConfig::to_dir("INFO", dir.path());

        init_logging(&config).expect("first init should succeed");
        init_logging(&config).expect("same config should be idempotent");

        let other_level = LoggingConfig::to_dir("debug", dir.path());
        let err = init_logging(&other_level).expect_err("level conflict should fail");
        assert!(err.contains("refusing to switch"));

        let stderr = LoggingConfig::default();
        let err = init_logging(&stderr).expect_err("destination conflict should fail");
        assert!(err.contains("refusing to switch"));

        let active = logging_status().expect("logging should be active");
        assert_eq!(active.level, "info");
        assert_eq!(active.log_dir, Some(PathBuf::from(dir.path())));
    }
}
