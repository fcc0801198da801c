//! Logging setup for trilo with file output and optional console output.
//!
//! Logs always go to a file at `warn` level (or higher if a filter is set).
//! Console logging goes to stderr, keeping stdout for program output. It is enabled when
//! `TRILO_LOG` or `RUST_LOG` is set, or in debug builds.
//!
//! ## Environment Variables
//!
//! 1. **`TRILO_LOG`** (highest priority) - trilo specific logging control
//! 2. **`RUST_LOG`** - Standard tracing environment variable
//! 3. **Default** - `warn` globally, `info` for trilo crates
//!
//! ## Log File Location
//!
//! Default: `<data_local_dir>/trilo/logs/trilo-<pid>.log`
//! - macOS: `~/Library/Application Support/trilo/logs/trilo-12345.log`
//! - Linux: `~/.local/share/trilo/logs/trilo-12345.log`
//!
//! Override with `--log-file <path>` or `TRILO_LOG_FILE`.

use std::{
    env,
    path::{Path, PathBuf},
};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Crates whose events are shown at `info` by default.
const CRATES: &[&str] = &["trilo", "trilo_bin", "trilo_options", "trilo_log"];

/// Target for events that belong in the log file only, such as errors the binary already
/// reports on stderr itself.
pub const FILE_ONLY_TARGET: &str = "trilo_file";

/// Returned from [`init`]; must be held alive to ensure log file flushing.
pub struct LogGuard {
    _file_guard: WorkerGuard,
    pub log_file: PathBuf,
}

#[derive(Debug, Default)]
pub struct LogConfig {
    pub log_file_path: Option<PathBuf>,
}

/// Initialize logging.
///
/// Respects the environment variable priority described in the module docs:
/// `TRILO_LOG` > `RUST_LOG` > default settings.
///
/// The returned [`LogGuard`] must be held for the lifetime of the program --
/// dropping it flushes and stops the background file writer.
pub fn init(config: LogConfig) -> Result<LogGuard, BoxError> {
    let (log_dir, filename) = resolve_log_path(config.log_file_path, std::process::id());

    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::never(&log_dir, &filename);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .with_filter(create_file_filter());

    let console_enabled =
        env::var("TRILO_LOG").is_ok() || env::var("RUST_LOG").is_ok() || cfg!(debug_assertions);

    let console_layer = if console_enabled {
        Some(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(console_filter()?),
        )
    } else {
        None
    };

    Registry::default()
        .with(file_layer)
        .with(console_layer)
        .try_init()?;

    Ok(LogGuard {
        _file_guard: file_guard,
        log_file: log_dir.join(filename),
    })
}

/// Initialize logging for tests.
///
/// Console only (no file output), captured by the test harness. Will not crash if called
/// multiple times or if logging is already initialized by another test.
pub fn test() {
    let _ = fmt()
        .with_env_filter(create_filter())
        .with_test_writer()
        .try_init();
}

/// Split the configured path into a directory and file name.
///
/// A path with an extension names the log file itself; anything else is treated as the
/// directory to put `trilo-<pid>.log` in.
fn resolve_log_path(override_path: Option<PathBuf>, pid: u32) -> (PathBuf, String) {
    let filename = format!("trilo-{pid}.log");

    if let Some(path) = override_path {
        if path.extension().is_some() {
            let dir = match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                _ => Path::new(".").to_path_buf(),
            };
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or(filename);
            return (dir, name);
        }
        return (path, filename);
    }

    let dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("trilo")
        .join("logs");

    (dir, filename)
}

/// File filter: uses the user specified level if set, otherwise `warn`.
fn create_file_filter() -> EnvFilter {
    if env::var("TRILO_LOG").is_ok() || env::var("RUST_LOG").is_ok() {
        return create_filter();
    }
    EnvFilter::new("warn")
}

/// Console filter: the regular filter with [`FILE_ONLY_TARGET`] silenced.
fn console_filter() -> Result<EnvFilter, BoxError> {
    Ok(create_filter().add_directive(format!("{FILE_ONLY_TARGET}=off").parse()?))
}

/// Create the [`EnvFilter`] for the priority `TRILO_LOG` > `RUST_LOG` > defaults.
fn create_filter() -> EnvFilter {
    if let Ok(trilo_log) = env::var("TRILO_LOG") {
        return expand_trilo_log(&trilo_log);
    }

    if let Ok(rust_log) = env::var("RUST_LOG") {
        return EnvFilter::new(rust_log);
    }

    expand_trilo_log("info")
}

/// Expand `TRILO_LOG` values into full tracing filter strings.
///
/// - `TRILO_LOG=debug` becomes `warn,trilo=debug,trilo_bin=debug,...`
/// - `TRILO_LOG=trilo_options=trace` is used as-is (advanced syntax)
fn expand_trilo_log(trilo_log: &str) -> EnvFilter {
    EnvFilter::new(filter_directives(trilo_log))
}

fn filter_directives(trilo_log: &str) -> String {
    if trilo_log.contains('=') || trilo_log.contains(':') || trilo_log.contains(',') {
        return trilo_log.to_string();
    }

    let mut directives = String::from("warn");
    for krate in CRATES {
        directives.push_str(&format!(",{krate}={trilo_log}"));
    }
    directives
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_level_expands_to_trilo_crates() {
        assert_eq!(
            filter_directives("debug"),
            "warn,trilo=debug,trilo_bin=debug,trilo_options=debug,trilo_log=debug"
        );
    }

    #[test]
    fn advanced_syntax_is_kept() {
        assert_eq!(
            filter_directives("trilo_options=trace"),
            "trilo_options=trace"
        );
        assert_eq!(filter_directives("info,trilo=debug"), "info,trilo=debug");
    }

    #[test]
    fn console_filter_silences_file_only_target() {
        let filter = console_filter().expect("console filter").to_string();
        assert!(filter.contains("trilo_file=off"), "{filter}");
    }

    #[test]
    fn log_path_with_extension_names_the_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let file = dir.path().join("run.log");
        let (resolved_dir, name) = resolve_log_path(Some(file), 42);
        assert_eq!(resolved_dir, dir.path());
        assert_eq!(name, "run.log");
    }

    #[test]
    fn bare_file_name_lands_in_current_dir() {
        let (dir, name) = resolve_log_path(Some(PathBuf::from("run.log")), 42);
        assert_eq!(dir, Path::new("."));
        assert_eq!(name, "run.log");
    }

    #[test]
    fn log_path_without_extension_is_a_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (resolved_dir, name) = resolve_log_path(Some(dir.path().to_path_buf()), 42);
        assert_eq!(resolved_dir, dir.path());
        assert_eq!(name, "trilo-42.log");
    }

    #[test]
    fn default_log_path_uses_pid() {
        let (dir, name) = resolve_log_path(None, 7);
        assert!(dir.ends_with("trilo/logs"));
        assert_eq!(name, "trilo-7.log");
    }
}
