use std::path::Path;

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use once_cell::sync::OnceCell;

const LOG_FILE_BASENAME: &str = "daybook";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 1024 * 1024;
const MAX_LOG_FILES: usize = 5;

// The handle shuts the logger down when dropped, so it has to outlive main.
static LOGGER: OnceCell<LoggerHandle> = OnceCell::new();

/// Starts rotating file logging under `log_dir`. `RUST_LOG` overrides the
/// default `info` level. The caller decides whether a failure matters.
pub(crate) fn init(log_dir: &Path) -> Result<(), String> {
    std::fs::create_dir_all(log_dir).map_err(|err| {
        format!(
            "failed to create log directory {}: {err}",
            log_dir.display()
        )
    })?;

    let handle = Logger::try_with_env_or_str("info")
        .map_err(|err| format!("invalid log level: {err}"))?
        .log_to_file(
            FileSpec::default()
                .directory(log_dir)
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(MAX_LOG_FILES),
        )
        // Direct writes: the process is short-lived and buffered lines would
        // be lost on exit.
        .write_mode(WriteMode::Direct)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(|err| format!("failed to start logger: {err}"))?;

    LOGGER
        .set(handle)
        .map_err(|_| "logging already initialized".to_string())?;
    Ok(())
}
