use anyhow::Result;
use flexi_logger::{Logger, LoggerHandle};

/// Starts logging to stderr. `base_level` is a log specification such as
/// `"info"` or `"insar_pairs=debug"`; `RUST_LOG` takes precedence when set.
///
/// Keep the returned handle alive for the lifetime of the program.
pub fn setup_logging(base_level: &str) -> Result<LoggerHandle> {
    let handle = Logger::try_with_env_or_str(base_level)?
        .log_to_stderr()
        .start()?;
    Ok(handle)
}
