// file: src/logging/logger.rs
// version: 1.0.0
// guid: b7e19c04-2d58-4f3a-a691-0c84d5f72e36

//! Logger initialization and configuration

use crate::Result;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the logging system
pub fn init_logger(verbose: bool, quiet: bool) -> Result<()> {
    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .try_init()
        .map_err(|e| crate::GcliError::config(format!("Failed to initialize logger: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // The subscriber can only be installed once per process, so these
    // only verify that initialization never panics.

    #[test]
    fn test_init_logger_default() {
        let result = init_logger(false, false);
        assert!(result.is_ok() || result.is_err());
    }

    #[test]
    fn test_init_logger_verbose() {
        let result = init_logger(true, false);
        assert!(result.is_ok() || result.is_err());
    }

    #[test]
    fn test_init_logger_quiet() {
        let result = init_logger(false, true);
        assert!(result.is_ok() || result.is_err());
    }
}
