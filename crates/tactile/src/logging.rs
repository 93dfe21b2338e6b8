//! Tracing subscriber setup.
//!
//! `RUST_LOG` wins over the level passed in, so `RUST_LOG=tactile=debug`
//! shows every WebDriver command regardless of CLI verbosity.

use tracing_subscriber::EnvFilter;

/// Log line format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

fn filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Install a global subscriber writing to stderr.
///
/// Returns `false` if a subscriber was already installed.
pub fn init_tracing(default_level: &str, format: LogFormat) -> bool {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter(default_level))
        .with_target(false)
        .with_writer(std::io::stderr);
    match format {
        LogFormat::Text => builder.try_init().is_ok(),
        LogFormat::Json => builder.json().try_init().is_ok(),
    }
}

/// Install a subscriber that writes through the test harness capture.
///
/// Safe to call from every test.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter("debug"))
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_test_tracing_is_idempotent() {
        init_test_tracing();
        init_test_tracing();
        tracing::debug!("still alive");
    }

    #[test]
    fn test_second_global_init_reports_false() {
        init_test_tracing();
        assert!(!init_tracing("info", LogFormat::Text));
    }
}
