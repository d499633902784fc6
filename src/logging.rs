//! Diagnostic logging
//!
//! Uses `tracing` with a `tracing-subscriber` fmt layer on stderr, so command
//! output on stdout stays clean for piping.

use tracing_subscriber::{fmt, EnvFilter};

/// Filter directive for a `-v` count
fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Initialize logging for the CLI
///
/// # Environment
/// - `RUST_LOG` overrides the verbosity flag when set,
///   e.g. `RUST_LOG=overhead_cli=trace`
///
/// # Example
/// ```no_run
/// overhead_cli::logging::init(1);
/// ```
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbosity > 1)
        .with_line_number(verbosity > 1)
        .try_init();
}

/// Initialize logging inside tests
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(default_directive(0), "warn");
        assert_eq!(default_directive(1), "info");
        assert_eq!(default_directive(2), "debug");
        assert_eq!(default_directive(9), "debug");
    }

    #[test]
    fn test_init_test_is_idempotent() {
        init_test();
        init_test();
        tracing::debug!("logging initialized twice without panicking");
    }
}
