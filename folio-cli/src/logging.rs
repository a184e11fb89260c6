//! Logging setup
//!
//! Logs go to stderr so stdout carries only command output. `RUST_LOG`
//! overrides the level chosen by the global flags.

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Level selected by the global flags. `quiet` wins over `debug`, which wins
/// over `verbose`.
pub fn log_level(quiet: bool, debug: bool, verbose: bool) -> Level {
    if quiet {
        Level::ERROR
    } else if debug {
        Level::DEBUG
    } else if verbose {
        Level::TRACE
    } else {
        Level::INFO
    }
}

/// Install the global subscriber
pub fn init(level: Level, use_color: bool) {
    let builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(use_color)
        .with_target(false);

    let result = match std::env::var("RUST_LOG") {
        Ok(filter) if !filter.trim().is_empty() => builder
            .with_env_filter(EnvFilter::new(filter))
            .try_init(),
        _ => builder.with_max_level(level).try_init(),
    };

    if let Err(e) = result {
        eprintln!("Failed to initialise logging: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level_is_info() {
        assert_eq!(log_level(false, false, false), Level::INFO);
    }

    #[test]
    fn test_flag_precedence() {
        assert_eq!(log_level(true, true, true), Level::ERROR);
        assert_eq!(log_level(false, true, true), Level::DEBUG);
        assert_eq!(log_level(false, false, true), Level::TRACE);
    }
}
