//! Tracing subscriber setup
//!
//! This module provides shared tracing configuration used by both
//! the reporting binary and tests.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize the global tracing subscriber.
///
/// With a log file, everything from DEBUG up goes to the file. Without one,
/// INFO and above go to stderr. `RUST_LOG` directives apply in both cases.
pub fn init_global(log_file_path: Option<&Path>) -> std::io::Result<()> {
    match log_file_path {
        Some(path) => {
            let log_file = File::create(path)?;
            build_subscriber(Arc::new(log_file), Level::DEBUG).init();
        }
        None => build_subscriber(std::io::stderr, Level::INFO).init(),
    }
    Ok(())
}

/// Build a subscriber writing formatted events to `writer`.
///
/// This is the core subscriber configuration shared between the binary and tests.
/// `default_level` only applies when `RUST_LOG` is unset or empty; a global
/// level in `RUST_LOG` replaces it.
pub fn build_subscriber<W>(
    writer: W,
    default_level: Level,
) -> impl tracing::Subscriber + Send + Sync
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    build_subscriber_from_env(writer, default_level, EnvFilter::DEFAULT_ENV)
}

fn build_subscriber_from_env<W>(
    writer: W,
    default_level: Level,
    env_var: &str,
) -> impl tracing::Subscriber + Send + Sync
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let env_filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .with_env_var(env_var)
        .from_env_lossy();

    let fmt_layer = fmt::layer().with_ansi(false).with_writer(writer);

    tracing_subscriber::registry().with(fmt_layer).with(env_filter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::session::EditSession;
    use tempfile::NamedTempFile;

    #[test]
    fn test_subscriber_writes_session_events() {
        let log_file = NamedTempFile::new().unwrap();
        let subscriber = build_subscriber_from_env(
            Arc::new(log_file.reopen().unwrap()),
            Level::DEBUG,
            "CHECKPOINT_TEST_LOG_UNSET",
        );

        tracing::subscriber::with_default(subscriber, || {
            let mut session = EditSession::new("Hello");
            session.append(" World").unwrap();
            session.checkpoint();
        });

        let contents = std::fs::read_to_string(log_file.path()).unwrap();
        assert!(contents.contains("session: opened with 5 bytes"));
        assert!(contents.contains("checkpoint #1 at edit 1"));
    }

    #[test]
    fn test_subscriber_respects_default_level() {
        let log_file = NamedTempFile::new().unwrap();
        let subscriber = build_subscriber_from_env(
            Arc::new(log_file.reopen().unwrap()),
            Level::WARN,
            "CHECKPOINT_TEST_LOG_UNSET",
        );

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("Test info message");
            tracing::warn!("Test warning message");
        });

        let contents = std::fs::read_to_string(log_file.path()).unwrap();
        assert!(!contents.contains("Test info message"));
        assert!(contents.contains("Test warning message"));
    }

    // Tests read their own variables instead of RUST_LOG so they run in
    // parallel and ignore the caller's environment.
    #[test]
    fn test_env_directive_lowers_default_level() {
        let var = "CHECKPOINT_TEST_LOG_TRACE";
        std::env::set_var(var, "trace");
        let log_file = NamedTempFile::new().unwrap();
        let subscriber =
            build_subscriber_from_env(Arc::new(log_file.reopen().unwrap()), Level::INFO, var);

        tracing::subscriber::with_default(subscriber, || {
            let mut session = EditSession::new("Hello");
            session.append(" World").unwrap();
            session.checkpoint();
            tracing::trace!("Test trace message");
        });
        std::env::remove_var(var);

        let contents = std::fs::read_to_string(log_file.path()).unwrap();
        assert!(contents.contains("checkpoint #1 at edit 1"));
        assert!(contents.contains("Test trace message"));
    }

    #[test]
    fn test_env_directive_raises_default_level() {
        let var = "CHECKPOINT_TEST_LOG_WARN";
        std::env::set_var(var, "warn");
        let log_file = NamedTempFile::new().unwrap();
        let subscriber =
            build_subscriber_from_env(Arc::new(log_file.reopen().unwrap()), Level::INFO, var);

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("Test info message");
            tracing::warn!("Test warning message");
        });
        std::env::remove_var(var);

        let contents = std::fs::read_to_string(log_file.path()).unwrap();
        assert!(!contents.contains("Test info message"));
        assert!(contents.contains("Test warning message"));
    }

    #[test]
    fn test_unset_env_uses_default_level() {
        let var = "CHECKPOINT_TEST_LOG_UNSET";
        let log_file = NamedTempFile::new().unwrap();
        let subscriber =
            build_subscriber_from_env(Arc::new(log_file.reopen().unwrap()), Level::INFO, var);

        tracing::subscriber::with_default(subscriber, || {
            tracing::debug!("Test debug message");
            tracing::info!("Test info message");
        });

        let contents = std::fs::read_to_string(log_file.path()).unwrap();
        assert!(!contents.contains("Test debug message"));
        assert!(contents.contains("Test info message"));
    }
}
