//! Tracing subscriber setup.
//!
//! The terminal owns stdout, so diagnostics go to a log file. Filtering is
//! environment-based (RUST_LOG) with an INFO default.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize the global subscriber with file logging.
pub fn init_global(log_file_path: &Path) -> Result<()> {
    let log_file = File::create(log_file_path)
        .with_context(|| format!("creating log file {}", log_file_path.display()))?;
    build_subscriber(log_file).init();
    Ok(())
}

/// Core subscriber configuration, shared with tests.
pub fn build_subscriber(log_file: File) -> impl tracing::Subscriber + Send + Sync {
    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_ansi(false)
        .with_writer(Arc::new(log_file));

    tracing_subscriber::registry().with(fmt_layer).with(env_filter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_subscriber_writes_to_file() {
        let log_file = NamedTempFile::new().unwrap();
        let subscriber = build_subscriber(log_file.reopen().unwrap());

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("hello from the test");
        });

        let contents = std::fs::read_to_string(log_file.path()).unwrap();
        assert!(contents.contains("hello from the test"));
    }
}
