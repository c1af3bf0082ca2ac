//! Shared plumbing for the `maze` and `fuzz` binaries.

pub mod ascii;
pub mod config_file;

use std::io;

use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "info";

/// Logs go to stderr so stdout stays clean for maze output.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}
