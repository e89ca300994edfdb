//! Shared helpers for the integration tests.

use std::{fs, path::PathBuf};

use log::LevelFilter;
use tempfile::TempDir;

/// Logs will appear only when you run with `-- --nocapture`
/// or when the test fails.
pub fn init_test_logging() {
    let _ = env_logger::Builder::from_default_env()
        .filter_level(LevelFilter::Debug)
        .is_test(true)
        .try_init();
}

/// Writes `contents` to a `servers` file inside a fresh temp dir.
/// Keep the returned `TempDir` alive for as long as the path is used.
pub fn servers_file(contents: &str) -> anyhow::Result<(TempDir, PathBuf)> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("servers");
    fs::write(&path, contents)?;
    Ok((dir, path))
}
