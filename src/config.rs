//! Environment-driven settings shared by the binaries.

use anyhow::{Result, bail};
use std::{
    env, fs,
    path::{Path, PathBuf},
};
use tracing_subscriber::EnvFilter;

pub const ENV_EXTENSIONS_DIR: &str = "CMDCONTRIB_EXTENSIONS_DIR";
pub const ENV_LOG: &str = "CMDCONTRIB_LOG";
const EXTENSIONS_DIR_NAME: &str = "extensions";
const DEFAULT_LOG_FILTER: &str = "warn";

fn extensions_dir_from_hint(hint: &str) -> Option<PathBuf> {
    if hint.is_empty() {
        return None;
    }
    let hint_path = PathBuf::from(hint);
    if !hint_path.is_dir() {
        return None;
    }
    fs::canonicalize(hint_path).ok()
}

fn search_upwards(start: &Path) -> Option<PathBuf> {
    let mut dir = fs::canonicalize(start).ok()?;
    loop {
        let candidate = dir.join(EXTENSIONS_DIR_NAME);
        if candidate.is_dir() {
            return Some(candidate);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}

/// Locate the directory holding installed extensions.
///
/// An explicit path wins, then `CMDCONTRIB_EXTENSIONS_DIR`, then the nearest
/// `extensions/` directory above the current directory.
pub fn find_extensions_dir(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        if !path.is_dir() {
            bail!("extensions directory {} does not exist", path.display());
        }
        return Ok(path.to_path_buf());
    }

    if let Ok(hint) = env::var(ENV_EXTENSIONS_DIR) {
        if let Some(dir) = extensions_dir_from_hint(&hint) {
            return Ok(dir);
        }
    }

    if let Ok(cwd) = env::current_dir() {
        if let Some(dir) = search_upwards(&cwd) {
            return Ok(dir);
        }
    }

    bail!(
        "Unable to locate an extensions directory. Pass --extensions-dir or set {ENV_EXTENSIONS_DIR}."
    );
}

/// Install a stderr `tracing` subscriber filtered by `CMDCONTRIB_LOG`.
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_env(ENV_LOG).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
