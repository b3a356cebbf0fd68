//! Data directory resolution.

use std::env;
use std::path::PathBuf;

use crate::constants::{DATA_DIR_NAME, ENV_HOME};

/// Resolve the pdex data directory: `$PDEX_HOME` when set and
/// non-blank, otherwise `$HOME/.pdex`.
pub fn data_dir() -> Result<PathBuf, String> {
    if let Ok(dir) = env::var(ENV_HOME) {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    env::var("HOME")
        .map(|home| PathBuf::from(home).join(DATA_DIR_NAME))
        .map_err(|_| "failed to get home directory".to_string())
}
