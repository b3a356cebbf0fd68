//! Environment and storage constants.

/// Overrides the data directory (default `~/.pdex`).
pub const ENV_HOME: &str = "PDEX_HOME";

/// Data directory created under `$HOME` when `PDEX_HOME` is unset.
pub const DATA_DIR_NAME: &str = ".pdex";

/// Single durable record holding the favorites array.
pub const FAVORITES_FILE: &str = "favorites.json";
