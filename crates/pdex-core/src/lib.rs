//! pdex-core: catalog types, the favorites store, and the search filter.

pub mod constants;
pub mod favorites;
pub mod filter;
pub mod format;
pub mod paths;
pub mod pokemon;
pub mod resource;
