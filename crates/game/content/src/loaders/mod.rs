//! Content loaders for reading battle data from files.
//!
//! Each loader parses one RON/TOML format into core types. Parsing from a
//! string is exposed separately from reading a file so embedded data and
//! tests share the same path.

pub mod config;
pub mod factory;
pub mod roster;
pub mod skills;
pub mod terrain;

pub use config::ConfigLoader;
pub use factory::{BattleContent, ContentFactory};
pub use roster::{Roster, RosterEntry, RosterLoader};
pub use skills::SkillLoader;
pub use terrain::TerrainLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
