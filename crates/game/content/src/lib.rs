//! Authored battle content and its loaders.
//!
//! This crate turns data files into the read-only records `tactics-core`
//! consumes:
//! - Terrain surfaces with height maps (RON)
//! - Skill catalogs, with a built-in catalog embedded in the crate (RON)
//! - Unit rosters with stats, loadouts and starting cells (RON)
//! - Battle configuration (TOML)
//!
//! Content never appears in battle state; the core only sees the oracles
//! built from it.

pub mod loaders;

pub use loaders::{
    BattleContent, ConfigLoader, ContentFactory, LoadResult, Roster, RosterEntry, RosterLoader,
    SkillLoader, TerrainLoader,
};
