//! Content factory for building battle inputs from data files.

use std::path::{Path, PathBuf};

use tactics_core::{BattleConfig, BattleState, SkillCatalog, Terrain};

use crate::loaders::{ConfigLoader, LoadResult, Roster, RosterLoader, SkillLoader, TerrainLoader};

/// Everything needed to start one battle.
#[derive(Debug, Clone)]
pub struct BattleContent {
    pub config: BattleConfig,
    pub skills: SkillCatalog,
    pub terrain: Terrain,
    pub roster: Roster,
}

impl BattleContent {
    /// Fresh battle state for the roster, in the placement phase.
    pub fn initial_state(&self) -> LoadResult<BattleState> {
        self.roster.state()
    }
}

/// Content factory that loads battle content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml      (optional; defaults otherwise)
/// ├── skills.ron       (optional; built-in catalog otherwise)
/// ├── maps/
/// │   └── ridge.ron
/// └── rosters/
///     └── skirmish.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    ///
    /// # Arguments
    ///
    /// * `data_dir` - Path to the directory containing data files
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load battle configuration from `config.toml`, or the defaults if absent.
    pub fn load_config(&self) -> LoadResult<BattleConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            return Ok(BattleConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the skill catalog from `skills.ron`, or the built-in one if absent.
    pub fn load_skills(&self) -> LoadResult<SkillCatalog> {
        let path = self.data_dir.join("skills.ron");
        if !path.exists() {
            return SkillLoader::builtin();
        }
        SkillLoader::load(&path)
    }

    /// Load terrain from `maps/{map_name}.ron`.
    ///
    /// # Arguments
    ///
    /// * `map_name` - Name of the map file (without `.ron` extension)
    pub fn load_terrain(&self, map_name: &str) -> LoadResult<Terrain> {
        let path = self.data_dir.join("maps").join(format!("{}.ron", map_name));
        TerrainLoader::load(&path)
    }

    /// Load a roster from `rosters/{roster_name}.ron`.
    ///
    /// # Arguments
    ///
    /// * `roster_name` - Name of the roster file (without `.ron` extension)
    /// * `skills` - Catalog used to resolve skill names (load via `load_skills()`)
    pub fn load_roster(&self, roster_name: &str, skills: &SkillCatalog) -> LoadResult<Roster> {
        let path = self
            .data_dir
            .join("rosters")
            .join(format!("{}.ron", roster_name));
        RosterLoader::load(&path, skills)
    }

    /// Load config, skills, a map and a roster in one go.
    ///
    /// Every authored placement must land on ground in the loaded terrain.
    pub fn load_battle(&self, map_name: &str, roster_name: &str) -> LoadResult<BattleContent> {
        use tactics_core::TerrainOracle;

        let config = self.load_config()?;
        let skills = self.load_skills()?;
        let terrain = self.load_terrain(map_name)?;
        let roster = self.load_roster(roster_name, &skills)?;

        for (unit, pos) in roster.placements() {
            if !terrain.has_ground(pos) {
                anyhow::bail!(
                    "{} starts at {} which has no ground in map '{}'",
                    unit,
                    pos,
                    map_name
                );
            }
        }

        Ok(BattleContent {
            config,
            skills,
            terrain,
            roster,
        })
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
