//! Traits describing read-only battle data.
//!
//! Oracles expose static terrain geometry and skill definitions. The
//! [`BattleEnv`] aggregate bundles them with the battle configuration so the
//! engine receives every collaborator explicitly at construction.
mod error;
mod skills;
mod terrain;

pub use error::OracleError;
pub use skills::{SkillCatalog, SkillDefinition, SkillEffect, SkillId, SkillOracle, TargetKind};
pub use terrain::{GridBounds, Surface, Terrain, TerrainOracle};

use crate::config::BattleConfig;

/// Aggregates the read-only collaborators required by the engine.
#[derive(Clone, Copy)]
pub struct BattleEnv<'a> {
    terrain: &'a dyn TerrainOracle,
    skills: &'a dyn SkillOracle,
    config: &'a BattleConfig,
}

impl<'a> BattleEnv<'a> {
    pub fn new(
        terrain: &'a dyn TerrainOracle,
        skills: &'a dyn SkillOracle,
        config: &'a BattleConfig,
    ) -> Self {
        Self {
            terrain,
            skills,
            config,
        }
    }

    pub fn terrain(&self) -> &'a dyn TerrainOracle {
        self.terrain
    }

    pub fn skills(&self) -> &'a dyn SkillOracle {
        self.skills
    }

    pub fn config(&self) -> &'a BattleConfig {
        self.config
    }

    /// Looks up a skill definition.
    pub fn skill(&self, id: SkillId) -> Result<&'a SkillDefinition, OracleError> {
        self.skills.skill(id).ok_or(OracleError::UnknownSkill(id))
    }
}

impl core::fmt::Debug for BattleEnv<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BattleEnv")
            .field("config", self.config)
            .finish_non_exhaustive()
    }
}
