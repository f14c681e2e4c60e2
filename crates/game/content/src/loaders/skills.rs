//! Skill catalog loader.
//!
//! A catalog file is a RON list of skill definitions. The crate embeds a
//! built-in catalog so a battle can run without any data directory.

use std::path::Path;

use tactics_core::{SkillCatalog, SkillDefinition};

use crate::loaders::{LoadResult, read_file};

/// Loader for skill catalogs from RON files.
pub struct SkillLoader;

impl SkillLoader {
    /// Load a skill catalog from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing a list of SkillDefinitions
    ///
    /// # Returns
    ///
    /// Returns a SkillCatalog. Duplicate ids are an error.
    pub fn load(path: &Path) -> LoadResult<SkillCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to load skills from {}: {}", path.display(), e))
    }

    /// Parse a skill catalog from RON text.
    pub fn parse(content: &str) -> LoadResult<SkillCatalog> {
        let definitions: Vec<SkillDefinition> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse skill catalog RON: {}", e))?;

        for skill in &definitions {
            if !skill.base_damage.is_finite() || !skill.damage_multiplier.is_finite() {
                anyhow::bail!("Skill '{}' has a non-finite damage formula", skill.name);
            }
        }

        Ok(SkillCatalog::from_definitions(definitions)?)
    }

    /// The catalog embedded in this crate.
    pub fn builtin() -> LoadResult<SkillCatalog> {
        let builtin_ron = include_str!("../../data/skills.ron");
        Self::parse(builtin_ron).map_err(|e| anyhow::anyhow!("Failed to parse skills.ron: {}", e))
    }
}
