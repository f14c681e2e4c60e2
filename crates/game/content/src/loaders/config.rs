//! Battle configuration loader.

use std::path::Path;

use tactics_core::BattleConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for battle configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the TOML file containing BattleConfig
    ///
    /// # Returns
    ///
    /// Returns a BattleConfig. Keys absent from the file keep their defaults.
    pub fn load(path: &Path) -> LoadResult<BattleConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse config data from TOML text.
    pub fn parse(content: &str) -> LoadResult<BattleConfig> {
        let config: BattleConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.faction_bias.is_nan() || config.climb_threshold.is_nan() {
            anyhow::bail!("Config values must be numbers");
        }
        if config.max_climb_height.is_nan() || config.max_climb_height < 0.0 {
            anyhow::bail!(
                "max_climb_height must be non-negative, got {}",
                config.max_climb_height
            );
        }
        Ok(config)
    }
}
