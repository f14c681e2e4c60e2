//! Unit roster loader.
//!
//! Loads the units taking part in a battle: allegiance, stats, skill
//! loadout (by skill name, resolved against a catalog) and an optional
//! starting cell used during the placement phase.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tactics_core::{
    BattleConfig, BattleState, Cell, Faction, GridPos, SkillCatalog, Stats, SurfaceId, Unit,
    UnitId,
};

use crate::loaders::{LoadResult, read_file};

/// Roster file structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RosterRon {
    units: Vec<UnitRon>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct UnitRon {
    id: u32,
    faction: Faction,
    stats: StatsRon,
    #[serde(default)]
    skills: Vec<String>,
    #[serde(default)]
    placement: Option<PlacementRon>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StatsRon {
    hp: u32,
    attack: i32,
    defense: i32,
    speed: i32,
    #[serde(default = "default_attack_range")]
    attack_range: u32,
    #[serde(default)]
    ap: u32,
    #[serde(default)]
    mp: u32,
}

fn default_attack_range() -> u32 {
    1
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct PlacementRon {
    #[serde(default)]
    surface: u16,
    x: i32,
    z: i32,
}

/// One unit and where it starts.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterEntry {
    pub unit: Unit,
    pub placement: Option<GridPos>,
}

/// Units of one battle in authored order.
///
/// Authored order matters: it breaks turn-order ties.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Roster {
    pub entries: Vec<RosterEntry>,
}

impl Roster {
    /// Builds a fresh battle state holding every unit, none placed yet.
    pub fn state(&self) -> LoadResult<BattleState> {
        let mut state = BattleState::new();
        for entry in &self.entries {
            state.add_unit(entry.unit.clone())?;
        }
        Ok(state)
    }

    /// Authored starting cells, for units that have one.
    pub fn placements(&self) -> impl Iterator<Item = (UnitId, GridPos)> + '_ {
        self.entries
            .iter()
            .filter_map(|entry| entry.placement.map(|pos| (entry.unit.id, pos)))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Loader for unit rosters from RON files.
pub struct RosterLoader;

impl RosterLoader {
    /// Load a roster from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing the unit list
    /// * `skills` - Catalog used to resolve skill names
    ///
    /// # Returns
    ///
    /// Returns the Roster in authored order.
    pub fn load(path: &Path, skills: &SkillCatalog) -> LoadResult<Roster> {
        let content = read_file(path)?;
        Self::parse(&content, skills)
            .map_err(|e| anyhow::anyhow!("Failed to load roster from {}: {}", path.display(), e))
    }

    /// Parse a roster from RON text.
    pub fn parse(content: &str, skills: &SkillCatalog) -> LoadResult<Roster> {
        let data: RosterRon = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse roster RON: {}", e))?;

        let entries = data
            .units
            .into_iter()
            .map(|unit| build_entry(unit, skills))
            .collect::<LoadResult<Vec<_>>>()?;
        Ok(Roster { entries })
    }
}

fn build_entry(data: UnitRon, catalog: &SkillCatalog) -> LoadResult<RosterEntry> {
    let id = UnitId(data.id);
    if data.stats.hp == 0 {
        anyhow::bail!("{} must start with positive HP", id);
    }
    if data.skills.len() > BattleConfig::MAX_SKILLS_PER_UNIT {
        anyhow::bail!(
            "{} lists {} skills (max: {})",
            id,
            data.skills.len(),
            BattleConfig::MAX_SKILLS_PER_UNIT
        );
    }

    let loadout = data
        .skills
        .iter()
        .map(|name| {
            catalog
                .find_by_name(name)
                .map(|skill| skill.id)
                .ok_or_else(|| anyhow::anyhow!("{} uses unknown skill '{}'", id, name))
        })
        .collect::<LoadResult<Vec<_>>>()?;

    let stats = Stats::new(
        data.stats.hp,
        data.stats.attack,
        data.stats.defense,
        data.stats.speed,
    )
    .with_range(data.stats.attack_range)
    .with_ap(data.stats.ap)
    .with_mp(data.stats.mp);

    let placement = data
        .placement
        .map(|p| GridPos::new(SurfaceId(p.surface), Cell::new(p.x, p.z)));

    Ok(RosterEntry {
        unit: Unit::new(id, data.faction, stats).with_skills(loadout),
        placement,
    })
}
