//! Unit state: identity, allegiance, stats and per-turn bookkeeping.

use arrayvec::ArrayVec;

use super::{GridPos, UnitId};
use crate::config::BattleConfig;
use crate::env::SkillId;

/// Unit allegiance.
///
/// Allegiance decides turn-order bias, legal targets, movement blocking and
/// which side the default enemy policy drives.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Faction {
    Player,
    Enemy,
}

impl Faction {
    pub fn is_hostile_to(self, other: Faction) -> bool {
        self != other
    }

    pub fn opponent(self) -> Faction {
        match self {
            Faction::Player => Faction::Enemy,
            Faction::Enemy => Faction::Player,
        }
    }
}

/// Combat statistics and per-turn resources.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stats {
    pub max_hp: u32,
    pub current_hp: u32,
    pub attack: i32,
    pub defense: i32,
    pub speed: i32,
    /// Basic-attack reach in Manhattan cells.
    pub attack_range: u32,
    pub max_ap: u32,
    pub current_ap: u32,
    pub max_mp: u32,
    pub current_mp: u32,
}

impl Stats {
    /// Creates a stat block with every current value at its maximum.
    pub fn new(max_hp: u32, attack: i32, defense: i32, speed: i32) -> Self {
        Self {
            max_hp,
            current_hp: max_hp,
            attack,
            defense,
            speed,
            attack_range: 1,
            max_ap: 0,
            current_ap: 0,
            max_mp: 0,
            current_mp: 0,
        }
    }

    pub fn with_range(mut self, attack_range: u32) -> Self {
        self.attack_range = attack_range;
        self
    }

    pub fn with_ap(mut self, max_ap: u32) -> Self {
        self.max_ap = max_ap;
        self.current_ap = max_ap;
        self
    }

    pub fn with_mp(mut self, max_mp: u32) -> Self {
        self.max_mp = max_mp;
        self.current_mp = max_mp;
        self
    }

    /// Restores AP and MP to their maxima.
    pub fn refresh(&mut self) {
        self.current_ap = self.max_ap;
        self.current_mp = self.max_mp;
    }
}

impl Default for Stats {
    fn default() -> Self {
        Self::new(10, 1, 0, 1).with_ap(1).with_mp(3)
    }
}

/// A combatant.
///
/// Owned by [`crate::state::BattleState`]; the grid index and turn order refer
/// to it only by [`UnitId`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Unit {
    pub id: UnitId,
    pub faction: Faction,
    pub stats: Stats,
    /// Recorded grid position. `None` before placement and after defeat.
    pub position: Option<GridPos>,
    /// Skills this unit may cast.
    pub skills: ArrayVec<SkillId, { BattleConfig::MAX_SKILLS_PER_UNIT }>,
    /// Whether the unit has used its basic attack this turn.
    pub has_attacked: bool,
}

impl Unit {
    pub fn new(id: UnitId, faction: Faction, stats: Stats) -> Self {
        Self {
            id,
            faction,
            stats,
            position: None,
            skills: ArrayVec::new(),
            has_attacked: false,
        }
    }

    /// Adds skills to the loadout, ignoring any beyond capacity.
    pub fn with_skills(mut self, skills: impl IntoIterator<Item = SkillId>) -> Self {
        for skill in skills {
            if self.skills.try_push(skill).is_err() {
                break;
            }
        }
        self
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.stats.current_hp > 0
    }

    pub fn knows_skill(&self, skill: SkillId) -> bool {
        self.skills.contains(&skill)
    }

    /// Whether the unit has nothing left to do this turn.
    pub fn is_exhausted(&self) -> bool {
        self.has_attacked && self.stats.current_ap == 0 && self.stats.current_mp == 0
    }

    /// Applies damage, returning the amount actually removed.
    pub(crate) fn take_damage(&mut self, amount: u32) -> u32 {
        let applied = amount.min(self.stats.current_hp);
        self.stats.current_hp -= applied;
        applied
    }

    /// Applies healing capped at max HP, returning the amount actually restored.
    pub(crate) fn heal(&mut self, amount: u32) -> u32 {
        let missing = self.stats.max_hp.saturating_sub(self.stats.current_hp);
        let applied = amount.min(missing);
        self.stats.current_hp += applied;
        applied
    }
}
