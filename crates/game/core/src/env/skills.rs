//! Skill definitions and the read-only catalog oracle.
//!
//! Skills are authored outside the core and handed over as immutable
//! records; nothing in the simulation mutates them.

use std::collections::BTreeMap;

use crate::env::OracleError;

/// Catalog key of a skill definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillId(pub u16);

impl core::fmt::Display for SkillId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "skill:{}", self.0)
    }
}

/// What a skill may be aimed at.
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
pub enum TargetKind {
    /// A living unit hostile to the caster.
    Enemy,
    /// A living unit on the caster's side, the caster included.
    Ally,
    /// Any living unit.
    AnyUnit,
    /// The caster only.
    #[strum(to_string = "self", serialize = "self_only")]
    #[cfg_attr(feature = "serde", serde(alias = "Self"))]
    SelfOnly,
    /// A cell with ground; an occupant is optional.
    Ground,
    /// A cell with ground; every unit within the skill's radius is affected.
    Area,
}

impl TargetKind {
    /// Whether the target must be a unit rather than a cell.
    pub fn requires_unit(self) -> bool {
        matches!(
            self,
            TargetKind::Enemy | TargetKind::Ally | TargetKind::AnyUnit | TargetKind::SelfOnly
        )
    }
}

/// Special-cased behaviour layered on top of the damage/heal formula.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillEffect {
    /// Damage or heal the target(s).
    #[default]
    Standard,
    /// Relocate the caster next to the target, then damage it.
    Charge,
}

/// Immutable skill record.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillDefinition {
    pub id: SkillId,
    pub name: String,
    pub target: TargetKind,
    /// Maximum Manhattan distance from caster to target cell.
    pub range: u32,
    pub ap_cost: u32,
    pub base_damage: f32,
    /// Applied to the caster's attack stat.
    pub damage_multiplier: f32,
    pub healing: u32,
    /// Radius of `Area` skills in Manhattan cells.
    #[cfg_attr(feature = "serde", serde(default = "SkillDefinition::default_radius"))]
    pub area_radius: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effect: SkillEffect,
}

impl SkillDefinition {
    const fn default_radius() -> u32 {
        1
    }

    pub fn new(id: SkillId, name: impl Into<String>, target: TargetKind) -> Self {
        Self {
            id,
            name: name.into(),
            target,
            range: 1,
            ap_cost: 0,
            base_damage: 0.0,
            damage_multiplier: 0.0,
            healing: 0,
            area_radius: Self::default_radius(),
            effect: SkillEffect::Standard,
        }
    }

    pub fn with_range(mut self, range: u32) -> Self {
        self.range = range;
        self
    }

    pub fn with_cost(mut self, ap_cost: u32) -> Self {
        self.ap_cost = ap_cost;
        self
    }

    pub fn with_damage(mut self, base_damage: f32, multiplier: f32) -> Self {
        self.base_damage = base_damage;
        self.damage_multiplier = multiplier;
        self
    }

    pub fn with_healing(mut self, healing: u32) -> Self {
        self.healing = healing;
        self
    }

    pub fn with_radius(mut self, radius: u32) -> Self {
        self.area_radius = radius;
        self
    }

    pub fn with_effect(mut self, effect: SkillEffect) -> Self {
        self.effect = effect;
        self
    }

    pub fn is_charge(&self) -> bool {
        self.effect == SkillEffect::Charge
    }
}

/// Read-only skill catalog.
pub trait SkillOracle: Send + Sync {
    fn skill(&self, id: SkillId) -> Option<&SkillDefinition>;
}

/// In-memory catalog keyed by [`SkillId`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SkillCatalog {
    skills: BTreeMap<SkillId, SkillDefinition>,
}

impl SkillCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog, rejecting duplicate ids.
    pub fn from_definitions(
        definitions: impl IntoIterator<Item = SkillDefinition>,
    ) -> Result<Self, OracleError> {
        let mut catalog = Self::new();
        for definition in definitions {
            catalog.insert(definition)?;
        }
        Ok(catalog)
    }

    pub fn insert(&mut self, definition: SkillDefinition) -> Result<(), OracleError> {
        if self.skills.contains_key(&definition.id) {
            return Err(OracleError::DuplicateSkill(definition.id));
        }
        self.skills.insert(definition.id, definition);
        Ok(())
    }

    pub fn find_by_name(&self, name: &str) -> Option<&SkillDefinition> {
        self.skills.values().find(|s| s.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SkillDefinition> + '_ {
        self.skills.values()
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

impl SkillOracle for SkillCatalog {
    fn skill(&self, id: SkillId) -> Option<&SkillDefinition> {
        self.skills.get(&id)
    }
}
