//! Damage and healing formulas.

use crate::env::SkillDefinition;
use crate::state::Stats;

/// Minimum damage a landed basic attack deals.
pub const MIN_ATTACK_DAMAGE: u32 = 1;

/// Basic attack damage.
///
/// ```text
/// damage = max(attack - defense, 1)
/// ```
pub fn basic_attack_damage(attacker: &Stats, defender: &Stats) -> u32 {
    let raw = i64::from(attacker.attack) - i64::from(defender.defense);
    u32::try_from(raw).unwrap_or(0).max(MIN_ATTACK_DAMAGE)
}

/// What a skill does to a single affected unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillImpact {
    Damage(u32),
    Heal(u32),
    /// Neither formula yields a positive amount.
    Nothing,
}

/// Resolves a skill's effect for a caster.
///
/// ```text
/// raw = round(base_damage + attack * damage_multiplier)
/// raw > 0        => Damage(raw)      (defense is not applied)
/// healing > 0    => Heal(healing)
/// otherwise      => Nothing
/// ```
pub fn skill_impact(skill: &SkillDefinition, caster: &Stats) -> SkillImpact {
    let raw = (skill.base_damage + caster.attack as f32 * skill.damage_multiplier).round();
    if raw >= 1.0 {
        SkillImpact::Damage(raw.min(u32::MAX as f32) as u32)
    } else if skill.healing > 0 {
        SkillImpact::Heal(skill.healing)
    } else {
        SkillImpact::Nothing
    }
}
