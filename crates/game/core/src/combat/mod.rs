//! Combat formulas.
//!
//! Pure, side-effect free functions used by the action resolver. Nothing in
//! here touches battle state.

pub mod damage;

pub use damage::{SkillImpact, basic_attack_damage, skill_impact};
