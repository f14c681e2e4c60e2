//! Automated turn control.
//!
//! A [`TurnPolicy`] decides which units the engine plays by itself and what
//! they do when their turn starts. The engine resolves the decision through
//! the same validation path as player intents, then ends the turn.

use crate::env::BattleEnv;
use crate::state::{BattleState, Faction, Unit, UnitId};

/// What an automated unit does with its turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Decision {
    Attack(UnitId),
    Pass,
}

/// Replaceable decision maker for automated turns.
pub trait TurnPolicy: Send + Sync {
    /// Whether the engine plays `unit`'s turns itself.
    fn controls(&self, unit: &Unit) -> bool;

    /// Chooses an action for `unit`, whose turn has just started.
    fn decide(&self, state: &BattleState, env: &BattleEnv<'_>, unit: UnitId) -> Decision;
}

/// Automates nothing; every turn waits for external intents. Install it with
/// [`BattleEngine::with_policy`](crate::BattleEngine::with_policy) to opt out
/// of the default enemy automation.
#[derive(Clone, Copy, Debug, Default)]
pub struct ManualPolicy;

impl TurnPolicy for ManualPolicy {
    fn controls(&self, _unit: &Unit) -> bool {
        false
    }

    fn decide(&self, _state: &BattleState, _env: &BattleEnv<'_>, _unit: UnitId) -> Decision {
        Decision::Pass
    }
}

/// Attacks the nearest living opponent when it looks close enough, else passes.
///
/// "Close enough" is straight-line world distance, in cells, within
/// `attack_range * ai_range_factor`. This deliberately approximates the grid
/// rules; an attack that then fails validation simply forfeits the turn.
#[derive(Clone, Copy, Debug)]
pub struct NearestTargetPolicy {
    faction: Faction,
}

impl NearestTargetPolicy {
    /// Drives every unit of `faction`.
    pub const fn new(faction: Faction) -> Self {
        Self { faction }
    }

    /// Nearest living opponent of `unit` and its distance in cells.
    ///
    /// Ties go to the opponent listed first in the roster.
    pub fn nearest_opponent(
        state: &BattleState,
        env: &BattleEnv<'_>,
        unit: UnitId,
    ) -> Option<(UnitId, f32)> {
        let me = state.unit(unit)?;
        let pos = me.position?;
        let surface = env.terrain().surface(pos.surface)?;
        let (x, z) = surface.world_xz(pos.cell);

        state
            .living(me.faction.opponent())
            .filter_map(|other| {
                let (ox, oz) = env.terrain().world_xz(other.position?)?;
                let cells = (ox - x).hypot(oz - z) / surface.cell_size();
                Some((other.id, cells))
            })
            .fold(None, |best: Option<(UnitId, f32)>, candidate| match best {
                Some(b) if b.1 <= candidate.1 => Some(b),
                _ => Some(candidate),
            })
    }
}

impl Default for NearestTargetPolicy {
    fn default() -> Self {
        Self::new(Faction::Enemy)
    }
}

impl TurnPolicy for NearestTargetPolicy {
    fn controls(&self, unit: &Unit) -> bool {
        unit.faction == self.faction
    }

    fn decide(&self, state: &BattleState, env: &BattleEnv<'_>, unit: UnitId) -> Decision {
        let Some(me) = state.unit(unit) else {
            return Decision::Pass;
        };
        let reach = me
            .stats
            .attack_range
            .saturating_mul(env.config().ai_range_factor) as f32;

        match Self::nearest_opponent(state, env, unit) {
            Some((target, distance)) if distance <= reach => Decision::Attack(target),
            _ => Decision::Pass,
        }
    }
}
