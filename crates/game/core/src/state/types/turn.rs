use super::UnitId;

/// Top-level battle phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum BattlePhase {
    /// Units are being placed; no turns run.
    #[default]
    Placement,
    /// Units act one at a time in turn order.
    Combat,
    /// Terminal. No further turn operations are accepted.
    BattleEnd,
}

/// Outcome of a finished battle, from the player side's point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum BattleResult {
    Victory,
    Defeat,
}

/// Turn scheduler state.
///
/// # Invariants
///
/// - While `phase == Combat` and `order` is non-empty, `index < order.len()`.
/// - `order` only holds living units.
/// - `current` is the unit at `order[index]` unless it was removed this turn,
///   in which case `current_removed` is set and `order[index]` is its successor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnState {
    pub phase: BattlePhase,

    /// Deterministic acting order of living units.
    pub order: Vec<UnitId>,

    /// Index of the active unit within `order`.
    pub index: usize,

    /// The unit whose turn is active.
    pub current: Option<UnitId>,

    /// Set when the active unit left the order mid-turn.
    pub current_removed: bool,

    /// Number of completed turns since combat began.
    pub turn_count: u64,

    /// Monotonic counter incremented by every committed intent.
    pub nonce: u64,

    /// Set once the battle has ended.
    pub result: Option<BattleResult>,
}

impl TurnState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_combat(&self) -> bool {
        self.phase == BattlePhase::Combat
    }

    /// Removes `unit` from the order, keeping `index` on the same logical position.
    ///
    /// Returns false if the unit was not in the order.
    pub fn remove(&mut self, unit: UnitId) -> bool {
        let Some(pos) = self.order.iter().position(|&u| u == unit) else {
            return false;
        };
        self.order.remove(pos);

        if pos < self.index {
            self.index -= 1;
        } else if pos == self.index && self.current == Some(unit) {
            self.current_removed = true;
        }

        if self.index >= self.order.len() {
            self.index = 0;
        }
        true
    }

    /// Index of the unit that acts after the current one.
    pub fn next_index(&self) -> usize {
        if self.order.is_empty() {
            return 0;
        }
        if self.current_removed {
            self.index % self.order.len()
        } else {
            (self.index + 1) % self.order.len()
        }
    }
}
