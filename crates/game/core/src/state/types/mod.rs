pub mod common;
pub mod grid;
pub mod turn;
pub mod unit;

pub use common::{CardinalDirection, Cell, GridPos, SurfaceId, UnitId};
pub use grid::GridIndex;
pub use turn::{BattlePhase, BattleResult, TurnState};
pub use unit::{Faction, Stats, Unit};
