//! Deterministic tactical combat simulation.
//!
//! `tactics-core` decides whose turn it is, what a unit may legally do and
//! what happens when it acts: terrain and grid occupancy, movement
//! reachability, turn order, and resolution of attacks and skills. It owns
//! no rendering, input devices or file formats; collaborators submit intents
//! and read back state and [`BattleEvent`]s.
//!
//! All state mutation flows through [`engine::BattleEngine`].
pub mod action;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod event;
pub mod policy;
pub mod reachability;
pub mod session;
pub mod state;

pub use action::{
    ActionError, ActionOutcome, ActionTransition, AttackAction, HpChange, Intent, MoveAction,
    Resource, SkillAction, Target, UnitEffect,
};
pub use config::BattleConfig;
pub use engine::{BattleEngine, TransitionPhase, TurnError, compute_turn_order};
pub use env::{
    BattleEnv, GridBounds, OracleError, SkillCatalog, SkillDefinition, SkillEffect, SkillId,
    SkillOracle, Surface, TargetKind, Terrain, TerrainOracle,
};
pub use error::{ErrorSeverity, GameError};
pub use event::BattleEvent;
pub use policy::{Decision, ManualPolicy, NearestTargetPolicy, TurnPolicy};
pub use reachability::{ClimbRules, Passage, ReachQuery, ReachableSet};
pub use session::{InputEvent, Session, SessionController, SessionOutcome};
pub use state::{
    BattlePhase, BattleResult, BattleState, CardinalDirection, Cell, Faction, GridError,
    GridIndex, GridPos, Stats, StateError, SurfaceId, TurnState, Unit, UnitId,
};
