/// Battle configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleConfig {
    /// Added to a Player-faction unit's speed when computing turn order.
    /// Also breaks speed ties in favour of the player side.
    pub faction_bias: f32,

    /// Cells higher than this can only be entered from a neighbour within
    /// `max_climb_height` of the target height.
    pub climb_threshold: f32,

    /// Largest height difference a unit can scale in one step.
    pub max_climb_height: f32,

    /// Enemy policy engages when the nearest player is within
    /// `attack_range * ai_range_factor` straight-line cells.
    pub ai_range_factor: u32,

    /// When true, a charge whose destination and every fallback cell are
    /// unavailable fails with `NoLegalDestination` instead of striking in place.
    pub charge_requires_destination: bool,

    /// End the active unit's turn once it has attacked and spent all AP and MP.
    pub auto_end_turn: bool,
}

impl BattleConfig {
    // ===== compile-time constants =====
    /// Maximum number of units on the battlefield.
    pub const MAX_UNITS: usize = 64;
    /// Maximum number of skills a single unit can carry.
    pub const MAX_SKILLS_PER_UNIT: usize = 8;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_FACTION_BIAS: f32 = 0.1;
    pub const DEFAULT_CLIMB_THRESHOLD: f32 = 1.0;
    pub const DEFAULT_MAX_CLIMB_HEIGHT: f32 = 1.0;
    pub const DEFAULT_AI_RANGE_FACTOR: u32 = 2;

    pub fn new() -> Self {
        Self {
            faction_bias: Self::DEFAULT_FACTION_BIAS,
            climb_threshold: Self::DEFAULT_CLIMB_THRESHOLD,
            max_climb_height: Self::DEFAULT_MAX_CLIMB_HEIGHT,
            ai_range_factor: Self::DEFAULT_AI_RANGE_FACTOR,
            charge_requires_destination: false,
            auto_end_turn: true,
        }
    }

    pub fn with_faction_bias(mut self, faction_bias: f32) -> Self {
        self.faction_bias = faction_bias;
        self
    }

    pub fn with_climb(mut self, threshold: f32, max_height: f32) -> Self {
        self.climb_threshold = threshold;
        self.max_climb_height = max_height;
        self
    }

    pub fn with_auto_end_turn(mut self, enabled: bool) -> Self {
        self.auto_end_turn = enabled;
        self
    }

    pub fn with_strict_charge(mut self, enabled: bool) -> Self {
        self.charge_requires_destination = enabled;
        self
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}
