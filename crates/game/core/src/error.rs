//! Error classification shared by every error type in the crate.
//!
//! Each subsystem defines its own error enum next to the operations it
//! validates (`ActionError`, `TurnError`, `GridError`, ...). They all
//! implement [`GameError`] so callers can decide how to react without
//! matching on every variant.

/// How a caller should treat a rejected operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ErrorSeverity {
    /// The same intent may succeed later, e.g. once it is the unit's turn.
    Recoverable,
    /// The intent is malformed for the current battle and should not be retried.
    Validation,
    /// Grid index and unit records disagree.
    Internal,
    /// Content handed to the core is unusable.
    Fatal,
}

impl ErrorSeverity {
    pub const fn is_recoverable(self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// True for bugs rather than bad input.
    pub const fn is_internal(self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all tactics-core errors.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier for the variant, e.g. `ACTION_OUT_OF_RANGE`.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
