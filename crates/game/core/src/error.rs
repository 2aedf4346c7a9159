//! Common error infrastructure for tactics-core.
//!
//! Two domain error kinds exist:
//!
//! - [`InvalidAction`]: an attempted action breaks a game rule. The action is
//!   rejected, nothing is mutated, and the caller may try something else.
//! - [`DeadCharacter`]: a participant was reduced to 0 HP. This is a signal
//!   carried inside damage reports and events, never an `Err`.
//!
//! Setup-time failures (placing rosters on the board) use [`SetupError`].

use crate::state::{Position, Side};

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the action was rejected; the same turn may continue
/// - **Validation**: malformed request (unknown id or slot), fix the input
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    Recoverable,
    Validation,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Common trait for all tactics-core errors.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Useful for metrics and for asserting on error kinds in tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// An attempted action violates a game rule.
///
/// State is unchanged whenever one of these is returned.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvalidAction {
    #[error("character does not exist")]
    UnknownCharacter,

    #[error("{name} is dead and cannot act")]
    DeadActor { name: String },

    #[error("action requires a target")]
    MissingTarget,

    #[error("target {name} is already dead")]
    DeadTarget { name: String },

    #[error("{name} cannot target itself")]
    SelfTarget { name: String },

    #[error("{name} is on the same side")]
    FriendlyTarget { name: String },

    #[error("target is {distance} tiles away, range is {range}")]
    OutOfRange { distance: u32, range: u32 },

    #[error("destination {destination} is out of bounds")]
    OutOfBounds { destination: Position },

    #[error("destination {destination} is occupied")]
    Occupied { destination: Position },

    #[error("destination is {distance} tiles away, movement allowance is {allowance}")]
    TooFar { distance: u32, allowance: u32 },

    #[error("path is blocked at {at}")]
    PathBlocked { at: Position },

    #[error("no ability in slot {slot}")]
    UnknownAbility { slot: usize },

    #[error("ability needs {required} mana, {available} available")]
    InsufficientMana { required: u32, available: u32 },

    #[error("{name} is already alive")]
    AlreadyAlive { name: String },
}

impl GameError for InvalidAction {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownCharacter | Self::UnknownAbility { .. } => ErrorSeverity::Validation,
            _ => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownCharacter => "UNKNOWN_CHARACTER",
            Self::DeadActor { .. } => "DEAD_ACTOR",
            Self::MissingTarget => "MISSING_TARGET",
            Self::DeadTarget { .. } => "DEAD_TARGET",
            Self::SelfTarget { .. } => "SELF_TARGET",
            Self::FriendlyTarget { .. } => "FRIENDLY_TARGET",
            Self::OutOfRange { .. } => "OUT_OF_RANGE",
            Self::OutOfBounds { .. } => "OUT_OF_BOUNDS",
            Self::Occupied { .. } => "OCCUPIED",
            Self::TooFar { .. } => "TOO_FAR",
            Self::PathBlocked { .. } => "PATH_BLOCKED",
            Self::UnknownAbility { .. } => "UNKNOWN_ABILITY",
            Self::InsufficientMana { .. } => "INSUFFICIENT_MANA",
            Self::AlreadyAlive { .. } => "ALREADY_ALIVE",
        }
    }
}

/// A participant was reduced to 0 HP.
///
/// Informational: the fatal damage has already been applied when this is
/// produced.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{name} ({side}) has fallen")]
pub struct DeadCharacter {
    pub name: String,
    pub side: Side,
}

/// Errors raised while populating rosters before a battle starts.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    #[error("{side} roster already has a character named {name}")]
    DuplicateName { side: Side, name: String },

    #[error("starting position {position} is out of bounds")]
    OutOfBounds { position: Position },

    #[error("starting position {position} is already occupied")]
    Occupied { position: Position },
}

impl GameError for SetupError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateName { .. } => "DUPLICATE_NAME",
            Self::OutOfBounds { .. } => "SETUP_OUT_OF_BOUNDS",
            Self::Occupied { .. } => "SETUP_OCCUPIED",
        }
    }
}
