use thiserror::Error;

use crate::combat::weapons::{FiringMode, WeaponFunctionality};

/// A request that can never succeed as issued: bad target, wrong weapon,
/// disallowed firing mode, not enough actions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Roster is empty")]
    EmptyRoster,

    #[error("Duplicate combatant name: {0}")]
    DuplicateName(String),

    #[error("{0} has run out of actions")]
    NoActionsRemaining(String),

    #[error("{name} needs {required} actions but has {remaining}")]
    InsufficientActions {
        name: String,
        required: i32,
        remaining: i32,
    },

    #[error("{0} is not carrying a weapon")]
    NoWeapon(String),

    #[error("Weapon {0} has no secondary firing mode equipped")]
    NoSecondaryMode(String),

    #[error("Invalid target: {0}")]
    InvalidTarget(String),

    #[error("Range must be a finite distance of zero or more squares, got {0}")]
    InvalidRange(String),

    #[error("Firing mode {mode:?} not allowed for {functionality:?} weapons")]
    FiringModeNotAllowed {
        mode: FiringMode,
        functionality: WeaponFunctionality,
    },

    #[error("Weapon {0} is jammed")]
    WeaponJammed(String),

    #[error("Weapon {0} is not jammed")]
    WeaponNotJammed(String),

    #[error("{0} has no usable arm")]
    ArmsIncapacitated(String),

    #[error("Unknown combatant: {0}")]
    UnknownCombatant(String),
}

/// The session is in the wrong lifecycle state for the request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("No combat in progress")]
    NotInProgress,

    #[error("Combat is already in progress")]
    AlreadyInProgress,

    #[error("{0} has already been defeated")]
    TargetDefeated(String),
}

/// Every non-fatal failure an engine call can report.
///
/// Both variants guarantee the session was left untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CombatError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    State(#[from] StateError),
}

pub type Result<T> = std::result::Result<T, CombatError>;

/// Failures while loading rules or scenario files.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Unknown weapon in scenario: {0}")]
    UnknownWeapon(String),

    #[error("Unknown armor in scenario: {0}")]
    UnknownArmor(String),

    #[error("Invalid scenario: {0}")]
    InvalidScenario(String),
}
