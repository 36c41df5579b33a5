//! Structured action results
//!
//! Everything an action did, in the order it happened. No narrative: a
//! presentation layer can build prose from these records.

use serde::{Deserialize, Serialize};

use crate::combat::body_zone::BodyPart;
use crate::combat::damage::DamageReport;
use crate::combat::weapons::{AmmoType, Magazine};

/// How a d20 attack roll came out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RollKind {
    Hit,
    /// Natural 1: maximum damage, hits regardless of chance
    Critical,
    Miss,
    /// Natural 20
    Fumble,
}

impl RollKind {
    /// Grade a d20 attack roll against the modified chance
    pub fn grade(roll: i32, chance: i32) -> Self {
        match roll {
            1 => RollKind::Critical,
            20 => RollKind::Fumble,
            r if r <= chance => RollKind::Hit,
            _ => RollKind::Miss,
        }
    }

    pub fn is_hit(self) -> bool {
        matches!(self, RollKind::Hit | RollKind::Critical)
    }
}

/// Outcome of the target's attempt to dodge one struck area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AvoidOutcome {
    /// Hit cancelled
    Avoided,
    /// Shotgun spread: half damage gets through anyway
    Grazed,
    Failed,
}

/// One body area struck by a hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaHit {
    pub location_roll: i32,
    pub part: BodyPart,
    pub avoid: Option<AvoidOutcome>,
    /// `None` when the hit was avoided outright
    pub damage: Option<DamageReport>,
}

/// Jam caused by a fumble
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JamReport {
    pub severity_roll: i32,
    pub severe: bool,
}

/// One attack roll and everything that followed from it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShotResult {
    pub roll: i32,
    pub modified_chance: i32,
    pub kind: RollKind,
    pub hits: Vec<AreaHit>,
    pub jam: Option<JamReport>,
    /// Actions lost to a fumble
    pub actions_lost: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReloadOutcome {
    Reloaded { rounds_loaded: u32 },
    /// Natural 20: fumbled the magazine, nothing loaded
    MagazineDropped,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnjamOutcome {
    Cleared { critical: bool },
    Progress { attempts: u16 },
    NoProgress,
}

/// Action-specific part of an `ActionResult`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionDetail {
    Shoot {
        target: String,
        shots: Vec<ShotResult>,
    },
    /// Empty magazine: aim cost spent, nothing fired
    OutOfAmmo,
    Melee {
        target: String,
        strike: ShotResult,
    },
    Reload {
        roll: i32,
        outcome: ReloadOutcome,
    },
    Unjam {
        roll: i32,
        outcome: UnjamOutcome,
    },
}

/// Magazine state after the action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmmoState {
    pub secondary: bool,
    pub current: u32,
    pub capacity: u32,
    pub jammed: bool,
    pub ammo_type: AmmoType,
}

impl AmmoState {
    pub fn of(magazine: &Magazine, secondary: bool, ammo_type: AmmoType) -> Self {
        Self {
            secondary,
            current: magazine.current,
            capacity: magazine.capacity,
            jammed: magazine.jammed,
            ammo_type,
        }
    }
}

/// Full record of one resolved action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResult {
    pub actor: String,
    pub actions_spent: i32,
    pub actions_remaining: i32,
    pub detail: ActionDetail,
    pub ammo: Option<AmmoState>,
    /// Combatants defeated as a consequence of this action
    pub defeated: Vec<String>,
    /// Whose turn it is now
    pub next_actor: Option<String>,
}
