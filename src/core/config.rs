//! Rule configuration with documented constants
//!
//! All tunable numbers of the combat rules are collected here with an
//! explanation of where they bite. Defaults reproduce the printed ruleset.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::error::ConfigError;

/// How a fumble's d10 is compared against the weapon's jamming factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JamSeverityRule {
    /// Severe when `d10 >= jamming_factor`
    AtLeast,
    /// Severe when `d10 > jamming_factor`
    Above,
}

impl JamSeverityRule {
    pub fn is_severe(self, roll: i32, jamming_factor: i32) -> bool {
        match self {
            JamSeverityRule::AtLeast => roll >= jamming_factor,
            JamSeverityRule::Above => roll > jamming_factor,
        }
    }
}

/// Configuration for the combat rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    // === ARMOR ===
    /// Effective armor above this value absorbs the excess deterministically
    ///
    /// Only the first `guaranteed_absorb_threshold` points of armor are
    /// subject to the d10 absorb roll; anything above always absorbs.
    pub guaranteed_absorb_threshold: i32,

    // === FIRING ===
    /// Hit chance lost per round fired in a rapid volley
    pub rapid_volley_penalty_per_shot: i32,

    /// Body areas struck by a shotgun hit, regardless of multi-hit count
    pub shotgun_hit_areas: u32,

    /// Comparison used to grade a fumble's jam
    pub jam_severity: JamSeverityRule,

    // === UNJAMMING ===
    /// Cumulative successful unjam rolls needed to clear a jam
    ///
    /// A natural 1 clears the jam immediately regardless of this count.
    pub unjam_successes_required: u16,

    // === AVOIDING ===
    /// An avoid roll above this value always fails
    pub avoid_roll_ceiling: i32,

    /// Added to the avoid roll when dodging an area spray
    pub area_spray_avoid_penalty: i32,

    // === STATUS ===
    /// Actions lost per arm left with a single body point
    pub incapacitated_arm_action_penalty: i32,

    /// Burning rounds after which fire-proof armor stops protecting
    pub fire_protection_rounds: u16,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            guaranteed_absorb_threshold: 10,
            rapid_volley_penalty_per_shot: 2,
            shotgun_hit_areas: 2,
            jam_severity: JamSeverityRule::AtLeast,
            unjam_successes_required: 3,
            avoid_roll_ceiling: 10,
            area_spray_avoid_penalty: 3,
            incapacitated_arm_action_penalty: 5,
            fire_protection_rounds: 10,
        }
    }
}

impl RulesConfig {
    /// Parse rules from TOML; missing keys keep their defaults
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Load rules from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }
}
