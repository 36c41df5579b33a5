//! Stress tiers, burning and the auto-destruct alarm
//!
//! Stress comes from being shot at (graded by how many attackers fired this
//! round) or from a handful of overriding emergencies. The emergencies are
//! sticky: drawing fire never downgrades them.

use serde::{Deserialize, Serialize};

use crate::combat::body_zone::BodyPart;
use crate::combat::combatant::Combatant;
use crate::core::config::RulesConfig;
use crate::core::types::CombatantId;

/// Stress severity, ascending
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StressTier {
    #[default]
    None,
    SomeoneFiresAtYou,
    FiredAtFromSeveralDirections,
    AutoDestructWarning,
    ClothesOnFire,
    FallingTowardCertainDeath,
}

impl StressTier {
    /// Penalty to hit and avoid rolls
    pub fn penalty(self) -> i32 {
        self as i32
    }

    /// Emergencies that gunfire cannot override
    pub fn is_sticky(self) -> bool {
        matches!(
            self,
            StressTier::AutoDestructWarning
                | StressTier::ClothesOnFire
                | StressTier::FallingTowardCertainDeath
        )
    }

    /// Tiers that only last for the round they were earned in
    pub fn is_under_fire(self) -> bool {
        matches!(
            self,
            StressTier::SomeoneFiresAtYou | StressTier::FiredAtFromSeveralDirections
        )
    }

    fn from_attackers(count: usize) -> Self {
        match count {
            0 => StressTier::None,
            1 => StressTier::SomeoneFiresAtYou,
            _ => StressTier::FiredAtFromSeveralDirections,
        }
    }
}

/// Stress as derived from burning and this round's attackers
fn derived_stress(combatant: &Combatant) -> StressTier {
    if combatant.is_burning() {
        StressTier::ClothesOnFire
    } else {
        StressTier::from_attackers(combatant.under_fire_from.len())
    }
}

/// Record `shooter` firing at `target` and re-grade the target's stress
pub fn apply_stress_to_target(target: &mut Combatant, shooter: CombatantId) {
    if target.stress.is_sticky() {
        return;
    }
    target.under_fire_from.insert(shooter);
    target.stress = derived_stress(target);
}

/// Start-of-round reset: forget attackers and drop the per-round tiers
pub fn refresh_stress(combatant: &mut Combatant) {
    combatant.under_fire_from.clear();
    if combatant.stress.is_under_fire() {
        combatant.stress = StressTier::None;
    }
}

pub fn ignite(combatant: &mut Combatant) {
    if !combatant.is_burning() {
        combatant.burning = 1;
    }
    if combatant.stress < StressTier::ClothesOnFire {
        combatant.stress = StressTier::ClothesOnFire;
    }
}

pub fn extinguish(combatant: &mut Combatant) {
    combatant.burning = 0;
    if combatant.stress == StressTier::ClothesOnFire {
        combatant.stress = derived_stress(combatant);
    }
}

/// Raise the countdown warning unless something worse is going on
pub fn sound_alarm(combatant: &mut Combatant) {
    if combatant.stress < StressTier::AutoDestructWarning {
        combatant.stress = StressTier::AutoDestructWarning;
    }
}

pub fn silence_alarm(combatant: &mut Combatant) {
    if combatant.stress == StressTier::AutoDestructWarning {
        combatant.stress = derived_stress(combatant);
    }
}

/// One round of burning; returns body points lost
///
/// Parts under a fire-proof layer are spared until the fire has burned
/// past `fire_protection_rounds`.
pub fn burning_tick(combatant: &mut Combatant, rules: &RulesConfig) -> i32 {
    if !combatant.is_burning() {
        return 0;
    }
    let protection_spent = combatant.burning > rules.fire_protection_rounds;
    let mut lost = 0;
    for part in BodyPart::ALL {
        let state = combatant.target.part_mut(part);
        if protection_spent || !state.is_fireproof() {
            state.temporary -= 1;
            lost += 1;
        }
    }
    combatant.burning = combatant.burning.saturating_add(1);
    tracing::debug!(
        "{} burns for {} points (round {} on fire)",
        combatant.name,
        lost,
        combatant.burning - 1
    );
    lost
}
