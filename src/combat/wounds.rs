//! Wound tiers and last-point action penalties
//!
//! The wound tier grades how badly a combatant is hurt overall and is
//! subtracted from hit and avoid rolls. Separately, every part down to its
//! last point costs actions: one per vital part or leg, several per arm.

use serde::{Deserialize, Serialize};

use crate::combat::body_zone::BodyPart;
use crate::combat::combatant::{Combatant, OnePointRemaining};
use crate::combat::target::Target;
use crate::core::config::RulesConfig;

/// Overall wound severity, ascending
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WoundTier {
    #[default]
    None,
    OneOrTwoHits,
    ThreeOrFourHits,
    WoundedInSeveralParts,
    OnePartAtZero,
    SeveralPartsAtZero,
}

impl WoundTier {
    /// Penalty to hit and avoid rolls
    pub fn penalty(self) -> i32 {
        self as i32
    }
}

/// Most severe tier the target has reached
pub fn assess_wound_tier(target: &Target) -> WoundTier {
    let mut wounded = 0;
    let mut at_zero = 0;
    let mut worst_deficit = 0;
    for (_, state) in target.parts() {
        if state.is_wounded() {
            wounded += 1;
            worst_deficit = worst_deficit.max(state.deficit());
        }
        if state.temporary <= 0 {
            at_zero += 1;
        }
    }

    match (at_zero, wounded) {
        (z, _) if z >= 2 => WoundTier::SeveralPartsAtZero,
        (1, _) => WoundTier::OnePartAtZero,
        (_, w) if w >= 2 => WoundTier::WoundedInSeveralParts,
        (_, 1) if worst_deficit >= 3 => WoundTier::ThreeOrFourHits,
        (_, 1) => WoundTier::OneOrTwoHits,
        _ => WoundTier::None,
    }
}

/// Actions lost to parts on their last point
pub fn last_point_penalty(flags: &OnePointRemaining, rules: &RulesConfig) -> i32 {
    flags.count(BodyPart::is_vital)
        + flags.count(BodyPart::is_arm) * rules.incapacitated_arm_action_penalty
        + flags.count(BodyPart::is_leg)
}

/// Recompute wound tier, last-point flags and action allowance
pub fn check_for_wounds(combatants: &mut [Combatant], rules: &RulesConfig) {
    for combatant in combatants {
        combatant.wounds = assess_wound_tier(&combatant.target);
        combatant.one_point_remaining = OnePointRemaining::from_target(&combatant.target);

        let penalty = last_point_penalty(&combatant.one_point_remaining, rules);
        combatant.actions_per_round = (combatant.bonuses.actions_per_round - penalty).max(0);
        combatant.actions_remaining = combatant
            .actions_remaining
            .clamp(0, combatant.actions_per_round);
    }
}
