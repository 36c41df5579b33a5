//! Action resolution: Shoot, Melee, Reload, Unjam
//!
//! Each resolver checks every precondition against the actor and weapon
//! before touching anything, so an `Err` leaves both combatants exactly as
//! they were. Lifecycle checks (session running, target still standing) and
//! turn advancement live in the session.

pub mod melee;
pub mod outcome;
pub mod reload;
pub mod shoot;
pub mod unjam;

pub use melee::{resolve_melee, MeleeRequest};
pub use outcome::{
    ActionDetail, ActionResult, AmmoState, AreaHit, AvoidOutcome, JamReport, ReloadOutcome,
    RollKind, ShotResult, UnjamOutcome,
};
pub use reload::{resolve_reload, ReloadRequest};
pub use shoot::{resolve_shoot, ShootRequest};
pub use unjam::{resolve_unjam, UnjamRequest};

use crate::combat::body_zone::BodyPart;
use crate::combat::combatant::Combatant;
use crate::combat::dice::Dice;
use crate::combat::environment::Environment;
use crate::combat::weapons::FiringMode;
use crate::core::config::RulesConfig;

/// Everything an action reads besides the combatants
pub struct ActionContext<'a> {
    pub rules: &'a RulesConfig,
    pub environment: Environment,
    pub dice: &'a mut dyn Dice,
}

/// What a resolver did, before the session adds turn bookkeeping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub actions_spent: i32,
    pub detail: ActionDetail,
    pub ammo: Option<AmmoState>,
}

/// Penalty to the actor's hit chance from conditions and injuries
pub fn situational_penalty(actor: &Combatant, environment: &Environment) -> i32 {
    let strength_shortfall = actor
        .main_hand
        .as_ref()
        .map(|w| (w.strength_requirement - actor.attributes.strength).max(0))
        .unwrap_or(0);

    environment.penalty()
        + actor.stress.penalty()
        + actor.wounds.penalty()
        + actor.one_point_remaining.count(BodyPart::is_arm)
        + strength_shortfall
}

/// Fumble: the actor is left with at most a d6 of their remaining actions
pub(crate) fn fumble_actions(actions_remaining: i32, dice: &mut dyn Dice) -> i32 {
    actions_remaining.min(dice.d6()).max(0)
}

/// Target's attempt to dodge one struck area; `None` if not attempted
///
/// Only a combatant who declared avoiding and still has an action can try.
pub(crate) fn avoid_attempt(
    target: &Combatant,
    mode: FiringMode,
    ctx: &mut ActionContext<'_>,
) -> Option<bool> {
    if !target.is_avoiding || target.actions_remaining < 1 {
        return None;
    }
    let mut roll = ctx.dice.d20();
    if mode == FiringMode::AreaSpray {
        roll += ctx.rules.area_spray_avoid_penalty;
    }
    let defence = target.bonuses.defensive
        - target.stress.penalty()
        - target.wounds.penalty()
        - ctx.environment.penalty();
    Some(roll <= ctx.rules.avoid_roll_ceiling && defence >= roll)
}
