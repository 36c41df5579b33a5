//! Melee: one d20 strike at an adjacent target
//!
//! Damage is the offensive bonus plus the mounted attachment's dice, or a
//! die picked by the carried weapon's weight when it is swung as a club.
//! Bare hands roll a d3. The target gets no avoid roll.

use serde::{Deserialize, Serialize};

use crate::combat::actions::outcome::{ActionDetail, AreaHit, RollKind, ShotResult};
use crate::combat::actions::{fumble_actions, situational_penalty, ActionContext, Resolution};
use crate::combat::armor::AttackKind;
use crate::combat::body_zone::BodyPart;
use crate::combat::combatant::Combatant;
use crate::combat::damage::apply_damage_to_body_part;
use crate::combat::weapons::{AmmoType, DamageDice, Weapon};
use crate::core::error::{Result, ValidationError};
use crate::core::table::{BandTable, Upper};

const MELEE_ACTION_COST: i32 = 1;

/// Kilograms → club damage
const CLUB_DAMAGE: BandTable<f32, DamageDice> = BandTable::new(&[
    (Upper::Below(5.0), DamageDice { min: 1, max: 4, added: 0 }),
    (Upper::AtMost(20.0), DamageDice { min: 1, max: 4, added: 1 }),
]);

const HEAVY_CLUB: DamageDice = DamageDice {
    min: 1,
    max: 6,
    added: 0,
};

const UNARMED: DamageDice = DamageDice {
    min: 1,
    max: 3,
    added: 0,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeleeRequest {
    pub target: String,
    pub base_chance: i32,
}

impl MeleeRequest {
    pub fn new(target: impl Into<String>, base_chance: i32) -> Self {
        Self {
            target: target.into(),
            base_chance,
        }
    }
}

/// Dice rolled on top of the offensive bonus
pub fn melee_dice(weapon: Option<&Weapon>) -> DamageDice {
    match weapon {
        None => UNARMED,
        Some(weapon) => match weapon.mounted_melee() {
            Some(attachment) => attachment.damage,
            None => CLUB_DAMAGE.lookup_or_else(&weapon.weight, |_| HEAVY_CLUB),
        },
    }
}

pub fn resolve_melee(
    actor: &mut Combatant,
    target: &mut Combatant,
    request: &MeleeRequest,
    ctx: &mut ActionContext<'_>,
) -> Result<Resolution> {
    if actor.actions_remaining < MELEE_ACTION_COST {
        return Err(ValidationError::NoActionsRemaining(actor.name.clone()).into());
    }

    let chance = request
        .base_chance
        .saturating_sub(situational_penalty(actor, &ctx.environment));
    let dice = melee_dice(actor.main_hand.as_ref());
    let before = actor.actions_remaining;
    actor.spend_actions(MELEE_ACTION_COST);

    let roll = ctx.dice.d20();
    let kind = RollKind::grade(roll, chance);
    let mut strike = ShotResult {
        roll,
        modified_chance: chance,
        kind,
        hits: Vec::new(),
        jam: None,
        actions_lost: 0,
    };

    match kind {
        RollKind::Fumble => {
            let left = fumble_actions(actor.actions_remaining, ctx.dice);
            strike.actions_lost = actor.actions_remaining - left;
            actor.actions_remaining = left;
        }
        RollKind::Hit | RollKind::Critical => {
            let location_roll = ctx.dice.d20();
            let part = BodyPart::melee_hit_location(location_roll);
            let rolled = if kind == RollKind::Critical {
                dice.max_damage()
            } else {
                ctx.dice.damage(dice.min, dice.max, dice.added)
            };
            let raw = (actor.bonuses.offensive + rolled).max(0);
            let report = apply_damage_to_body_part(
                target.target.part_mut(part),
                raw,
                AttackKind::Melee,
                AmmoType::Standard,
                ctx.rules,
                ctx.dice,
            );
            tracing::debug!(
                "{} strikes {} in {:?} for {} ({} absorbed)",
                actor.name,
                target.name,
                part,
                report.net,
                report.absorbed
            );
            strike.hits.push(AreaHit {
                location_roll,
                part,
                avoid: None,
                damage: Some(report),
            });
        }
        RollKind::Miss => {}
    }

    Ok(Resolution {
        actions_spent: before - actor.actions_remaining,
        detail: ActionDetail::Melee {
            target: target.name.clone(),
            strike,
        },
        ammo: None,
    })
}
