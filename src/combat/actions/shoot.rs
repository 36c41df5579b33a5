//! Shoot: aim, draw ammunition, roll each shot
//!
//! Dice order per shot: d20 attack. On a fumble, d10 jam severity then d6
//! for the actions kept, and the action ends. On a hit, the struck-area
//! count (unless fixed), then per area: d20 location, damage roll (skipped
//! on a critical), d20 avoid when the target is dodging, block rolls and
//! the d10 absorb roll.

use serde::{Deserialize, Serialize};

use crate::combat::actions::outcome::{
    ActionDetail, AmmoState, AreaHit, AvoidOutcome, JamReport, RollKind, ShotResult,
};
use crate::combat::actions::{
    avoid_attempt, fumble_actions, situational_penalty, ActionContext, Resolution,
};
use crate::combat::aiming::{aim_adjustment, AimType};
use crate::combat::ammo;
use crate::combat::armor::AttackKind;
use crate::combat::body_zone::BodyPart;
use crate::combat::combatant::Combatant;
use crate::combat::damage::apply_damage_to_body_part;
use crate::combat::stress::apply_stress_to_target;
use crate::combat::weapons::{AmmoType, DamageDice, FiringMode};
use crate::core::error::{Result, ValidationError};

/// Parameters of a Shoot action; the actor is whoever's turn it is
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShootRequest {
    pub target: String,
    pub firing_mode: FiringMode,
    pub aim: AimType,
    #[serde(default)]
    pub secondary: bool,
    /// Distance to the target in squares
    pub range: f64,
    pub base_chance: i32,
}

impl ShootRequest {
    pub fn new(target: impl Into<String>, firing_mode: FiringMode, base_chance: i32) -> Self {
        Self {
            target: target.into(),
            firing_mode,
            aim: AimType::Uncontrolled,
            secondary: false,
            range: 5.0,
            base_chance,
        }
    }

    pub fn aimed(mut self, aim: AimType, range: f64) -> Self {
        self.aim = aim;
        self.range = range;
        self
    }

    pub fn with_secondary(mut self) -> Self {
        self.secondary = true;
        self
    }
}

/// Fixed properties of the firing profile for the duration of one action
struct Salvo {
    mode: FiringMode,
    damage: DamageDice,
    ammo_type: AmmoType,
    shotgun: bool,
}

/// Resolve a Shoot from `actor` at `target`
pub fn resolve_shoot(
    actor: &mut Combatant,
    target: &mut Combatant,
    request: &ShootRequest,
    ctx: &mut ActionContext<'_>,
) -> Result<Resolution> {
    let name = actor.name.clone();
    if actor.actions_remaining <= 0 {
        return Err(ValidationError::NoActionsRemaining(name).into());
    }
    if !request.range.is_finite() || request.range < 0.0 {
        return Err(ValidationError::InvalidRange(request.range.to_string()).into());
    }
    let situational = situational_penalty(actor, &ctx.environment);
    let actor_id = actor.id;
    let remaining = actor.actions_remaining;

    let weapon = actor
        .main_hand
        .as_mut()
        .ok_or_else(|| ValidationError::NoWeapon(name.clone()))?;

    let aim = match request.firing_mode {
        FiringMode::AreaSpray => AimType::Uncontrolled,
        _ => request.aim,
    };
    let adjustment = aim_adjustment(aim, weapon.sights.laser_sight, request.range);
    let shotgun = weapon.is_shotgun();
    let ammo_type = if request.secondary {
        AmmoType::Standard
    } else {
        weapon.ammo_type
    };
    let weapon_name = weapon.name.clone();

    let profile = weapon
        .mode_mut(request.secondary)
        .ok_or_else(|| ValidationError::NoSecondaryMode(weapon_name.clone()))?;
    if !profile.functionality.allows(request.firing_mode) {
        return Err(ValidationError::FiringModeNotAllowed {
            mode: request.firing_mode,
            functionality: profile.functionality,
        }
        .into());
    }
    if profile.magazine.jammed {
        return Err(ValidationError::WeaponJammed(weapon_name).into());
    }
    if adjustment.action_cost > remaining {
        return Err(ValidationError::InsufficientActions {
            name,
            required: adjustment.action_cost,
            remaining,
        }
        .into());
    }

    // Validation done; from here on the action happens.
    actor.actions_remaining = (remaining - adjustment.action_cost).max(0);

    if profile.magazine.is_empty() {
        tracing::debug!("{} pulls the trigger on an empty magazine", name);
        return Ok(Resolution {
            actions_spent: adjustment.action_cost,
            detail: ActionDetail::OutOfAmmo,
            ammo: Some(AmmoState::of(&profile.magazine, request.secondary, ammo_type)),
        });
    }

    let draw = ammo::draw(
        &mut profile.magazine,
        request.firing_mode,
        ctx.rules.rapid_volley_penalty_per_shot,
    );
    let chance = request
        .base_chance
        .saturating_add(adjustment.chance_modifier)
        .saturating_sub(draw.chance_penalty)
        .saturating_sub(situational);
    apply_stress_to_target(target, actor_id);

    let salvo = Salvo {
        mode: request.firing_mode,
        damage: profile.damage,
        ammo_type,
        shotgun,
    };
    let multiple_hits = profile.multiple_hits;
    let jamming_factor = profile.jamming_factor;

    let mut shots = Vec::with_capacity(draw.shots as usize);
    for _ in 0..draw.shots {
        let roll = ctx.dice.d20();
        let kind = RollKind::grade(roll, chance);
        let mut shot = ShotResult {
            roll,
            modified_chance: chance,
            kind,
            hits: Vec::new(),
            jam: None,
            actions_lost: 0,
        };

        match kind {
            RollKind::Fumble => {
                let severity_roll = ctx.dice.d10();
                let severe = ctx.rules.jam_severity.is_severe(severity_roll, jamming_factor);
                let before = actor.actions_remaining;
                actor.actions_remaining = fumble_actions(before, ctx.dice);
                shot.actions_lost = before - actor.actions_remaining;
                shot.jam = Some(JamReport {
                    severity_roll,
                    severe,
                });
                profile.magazine.jam();
                tracing::debug!("{} fumbles and jams {}", name, weapon_name);
                shots.push(shot);
                break;
            }
            RollKind::Miss => {
                shots.push(shot);
                if matches!(salvo.mode, FiringMode::Burst | FiringMode::FullAuto) {
                    break;
                }
            }
            RollKind::Hit | RollKind::Critical => {
                let areas = if salvo.shotgun {
                    ctx.rules.shotgun_hit_areas
                } else {
                    ctx.dice.target_areas(multiple_hits)
                };
                for _ in 0..areas {
                    shot.hits
                        .push(strike_area(target, &salvo, kind == RollKind::Critical, ctx));
                }
                shots.push(shot);
            }
        }
    }

    tracing::debug!(
        "{} fires {} shot(s) at {} (chance {})",
        name,
        shots.len(),
        target.name,
        chance
    );

    Ok(Resolution {
        actions_spent: remaining - actor.actions_remaining,
        detail: ActionDetail::Shoot {
            target: target.name.clone(),
            shots,
        },
        ammo: Some(AmmoState::of(&profile.magazine, request.secondary, ammo_type)),
    })
}

/// Locate, roll damage, let the target dodge, then run the damage model
fn strike_area(
    target: &mut Combatant,
    salvo: &Salvo,
    critical: bool,
    ctx: &mut ActionContext<'_>,
) -> AreaHit {
    let location_roll = ctx.dice.d20();
    let part = BodyPart::ranged_hit_location(location_roll);
    let mut raw = if critical {
        salvo.damage.max_damage()
    } else {
        ctx.dice
            .damage(salvo.damage.min, salvo.damage.max, salvo.damage.added)
    };

    let avoid = avoid_attempt(target, salvo.mode, ctx).map(|dodged| match (dodged, salvo.shotgun) {
        (true, true) => AvoidOutcome::Grazed,
        (true, false) => AvoidOutcome::Avoided,
        (false, _) => AvoidOutcome::Failed,
    });
    match avoid {
        Some(AvoidOutcome::Avoided) => {
            return AreaHit {
                location_roll,
                part,
                avoid,
                damage: None,
            };
        }
        Some(AvoidOutcome::Grazed) => raw /= 2,
        _ => {}
    }

    let report = apply_damage_to_body_part(
        target.target.part_mut(part),
        raw,
        AttackKind::Ranged,
        salvo.ammo_type,
        ctx.rules,
        ctx.dice,
    );
    tracing::debug!(
        "{} hit in {:?}: {} raw, {} absorbed, {} taken",
        target.name,
        part,
        report.raw,
        report.absorbed,
        report.net
    );

    AreaHit {
        location_roll,
        part,
        avoid,
        damage: Some(report),
    }
}
