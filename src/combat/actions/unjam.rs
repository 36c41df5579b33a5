//! Unjam: spend the rest of the turn working the action
//!
//! A natural 1 clears the jam outright. Other successes accumulate until
//! `unjam_successes_required` is reached. The roll never needs an action in
//! hand, but it always ends the actor's turn.

use serde::{Deserialize, Serialize};

use crate::combat::actions::outcome::{ActionDetail, AmmoState, UnjamOutcome};
use crate::combat::actions::{ActionContext, Resolution};
use crate::combat::combatant::Combatant;
use crate::combat::weapons::AmmoType;
use crate::core::error::{Result, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnjamRequest {
    #[serde(default)]
    pub secondary: bool,
    pub base_chance: i32,
}

impl UnjamRequest {
    pub fn new(base_chance: i32) -> Self {
        Self {
            secondary: false,
            base_chance,
        }
    }

    pub fn with_secondary(mut self) -> Self {
        self.secondary = true;
        self
    }
}

pub fn resolve_unjam(
    actor: &mut Combatant,
    request: &UnjamRequest,
    ctx: &mut ActionContext<'_>,
) -> Result<Resolution> {
    let name = actor.name.clone();
    let weapon = actor
        .main_hand
        .as_mut()
        .ok_or_else(|| ValidationError::NoWeapon(name.clone()))?;
    let weapon_name = weapon.name.clone();
    let ammo_type = if request.secondary {
        AmmoType::Standard
    } else {
        weapon.ammo_type
    };
    let profile = weapon
        .mode_mut(request.secondary)
        .ok_or_else(|| ValidationError::NoSecondaryMode(weapon_name.clone()))?;
    if !profile.magazine.jammed {
        return Err(ValidationError::WeaponNotJammed(weapon_name).into());
    }

    let magazine = &mut profile.magazine;
    let roll = ctx.dice.d20();
    let outcome = if roll == 1 {
        magazine.clear_jam();
        UnjamOutcome::Cleared { critical: true }
    } else if roll != 20 && roll <= request.base_chance {
        magazine.unjam_attempts = magazine.unjam_attempts.saturating_add(1);
        if magazine.unjam_attempts >= ctx.rules.unjam_successes_required {
            magazine.clear_jam();
            UnjamOutcome::Cleared { critical: false }
        } else {
            UnjamOutcome::Progress {
                attempts: magazine.unjam_attempts,
            }
        }
    } else {
        UnjamOutcome::NoProgress
    };
    let ammo = AmmoState::of(magazine, request.secondary, ammo_type);

    let spent = actor.actions_remaining.max(0);
    actor.actions_remaining = 0;
    tracing::debug!("{} works {}: {:?} (roll {})", name, weapon_name, outcome, roll);

    Ok(Resolution {
        actions_spent: spent,
        detail: ActionDetail::Unjam { roll, outcome },
        ammo: Some(ammo),
    })
}
