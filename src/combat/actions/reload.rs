//! Reload: one d20 against the base chance
//!
//! The reloading time is spent whatever the roll. Shotguns load a single
//! shell per action; everything else takes a fresh magazine.

use serde::{Deserialize, Serialize};

use crate::combat::actions::outcome::{ActionDetail, AmmoState, ReloadOutcome};
use crate::combat::actions::{ActionContext, Resolution};
use crate::combat::combatant::Combatant;
use crate::combat::weapons::AmmoType;
use crate::core::error::{Result, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReloadRequest {
    #[serde(default)]
    pub secondary: bool,
    /// Ammunition loaded into the primary magazine; keeps the current type
    /// when absent
    #[serde(default)]
    pub ammo_type: Option<AmmoType>,
    pub base_chance: i32,
}

impl ReloadRequest {
    pub fn new(base_chance: i32) -> Self {
        Self {
            secondary: false,
            ammo_type: None,
            base_chance,
        }
    }

    pub fn with_ammo(mut self, ammo_type: AmmoType) -> Self {
        self.ammo_type = Some(ammo_type);
        self
    }

    pub fn with_secondary(mut self) -> Self {
        self.secondary = true;
        self
    }
}

pub fn resolve_reload(
    actor: &mut Combatant,
    request: &ReloadRequest,
    ctx: &mut ActionContext<'_>,
) -> Result<Resolution> {
    let name = actor.name.clone();
    if actor.actions_remaining <= 0 {
        return Err(ValidationError::NoActionsRemaining(name).into());
    }
    if !actor.target.has_working_arm() {
        return Err(ValidationError::ArmsIncapacitated(name).into());
    }
    let remaining = actor.actions_remaining;

    let weapon = actor
        .main_hand
        .as_mut()
        .ok_or_else(|| ValidationError::NoWeapon(name.clone()))?;
    let shotgun = weapon.is_shotgun();
    let weapon_name = weapon.name.clone();
    let ammo_type = weapon.ammo_type;

    let profile = weapon
        .mode(request.secondary)
        .ok_or_else(|| ValidationError::NoSecondaryMode(weapon_name.clone()))?;
    let reloading_time = profile.reloading_time;
    if reloading_time > remaining {
        return Err(ValidationError::InsufficientActions {
            name,
            required: reloading_time,
            remaining,
        }
        .into());
    }
    if profile.magazine.jammed {
        return Err(ValidationError::WeaponJammed(weapon_name).into());
    }

    let roll = ctx.dice.d20();
    let loaded_type = match (request.secondary, request.ammo_type) {
        (false, Some(chosen)) => chosen,
        (false, None) => ammo_type,
        (true, _) => AmmoType::Standard,
    };

    let outcome = if roll == 20 {
        ReloadOutcome::MagazineDropped
    } else if roll <= request.base_chance {
        if !request.secondary {
            weapon.ammo_type = loaded_type;
        }
        let rounds_loaded = weapon
            .mode_mut(request.secondary)
            .map(|profile| {
                let magazine = &mut profile.magazine;
                let before = magazine.current;
                if shotgun && !request.secondary {
                    magazine.load_round();
                } else {
                    magazine.refill();
                }
                magazine.current - before
            })
            .unwrap_or(0);
        ReloadOutcome::Reloaded { rounds_loaded }
    } else {
        ReloadOutcome::Failed
    };
    actor.actions_remaining = (remaining - reloading_time).max(0);

    tracing::debug!("{} reloads {}: {:?} (roll {})", name, weapon_name, outcome, roll);

    let ammo = actor
        .main_hand
        .as_ref()
        .and_then(|w| w.mode(request.secondary).map(|p| (w, p)))
        .map(|(w, p)| {
            let shown = if request.secondary {
                AmmoType::Standard
            } else {
                w.ammo_type
            };
            AmmoState::of(&p.magazine, request.secondary, shown)
        });

    Ok(Resolution {
        actions_spent: reloading_time,
        detail: ActionDetail::Reload { roll, outcome },
        ammo,
    })
}
