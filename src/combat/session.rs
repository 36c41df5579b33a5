//! Combat session state machine
//!
//! Idle → InProgress on `start`, back to Idle on `end_combat`. While in
//! progress the session owns the roster: active combatants, the defeated
//! list and the turn order, all keyed by `CombatantId`.
//!
//! Every action runs the same tail: resolver, wound check, defeat sweep,
//! turn advance.

use serde::{Deserialize, Serialize};

use crate::combat::actions::{
    resolve_melee, resolve_reload, resolve_shoot, resolve_unjam, ActionContext, ActionResult,
    MeleeRequest, ReloadRequest, Resolution, ShootRequest, UnjamRequest,
};
use crate::combat::body_zone::BodyPart;
use crate::combat::combatant::Combatant;
use crate::combat::defeat::sweep_defeated;
use crate::combat::dice::{Dice, SeededDice};
use crate::combat::environment::Environment;
use crate::combat::initiative::{roll_initiative, InitiativeEntry};
use crate::combat::stress::{
    burning_tick, extinguish, ignite, refresh_stress, silence_alarm, sound_alarm,
};
use crate::combat::wounds::check_for_wounds;
use crate::core::config::RulesConfig;
use crate::core::error::{Result, StateError, ValidationError};
use crate::core::types::{CombatantId, Round};

/// Body points lost to fire at the top of a round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BurnReport {
    pub name: String,
    pub points_lost: i32,
}

/// What happened while the round turned over
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundReport {
    pub round: Round,
    pub burns: Vec<BurnReport>,
    pub defeated: Vec<String>,
}

pub struct CombatSession {
    round: Round,
    active: Vec<Combatant>,
    defeated: Vec<Combatant>,
    turn_order: Vec<InitiativeEntry>,
    current: Option<CombatantId>,
    in_progress: bool,
    rules: RulesConfig,
    dice: Box<dyn Dice>,
}

impl CombatSession {
    pub fn new(rules: RulesConfig, dice: Box<dyn Dice>) -> Self {
        Self {
            round: 1,
            active: Vec::new(),
            defeated: Vec::new(),
            turn_order: Vec::new(),
            current: None,
            in_progress: false,
            rules,
            dice,
        }
    }

    /// Session on ChaCha8 dice seeded with `seed`
    pub fn with_seed(rules: RulesConfig, seed: u64) -> Self {
        Self::new(rules, Box::new(SeededDice::from_seed(seed)))
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Take ownership of `roster` and roll the first round's initiative
    pub fn start(&mut self, roster: Vec<Combatant>) -> Result<()> {
        if self.in_progress {
            return Err(StateError::AlreadyInProgress.into());
        }
        if roster.is_empty() {
            return Err(ValidationError::EmptyRoster.into());
        }
        for (i, c) in roster.iter().enumerate() {
            if roster[..i].iter().any(|other| other.name == c.name) {
                return Err(ValidationError::DuplicateName(c.name.clone()).into());
            }
        }

        self.active = roster;
        for c in &mut self.active {
            c.target.restore();
            refresh_stress(c);
        }
        check_for_wounds(&mut self.active, &self.rules);
        for c in &mut self.active {
            c.refresh_actions();
        }

        self.round = 1;
        self.defeated.clear();
        self.turn_order = roll_initiative(&self.active, self.dice.as_mut());
        self.current = self.turn_order.first().map(|e| e.combatant);
        self.in_progress = true;

        tracing::info!(
            "Combat started with {} combatants, {} acts first",
            self.active.len(),
            self.current_actor().map(|c| c.name.as_str()).unwrap_or("nobody")
        );
        Ok(())
    }

    pub fn next_round(&mut self) -> Result<RoundReport> {
        self.ensure_in_progress()?;
        let mut defeated = self.settle();
        self.round += 1;

        let mut burns = Vec::new();
        for c in &mut self.active {
            if c.is_burning() {
                let points_lost = burning_tick(c, &self.rules);
                burns.push(BurnReport {
                    name: c.name.clone(),
                    points_lost,
                });
            }
        }
        if !burns.is_empty() {
            defeated.extend(self.settle());
        }

        self.turn_order = roll_initiative(&self.active, self.dice.as_mut());
        for c in &mut self.active {
            refresh_stress(c);
        }
        check_for_wounds(&mut self.active, &self.rules);
        for c in &mut self.active {
            c.refresh_actions();
        }
        self.current = self.turn_order.first().map(|e| e.combatant);

        tracing::info!("Round {} begins ({} standing)", self.round, self.active.len());
        Ok(RoundReport {
            round: self.round,
            burns,
            defeated,
        })
    }

    pub fn end_combat(&mut self) -> Result<()> {
        self.ensure_in_progress()?;
        self.active.clear();
        self.defeated.clear();
        self.turn_order.clear();
        self.current = None;
        self.round = 1;
        self.in_progress = false;
        tracing::info!("Combat ended");
        Ok(())
    }

    /// Pass the turn on if the current actor is out of actions
    ///
    /// Moves exactly one slot, wrapping past the end of the order.
    pub fn advance_turn(&mut self) -> Result<()> {
        self.ensure_in_progress()?;
        self.step_turn();
        Ok(())
    }

    // ------------------------------------------------------------------
    // Actions (always taken by the current actor)
    // ------------------------------------------------------------------

    pub fn shoot(&mut self, request: &ShootRequest, environment: Environment) -> Result<ActionResult> {
        self.ensure_in_progress()?;
        let (actor_idx, target_idx) = self.actor_and_target(&request.target)?;
        let (actor, target) = pair_mut(&mut self.active, actor_idx, target_idx);
        let mut ctx = ActionContext {
            rules: &self.rules,
            environment,
            dice: self.dice.as_mut(),
        };
        let resolution = resolve_shoot(actor, target, request, &mut ctx)?;
        Ok(self.finish_action(actor_idx, resolution))
    }

    pub fn melee(&mut self, request: &MeleeRequest, environment: Environment) -> Result<ActionResult> {
        self.ensure_in_progress()?;
        let (actor_idx, target_idx) = self.actor_and_target(&request.target)?;
        let (actor, target) = pair_mut(&mut self.active, actor_idx, target_idx);
        let mut ctx = ActionContext {
            rules: &self.rules,
            environment,
            dice: self.dice.as_mut(),
        };
        let resolution = resolve_melee(actor, target, request, &mut ctx)?;
        Ok(self.finish_action(actor_idx, resolution))
    }

    pub fn reload(&mut self, request: &ReloadRequest) -> Result<ActionResult> {
        self.ensure_in_progress()?;
        let actor_idx = self.actor_index()?;
        let mut ctx = ActionContext {
            rules: &self.rules,
            environment: Environment::default(),
            dice: self.dice.as_mut(),
        };
        let resolution = resolve_reload(&mut self.active[actor_idx], request, &mut ctx)?;
        Ok(self.finish_action(actor_idx, resolution))
    }

    pub fn unjam(&mut self, request: &UnjamRequest) -> Result<ActionResult> {
        self.ensure_in_progress()?;
        let actor_idx = self.actor_index()?;
        let mut ctx = ActionContext {
            rules: &self.rules,
            environment: Environment::default(),
            dice: self.dice.as_mut(),
        };
        let resolution = resolve_unjam(&mut self.active[actor_idx], request, &mut ctx)?;
        Ok(self.finish_action(actor_idx, resolution))
    }

    // ------------------------------------------------------------------
    // Referee controls
    // ------------------------------------------------------------------

    pub fn ignite(&mut self, name: &str) -> Result<()> {
        self.ensure_in_progress()?;
        let c = self.named_mut(name)?;
        ignite(c);
        tracing::info!("{} catches fire", name);
        Ok(())
    }

    pub fn extinguish(&mut self, name: &str) -> Result<()> {
        self.ensure_in_progress()?;
        extinguish(self.named_mut(name)?);
        Ok(())
    }

    pub fn sound_alarm(&mut self) -> Result<()> {
        self.ensure_in_progress()?;
        self.active.iter_mut().for_each(sound_alarm);
        tracing::info!("Auto-destruct alarm sounding");
        Ok(())
    }

    pub fn silence_alarm(&mut self) -> Result<()> {
        self.ensure_in_progress()?;
        self.active.iter_mut().for_each(silence_alarm);
        Ok(())
    }

    pub fn set_avoiding(&mut self, name: &str, avoiding: bool) -> Result<()> {
        self.ensure_in_progress()?;
        self.named_mut(name)?.is_avoiding = avoiding;
        Ok(())
    }

    pub fn set_in_cover(&mut self, name: &str, in_cover: bool) -> Result<()> {
        self.ensure_in_progress()?;
        self.named_mut(name)?.in_cover = in_cover;
        Ok(())
    }

    /// Take points straight off one part, bypassing armor
    ///
    /// Returns the names of anyone defeated as a result.
    pub fn apply_manual_damage(
        &mut self,
        name: &str,
        part: BodyPart,
        damage: i32,
    ) -> Result<Vec<String>> {
        self.ensure_in_progress()?;
        let state = self.named_mut(name)?.target.part_mut(part);
        state.temporary = state.temporary.saturating_sub(damage).min(state.maximum());
        tracing::info!("{} takes {} manual damage to {:?}", name, damage, part);
        Ok(self.settle())
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn round(&self) -> Round {
        self.round
    }

    pub fn is_in_progress(&self) -> bool {
        self.in_progress
    }

    pub fn active(&self) -> &[Combatant] {
        &self.active
    }

    pub fn defeated(&self) -> &[Combatant] {
        &self.defeated
    }

    pub fn turn_order(&self) -> &[InitiativeEntry] {
        &self.turn_order
    }

    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    pub fn current_actor(&self) -> Option<&Combatant> {
        let id = self.current?;
        self.active.iter().find(|c| c.id == id)
    }

    pub fn find(&self, name: &str) -> Option<&Combatant> {
        self.active
            .iter()
            .chain(self.defeated.iter())
            .find(|c| c.name == name)
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn ensure_in_progress(&self) -> Result<()> {
        if self.in_progress {
            Ok(())
        } else {
            Err(StateError::NotInProgress.into())
        }
    }

    fn actor_index(&self) -> Result<usize> {
        let id = self.current.ok_or(StateError::NotInProgress)?;
        self.active
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| StateError::NotInProgress.into())
    }

    fn actor_and_target(&self, target: &str) -> Result<(usize, usize)> {
        let actor_idx = self.actor_index()?;
        let target_idx = match self.active.iter().position(|c| c.name == target) {
            Some(idx) => idx,
            None if self.defeated.iter().any(|c| c.name == target) => {
                return Err(StateError::TargetDefeated(target.to_string()).into());
            }
            None => return Err(ValidationError::InvalidTarget(target.to_string()).into()),
        };
        if target_idx == actor_idx {
            return Err(ValidationError::InvalidTarget(target.to_string()).into());
        }
        Ok((actor_idx, target_idx))
    }

    fn named_mut(&mut self, name: &str) -> Result<&mut Combatant> {
        if let Some(idx) = self.active.iter().position(|c| c.name == name) {
            return Ok(&mut self.active[idx]);
        }
        if self.defeated.iter().any(|c| c.name == name) {
            return Err(StateError::TargetDefeated(name.to_string()).into());
        }
        Err(ValidationError::UnknownCombatant(name.to_string()).into())
    }

    fn current_position(&self) -> Option<usize> {
        let id = self.current?;
        self.turn_order.iter().position(|e| e.combatant == id)
    }

    /// Wound check and defeat sweep; keeps the current actor valid
    fn settle(&mut self) -> Vec<String> {
        let position = self.current_position();
        check_for_wounds(&mut self.active, &self.rules);
        let fallen = sweep_defeated(&mut self.active, &mut self.turn_order, &mut self.defeated);

        if self.current_position().is_none() {
            // The current actor fell; whoever slid into their slot is up
            self.current = match (position, self.turn_order.len()) {
                (_, 0) => None,
                (Some(p), len) => Some(self.turn_order[p % len].combatant),
                (None, _) => self.turn_order.first().map(|e| e.combatant),
            };
        }
        fallen
    }

    fn step_turn(&mut self) {
        let Some(position) = self.current_position() else {
            return;
        };
        let spent = self
            .current_actor()
            .map_or(true, |c| c.actions_remaining <= 0);
        if spent {
            let next = (position + 1) % self.turn_order.len();
            self.current = Some(self.turn_order[next].combatant);
        }
    }

    fn finish_action(&mut self, actor_idx: usize, resolution: Resolution) -> ActionResult {
        let actor_id = self.active[actor_idx].id;
        let actor = self.active[actor_idx].name.clone();

        let defeated = self.settle();
        let actions_remaining = self
            .active
            .iter()
            .find(|c| c.id == actor_id)
            .map_or(0, |c| c.actions_remaining);
        self.step_turn();

        ActionResult {
            actor,
            actions_spent: resolution.actions_spent,
            actions_remaining,
            detail: resolution.detail,
            ammo: resolution.ammo,
            defeated,
            next_actor: self.current_actor().map(|c| c.name.clone()),
        }
    }
}

/// Two distinct elements of a slice, both mutable
fn pair_mut<T>(items: &mut [T], a: usize, b: usize) -> (&mut T, &mut T) {
    debug_assert_ne!(a, b);
    if a < b {
        let (left, right) = items.split_at_mut(b);
        (&mut left[a], &mut right[0])
    } else {
        let (left, right) = items.split_at_mut(a);
        (&mut right[0], &mut left[b])
    }
}
