//! Service facade over a single combat session
//!
//! Every mutating call takes the write lock for its whole duration, so two
//! actions never interleave. Queries share the read lock and always see a
//! state between actions.

pub mod catalog;
pub mod roster;
pub mod scenario;
pub mod snapshot;

pub use catalog::{InMemoryCatalog, WeaponCatalog};
pub use roster::{CharacterRoster, Roster};
pub use scenario::{CombatantSheet, Scenario};
pub use snapshot::{CombatantStats, SessionSummary, StatsSnapshot, TurnEntry};

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::combat::actions::{ActionResult, MeleeRequest, ReloadRequest, ShootRequest, UnjamRequest};
use crate::combat::body_zone::BodyPart;
use crate::combat::environment::Environment;
use crate::combat::session::CombatSession;
use crate::core::error::{Result, StateError};

pub struct CombatService {
    session: RwLock<CombatSession>,
    environment: RwLock<Environment>,
}

impl CombatService {
    pub fn new(session: CombatSession, environment: Environment) -> Self {
        Self {
            session: RwLock::new(session),
            environment: RwLock::new(environment),
        }
    }

    // Poisoned locks are recovered; the session holds whatever the last
    // completed step wrote.
    fn read(&self) -> RwLockReadGuard<'_, CombatSession> {
        self.session.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, CombatSession> {
        self.session.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn environment(&self) -> Environment {
        *self.environment.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_environment(&self, environment: Environment) {
        *self.environment.write().unwrap_or_else(PoisonError::into_inner) = environment;
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    pub fn start_session(&self, roster: &dyn CharacterRoster) -> Result<SessionSummary> {
        let mut session = self.write();
        session.start(roster.snapshot())?;
        Ok(SessionSummary::of(&session))
    }

    pub fn next_round(&self) -> Result<SessionSummary> {
        let mut session = self.write();
        let report = session.next_round()?;
        Ok(SessionSummary::of(&session).with_round_report(report))
    }

    pub fn end_combat(&self) -> Result<()> {
        self.write().end_combat()
    }

    pub fn advance_turn(&self) -> Result<SessionSummary> {
        let mut session = self.write();
        session.advance_turn()?;
        Ok(SessionSummary::of(&session))
    }

    // ------------------------------------------------------------------
    // Actions
    // ------------------------------------------------------------------

    pub fn shoot(&self, request: &ShootRequest) -> Result<ActionResult> {
        let environment = self.environment();
        self.write().shoot(request, environment)
    }

    pub fn melee(&self, request: &MeleeRequest) -> Result<ActionResult> {
        let environment = self.environment();
        self.write().melee(request, environment)
    }

    pub fn reload(&self, request: &ReloadRequest) -> Result<ActionResult> {
        self.write().reload(request)
    }

    pub fn unjam(&self, request: &UnjamRequest) -> Result<ActionResult> {
        self.write().unjam(request)
    }

    // ------------------------------------------------------------------
    // Referee controls
    // ------------------------------------------------------------------

    pub fn ignite(&self, name: &str) -> Result<()> {
        self.write().ignite(name)
    }

    pub fn extinguish(&self, name: &str) -> Result<()> {
        self.write().extinguish(name)
    }

    pub fn sound_alarm(&self) -> Result<()> {
        self.write().sound_alarm()
    }

    pub fn silence_alarm(&self) -> Result<()> {
        self.write().silence_alarm()
    }

    pub fn set_avoiding(&self, name: &str, avoiding: bool) -> Result<()> {
        self.write().set_avoiding(name, avoiding)
    }

    pub fn set_in_cover(&self, name: &str, in_cover: bool) -> Result<()> {
        self.write().set_in_cover(name, in_cover)
    }

    pub fn apply_manual_damage(&self, name: &str, part: BodyPart, damage: i32) -> Result<Vec<String>> {
        self.write().apply_manual_damage(name, part, damage)
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn current_turn(&self) -> Result<SessionSummary> {
        let session = self.read();
        if !session.is_in_progress() {
            return Err(StateError::NotInProgress.into());
        }
        Ok(SessionSummary::of(&session))
    }

    pub fn stats(&self) -> StatsSnapshot {
        let environment = self.environment();
        StatsSnapshot::of(&self.read(), environment)
    }

    /// Run `f` against a consistent view of the session
    pub fn inspect<R>(&self, f: impl FnOnce(&CombatSession) -> R) -> R {
        f(&self.read())
    }
}
