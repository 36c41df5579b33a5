//! Character roster collaborator
//!
//! The roster lives outside the engine and can be edited freely between
//! sessions. `CombatSession::start` only ever sees a snapshot.

use crate::combat::combatant::Combatant;
use crate::core::error::ValidationError;

/// Source of the combatants a session starts with
pub trait CharacterRoster {
    /// Ordered copy of every combatant on the roster
    fn snapshot(&self) -> Vec<Combatant>;
}

/// In-memory roster keyed by combatant name
#[derive(Debug, Clone, Default)]
pub struct Roster {
    combatants: Vec<Combatant>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a combatant; names must be unique
    pub fn add(&mut self, combatant: Combatant) -> Result<(), ValidationError> {
        if self.get(&combatant.name).is_some() {
            return Err(ValidationError::DuplicateName(combatant.name));
        }
        self.combatants.push(combatant);
        Ok(())
    }

    pub fn remove(&mut self, name: &str) -> Option<Combatant> {
        let idx = self.combatants.iter().position(|c| c.name == name)?;
        Some(self.combatants.remove(idx))
    }

    pub fn get(&self, name: &str) -> Option<&Combatant> {
        self.combatants.iter().find(|c| c.name == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Combatant> {
        self.combatants.iter_mut().find(|c| c.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Combatant> {
        self.combatants.iter()
    }

    pub fn len(&self) -> usize {
        self.combatants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.combatants.is_empty()
    }
}

impl CharacterRoster for Roster {
    fn snapshot(&self) -> Vec<Combatant> {
        self.combatants.clone()
    }
}

impl CharacterRoster for Vec<Combatant> {
    fn snapshot(&self) -> Vec<Combatant> {
        self.clone()
    }
}
