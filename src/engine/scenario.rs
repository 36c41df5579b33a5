//! Scenario files
//!
//! A scenario is one TOML document: environment, optional rule overrides,
//! the equipment catalog and the character sheets that reference it by
//! name.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::combat::armor::ArmorPiece;
use crate::combat::combatant::{Attributes, Combatant, DerivedBonuses};
use crate::combat::environment::Environment;
use crate::combat::weapons::Weapon;
use crate::core::config::RulesConfig;
use crate::core::error::ConfigError;
use crate::engine::catalog::{InMemoryCatalog, WeaponCatalog};
use crate::engine::roster::Roster;

fn default_skill() -> i32 {
    10
}

fn default_range() -> f64 {
    10.0
}

/// One character sheet, equipment by catalog name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatantSheet {
    pub name: String,
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default)]
    pub bonuses: DerivedBonuses,
    #[serde(default)]
    pub main_hand: Option<String>,
    #[serde(default)]
    pub off_hand: Option<String>,
    #[serde(default)]
    pub armor: Vec<String>,
    /// Base chance for attack, reload and unjam rolls
    #[serde(default = "default_skill")]
    pub skill: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub max_rounds: Option<u32>,
    /// Distance between combatants in squares
    #[serde(default = "default_range")]
    pub range: f64,
    #[serde(default)]
    pub environment: Environment,
    #[serde(default)]
    pub rules: RulesConfig,
    #[serde(default)]
    pub weapons: Vec<Weapon>,
    #[serde(default)]
    pub armor: Vec<ArmorPiece>,
    #[serde(default)]
    pub combatants: Vec<CombatantSheet>,
}

impl Scenario {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let scenario: Scenario = toml::from_str(contents)?;
        if scenario.combatants.is_empty() {
            return Err(ConfigError::InvalidScenario(format!(
                "{} has no combatants",
                scenario.name
            )));
        }
        Ok(scenario)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let scenario = Self::from_toml_str(&contents)?;
        tracing::info!(
            "Loaded scenario {} ({} combatants, {} weapons)",
            scenario.name,
            scenario.combatants.len(),
            scenario.weapons.len()
        );
        Ok(scenario)
    }

    pub fn catalog(&self) -> InMemoryCatalog {
        let mut catalog = InMemoryCatalog::new();
        for weapon in &self.weapons {
            catalog.insert_weapon(weapon.clone());
        }
        for piece in &self.armor {
            catalog.insert_armor(piece.clone());
        }
        catalog
    }

    /// Build the roster, resolving equipment through `catalog`
    pub fn roster(&self, catalog: &dyn WeaponCatalog) -> Result<Roster, ConfigError> {
        let mut roster = Roster::new();
        for sheet in &self.combatants {
            let combatant = sheet.build(catalog)?;
            roster
                .add(combatant)
                .map_err(|e| ConfigError::InvalidScenario(e.to_string()))?;
        }
        Ok(roster)
    }

    pub fn sheet(&self, name: &str) -> Option<&CombatantSheet> {
        self.combatants.iter().find(|s| s.name == name)
    }
}

impl CombatantSheet {
    pub fn build(&self, catalog: &dyn WeaponCatalog) -> Result<Combatant, ConfigError> {
        let weapon = |name: &String| {
            catalog
                .weapon(name)
                .cloned()
                .ok_or_else(|| ConfigError::UnknownWeapon(name.clone()))
        };

        let mut combatant = Combatant::new(self.name.clone(), self.attributes, self.bonuses);
        combatant.main_hand = self.main_hand.as_ref().map(weapon).transpose()?;
        combatant.off_hand = self.off_hand.as_ref().map(weapon).transpose()?;

        let pieces = self
            .armor
            .iter()
            .map(|name| {
                catalog
                    .armor(name)
                    .cloned()
                    .ok_or_else(|| ConfigError::UnknownArmor(name.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        combatant.equip_armor(pieces);
        Ok(combatant)
    }
}
