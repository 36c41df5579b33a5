//! Weapon and armor catalog collaborator

use ahash::AHashMap;

use crate::combat::armor::ArmorPiece;
use crate::combat::weapons::Weapon;

/// Equipment lookup used when building combatants
pub trait WeaponCatalog {
    /// Weapon by exact name
    fn weapon(&self, name: &str) -> Option<&Weapon>;

    /// Weapons whose name or description contains `query`, ignoring case
    fn search(&self, query: &str) -> Vec<&Weapon>;

    /// Armor piece by exact name
    fn armor(&self, name: &str) -> Option<&ArmorPiece>;
}

/// Catalog held in memory, search results in insertion order
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    weapons: Vec<Weapon>,
    weapon_index: AHashMap<String, usize>,
    armor: Vec<ArmorPiece>,
    armor_index: AHashMap<String, usize>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a weapon
    pub fn insert_weapon(&mut self, weapon: Weapon) {
        match self.weapon_index.get(&weapon.name) {
            Some(&idx) => self.weapons[idx] = weapon,
            None => {
                self.weapon_index
                    .insert(weapon.name.clone(), self.weapons.len());
                self.weapons.push(weapon);
            }
        }
    }

    /// Add or replace an armor piece
    pub fn insert_armor(&mut self, piece: ArmorPiece) {
        match self.armor_index.get(&piece.name) {
            Some(&idx) => self.armor[idx] = piece,
            None => {
                self.armor_index.insert(piece.name.clone(), self.armor.len());
                self.armor.push(piece);
            }
        }
    }

    pub fn weapon_count(&self) -> usize {
        self.weapons.len()
    }
}

impl WeaponCatalog for InMemoryCatalog {
    fn weapon(&self, name: &str) -> Option<&Weapon> {
        self.weapon_index.get(name).map(|&idx| &self.weapons[idx])
    }

    fn search(&self, query: &str) -> Vec<&Weapon> {
        let needle = query.to_lowercase();
        self.weapons
            .iter()
            .filter(|w| {
                w.name.to_lowercase().contains(&needle)
                    || w.description.to_lowercase().contains(&needle)
            })
            .collect()
    }

    fn armor(&self, name: &str) -> Option<&ArmorPiece> {
        self.armor_index.get(name).map(|&idx| &self.armor[idx])
    }
}
