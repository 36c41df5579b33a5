//! A combatant: attribute sheet, body points, gear and status
//!
//! Bonuses are derived outside the engine and handed in as-is. The engine
//! only lowers `actions_per_round` below the supplied base when body parts
//! are down to their last point.

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::combat::armor::ArmorPiece;
use crate::combat::body_zone::BodyPart;
use crate::combat::stress::StressTier;
use crate::combat::target::Target;
use crate::combat::weapons::Weapon;
use crate::combat::wounds::WoundTier;
use crate::core::types::CombatantId;

/// The six base attributes of a character sheet
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Attributes {
    pub strength: i32,
    pub physique: i32,
    pub coordination: i32,
    pub intelligence: i32,
    pub mental_strength: i32,
    pub personality: i32,
}

/// Bonuses derived from the attributes by the character sheet
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DerivedBonuses {
    pub offensive: i32,
    pub defensive: i32,
    pub perception: i32,
    pub initiative: i32,
    pub actions_per_round: i32,
    /// Squares moved per action
    pub movement_squares: i32,
}

/// Parts down to exactly one body point, in `BodyPart::ALL` order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnePointRemaining([bool; 7]);

impl OnePointRemaining {
    pub fn from_target(target: &Target) -> Self {
        let mut flags = [false; 7];
        for (part, state) in target.parts() {
            flags[part.index()] = state.temporary == 1;
        }
        Self(flags)
    }

    pub fn is_set(&self, part: BodyPart) -> bool {
        self.0[part.index()]
    }

    /// Flagged parts matching `filter`
    pub fn count(&self, filter: impl Fn(BodyPart) -> bool) -> i32 {
        BodyPart::ALL
            .into_iter()
            .filter(|&part| filter(part) && self.is_set(part))
            .count() as i32
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Combatant {
    pub id: CombatantId,
    pub name: String,
    pub attributes: Attributes,
    pub bonuses: DerivedBonuses,
    /// Current allowance after wound penalties
    pub actions_per_round: i32,
    pub actions_remaining: i32,
    pub target: Target,
    pub armor: Vec<ArmorPiece>,
    pub main_hand: Option<Weapon>,
    pub off_hand: Option<Weapon>,
    pub stress: StressTier,
    pub wounds: WoundTier,
    /// Rounds spent on fire; zero when not burning
    pub burning: u16,
    /// Attackers who fired at this combatant this round
    pub under_fire_from: AHashSet<CombatantId>,
    pub is_avoiding: bool,
    /// Set by the referee; tracked and reported only
    pub in_cover: bool,
    pub one_point_remaining: OnePointRemaining,
}

impl Combatant {
    pub fn new(name: impl Into<String>, attributes: Attributes, bonuses: DerivedBonuses) -> Self {
        Self {
            id: CombatantId::new(),
            name: name.into(),
            attributes,
            bonuses,
            actions_per_round: bonuses.actions_per_round,
            actions_remaining: bonuses.actions_per_round,
            target: Target::from_attributes(attributes.physique, attributes.mental_strength),
            armor: Vec::new(),
            main_hand: None,
            off_hand: None,
            stress: StressTier::None,
            wounds: WoundTier::None,
            burning: 0,
            under_fire_from: AHashSet::new(),
            is_avoiding: false,
            in_cover: false,
            one_point_remaining: OnePointRemaining::default(),
        }
    }

    pub fn with_main_hand(mut self, weapon: Weapon) -> Self {
        self.main_hand = Some(weapon);
        self
    }

    pub fn with_off_hand(mut self, weapon: Weapon) -> Self {
        self.off_hand = Some(weapon);
        self
    }

    pub fn with_armor(mut self, pieces: Vec<ArmorPiece>) -> Self {
        self.equip_armor(pieces);
        self
    }

    /// Replace worn armor and rebuild the per-part layers
    pub fn equip_armor(&mut self, pieces: Vec<ArmorPiece>) {
        self.target.rebuild_armor(&pieces);
        self.armor = pieces;
    }

    pub fn is_burning(&self) -> bool {
        self.burning >= 1
    }

    /// Movement allowance, one square less per leg on its last point
    pub fn effective_movement(&self) -> i32 {
        let lame_legs = self.one_point_remaining.count(BodyPart::is_leg);
        (self.bonuses.movement_squares - lame_legs).max(0)
    }

    /// Start-of-round reset of the action pool
    pub fn refresh_actions(&mut self) {
        self.actions_remaining = self.actions_per_round;
    }

    pub fn spend_actions(&mut self, cost: i32) {
        self.actions_remaining = (self.actions_remaining - cost).max(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trooper() -> Combatant {
        Combatant::new(
            "Trooper",
            Attributes {
                strength: 10,
                physique: 12,
                coordination: 11,
                intelligence: 9,
                mental_strength: 10,
                personality: 8,
            },
            DerivedBonuses {
                offensive: 1,
                defensive: 3,
                perception: 2,
                initiative: 2,
                actions_per_round: 3,
                movement_squares: 3,
            },
        )
    }

    #[test]
    fn test_new_combatant_is_fresh() {
        let c = trooper();
        assert_eq!(c.actions_remaining, 3);
        assert_eq!(c.stress, StressTier::None);
        assert_eq!(c.wounds, WoundTier::None);
        assert!(!c.is_burning());
        assert!(c.under_fire_from.is_empty());
        // Physique + Mental Strength 22 → third band
        assert_eq!(c.target.part(BodyPart::Chest).maximum(), 7);
    }

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(trooper().id, trooper().id);
    }

    #[test]
    fn test_spend_actions_floors_at_zero() {
        let mut c = trooper();
        c.spend_actions(5);
        assert_eq!(c.actions_remaining, 0);
        c.refresh_actions();
        assert_eq!(c.actions_remaining, 3);
    }

    #[test]
    fn test_lame_leg_slows_movement() {
        let mut c = trooper();
        c.target.part_mut(BodyPart::LeftLeg).temporary = 1;
        c.one_point_remaining = OnePointRemaining::from_target(&c.target);
        assert_eq!(c.effective_movement(), 2);
        c.target.part_mut(BodyPart::RightLeg).temporary = 1;
        c.one_point_remaining = OnePointRemaining::from_target(&c.target);
        assert_eq!(c.effective_movement(), 1);
    }
}
