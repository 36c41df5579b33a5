//! Body-point pools and the armor layered over them
//!
//! Maximum points are fixed when the target is built from the owner's
//! Physique + Mental Strength. Temporary points move with damage and may go
//! below zero.

use serde::{Deserialize, Serialize};

use crate::combat::armor::{ArmorLayer, ArmorPiece};
use crate::combat::body_zone::BodyPart;
use crate::core::table::{BandTable, Upper};

/// Maximum points per part, in `BodyPart::ALL` order
type PointRow = [i32; 7];

const MAX_BODY_POINTS: BandTable<i32, PointRow> = BandTable::new(&[
    (Upper::AtMost(10), [2, 5, 4, 4, 4, 5, 5]),
    (Upper::AtMost(20), [3, 6, 5, 5, 5, 6, 6]),
    (Upper::AtMost(30), [3, 7, 6, 6, 6, 7, 7]),
    (Upper::AtMost(40), [4, 8, 7, 7, 7, 8, 8]),
    (Upper::AtMost(50), [4, 9, 8, 8, 8, 9, 9]),
    (Upper::AtMost(60), [5, 10, 9, 9, 9, 10, 10]),
]);

/// Every 10 points past 60 adds one to each part, half that to the head
fn beyond_table(sum: &i32) -> PointRow {
    let extra = (sum - 60) / 10;
    let mut row = [5, 10, 9, 9, 9, 10, 10];
    for (i, points) in row.iter_mut().enumerate() {
        *points += if i == BodyPart::Head.index() { extra / 2 } else { extra };
    }
    row
}

/// One body part's pool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyPartState {
    maximum: i32,
    pub temporary: i32,
    #[serde(default)]
    pub armor: Vec<ArmorLayer>,
}

impl BodyPartState {
    fn new(maximum: i32) -> Self {
        Self {
            maximum,
            temporary: maximum,
            armor: Vec::new(),
        }
    }

    pub fn maximum(&self) -> i32 {
        self.maximum
    }

    /// Points lost so far
    pub fn deficit(&self) -> i32 {
        self.maximum.saturating_sub(self.temporary)
    }

    pub fn is_wounded(&self) -> bool {
        self.temporary < self.maximum
    }

    pub fn is_fireproof(&self) -> bool {
        self.armor.iter().any(|layer| layer.fire_proof)
    }
}

/// The seven body-point pools of one combatant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    parts: [BodyPartState; 7],
}

impl Target {
    pub fn from_attributes(physique: i32, mental_strength: i32) -> Self {
        let row = MAX_BODY_POINTS.lookup_or_else(&(physique + mental_strength), beyond_table);
        Self {
            parts: row.map(BodyPartState::new),
        }
    }

    pub fn part(&self, part: BodyPart) -> &BodyPartState {
        &self.parts[part.index()]
    }

    pub fn part_mut(&mut self, part: BodyPart) -> &mut BodyPartState {
        &mut self.parts[part.index()]
    }

    /// `(part, state)` pairs in `BodyPart::ALL` order
    pub fn parts(&self) -> impl Iterator<Item = (BodyPart, &BodyPartState)> {
        BodyPart::ALL.into_iter().zip(self.parts.iter())
    }

    pub fn total_maximum(&self) -> i32 {
        self.parts.iter().map(|p| p.maximum).sum()
    }

    pub fn total_temporary(&self) -> i32 {
        self.parts
            .iter()
            .fold(0i32, |total, p| total.saturating_add(p.temporary))
    }

    /// Heal every part back to its maximum
    pub fn restore(&mut self) {
        for part in &mut self.parts {
            part.temporary = part.maximum;
        }
    }

    /// Replace all armor layers with those contributed by `pieces`
    pub fn rebuild_armor(&mut self, pieces: &[ArmorPiece]) {
        for part in &mut self.parts {
            part.armor.clear();
        }
        for piece in pieces {
            let layer = ArmorLayer::from_piece(piece);
            for &part in piece.kind.coverage() {
                self.part_mut(part).armor.push(layer.clone());
            }
        }
    }

    /// Vital parts at or below zero
    pub fn failed_vitals(&self) -> Vec<BodyPart> {
        self.parts()
            .filter(|(part, state)| part.is_vital() && state.temporary <= 0)
            .map(|(part, _)| part)
            .collect()
    }

    pub fn is_defeated(&self) -> bool {
        !self.failed_vitals().is_empty() || self.total_temporary() <= 0
    }

    /// At least one arm with points left
    pub fn has_working_arm(&self) -> bool {
        self.part(BodyPart::RightArm).temporary > 0 || self.part(BodyPart::LeftArm).temporary > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::armor::{ArmorMaterial, ArmorType};

    #[test]
    fn test_table_bands() {
        let weak = Target::from_attributes(4, 5);
        assert_eq!(weak.part(BodyPart::Head).maximum(), 2);
        assert_eq!(weak.part(BodyPart::Chest).maximum(), 5);

        let average = Target::from_attributes(10, 10);
        assert_eq!(average.part(BodyPart::Head).maximum(), 3);
        assert_eq!(average.part(BodyPart::Stomach).maximum(), 5);

        let tough = Target::from_attributes(30, 30);
        assert_eq!(tough.part(BodyPart::Chest).maximum(), 10);
        assert_eq!(tough.part(BodyPart::LeftArm).maximum(), 9);
    }

    #[test]
    fn test_beyond_table() {
        // 85 → extra 2: head +1, others +2
        let giant = Target::from_attributes(45, 40);
        assert_eq!(giant.part(BodyPart::Head).maximum(), 6);
        assert_eq!(giant.part(BodyPart::Chest).maximum(), 12);
        assert_eq!(giant.part(BodyPart::RightLeg).maximum(), 12);
    }

    #[test]
    fn test_starts_at_maximum() {
        let target = Target::from_attributes(12, 10);
        for (_, state) in target.parts() {
            assert_eq!(state.temporary, state.maximum());
        }
        assert_eq!(target.total_temporary(), target.total_maximum());
    }

    #[test]
    fn test_vital_part_defeats() {
        let mut target = Target::from_attributes(12, 10);
        assert!(!target.is_defeated());
        target.part_mut(BodyPart::Stomach).temporary = 0;
        assert!(target.is_defeated());
        assert_eq!(target.failed_vitals(), vec![BodyPart::Stomach]);
        target.restore();
        assert!(!target.is_defeated());
    }

    #[test]
    fn test_limbs_alone_do_not_defeat() {
        let mut target = Target::from_attributes(12, 10);
        target.part_mut(BodyPart::LeftLeg).temporary = -3;
        target.part_mut(BodyPart::RightArm).temporary = 0;
        assert!(!target.is_defeated());
        target.part_mut(BodyPart::LeftArm).temporary = 0;
        assert!(!target.has_working_arm());
    }

    #[test]
    fn test_rebuild_armor() {
        let mut target = Target::from_attributes(12, 10);
        let pieces = vec![
            ArmorPiece::new("Vest", 3, ArmorType::Harness, ArmorMaterial::BulletProof),
            ArmorPiece::new("Jacket", 1, ArmorType::Jacket, ArmorMaterial::Cloth),
        ];
        target.rebuild_armor(&pieces);
        assert_eq!(target.part(BodyPart::Chest).armor.len(), 2);
        assert_eq!(target.part(BodyPart::RightArm).armor.len(), 1);
        assert!(target.part(BodyPart::Head).armor.is_empty());
        assert!(target.part(BodyPart::Chest).is_fireproof());
        assert!(!target.part(BodyPart::LeftArm).is_fireproof());

        target.rebuild_armor(&[]);
        assert!(target.part(BodyPart::Chest).armor.is_empty());
    }
}
