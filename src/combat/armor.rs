//! Armor pieces and the per-part layers they contribute
//!
//! A worn piece covers a fixed set of body parts. On each covered part it
//! becomes an `ArmorLayer`: an absorb value, a block chance, and flags for
//! which kinds of attack the layer stops.

use serde::{Deserialize, Serialize};

use crate::combat::body_zone::BodyPart;

/// Kind of attack, selects which layer protection flag applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackKind {
    Melee,
    Ranged,
}

/// What the piece is worn as, determines coverage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArmorType {
    Head,
    Harness,
    Jacket,
    Trenchcoat,
    Bodysuit,
    Arms,
    Gloves,
    Legs,
    Knee,
    Shoulders,
}

const ARMS: &[BodyPart] = &[BodyPart::RightArm, BodyPart::LeftArm];
const LEGS: &[BodyPart] = &[BodyPart::RightLeg, BodyPart::LeftLeg];
const TORSO: &[BodyPart] = &[BodyPart::Chest, BodyPart::Stomach];
const TORSO_AND_ARMS: &[BodyPart] = &[
    BodyPart::Chest,
    BodyPart::Stomach,
    BodyPart::RightArm,
    BodyPart::LeftArm,
];
const BELOW_NECK: &[BodyPart] = &[
    BodyPart::Chest,
    BodyPart::Stomach,
    BodyPart::RightArm,
    BodyPart::LeftArm,
    BodyPart::RightLeg,
    BodyPart::LeftLeg,
];

impl ArmorType {
    /// Body parts this piece protects
    pub fn coverage(self) -> &'static [BodyPart] {
        match self {
            ArmorType::Head => &[BodyPart::Head],
            ArmorType::Harness => TORSO,
            ArmorType::Jacket => TORSO_AND_ARMS,
            ArmorType::Trenchcoat | ArmorType::Bodysuit => BELOW_NECK,
            ArmorType::Arms | ArmorType::Gloves | ArmorType::Shoulders => ARMS,
            ArmorType::Legs | ArmorType::Knee => LEGS,
        }
    }
}

/// What the piece is made of, determines protection flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArmorMaterial {
    Cloth,
    Plastic,
    Ballistic,
    BulletProof,
    LightCombat,
    HeavyCombat,
    ExtraHeavyCombat,
}

impl ArmorMaterial {
    pub fn protects_against(self, attack: AttackKind) -> bool {
        match attack {
            AttackKind::Melee => true,
            // Cloth slows a blade, not a bullet
            AttackKind::Ranged => self != ArmorMaterial::Cloth,
        }
    }

    /// Does this material shield the wearer from burning?
    pub fn is_fireproof(self) -> bool {
        matches!(
            self,
            ArmorMaterial::BulletProof
                | ArmorMaterial::LightCombat
                | ArmorMaterial::HeavyCombat
                | ArmorMaterial::ExtraHeavyCombat
        )
    }
}

fn full_block() -> f64 {
    1.0
}

/// A worn armor piece
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArmorPiece {
    pub name: String,
    pub absorb: i32,
    pub kind: ArmorType,
    pub material: ArmorMaterial,
    /// Probability (0.0-1.0) that the piece applies to a given attack
    #[serde(default = "full_block")]
    pub block_chance: f64,
}

impl ArmorPiece {
    pub fn new(name: impl Into<String>, absorb: i32, kind: ArmorType, material: ArmorMaterial) -> Self {
        Self {
            name: name.into(),
            absorb,
            kind,
            material,
            block_chance: full_block(),
        }
    }

    pub fn with_block_chance(mut self, block_chance: f64) -> Self {
        self.block_chance = block_chance;
        self
    }
}

/// One piece's contribution to one body part
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArmorLayer {
    pub absorb: i32,
    pub block_chance: f64,
    pub melee_protection: bool,
    pub range_protection: bool,
    pub fire_proof: bool,
}

impl ArmorLayer {
    pub fn from_piece(piece: &ArmorPiece) -> Self {
        Self {
            absorb: piece.absorb,
            block_chance: piece.block_chance,
            melee_protection: piece.material.protects_against(AttackKind::Melee),
            range_protection: piece.material.protects_against(AttackKind::Ranged),
            fire_proof: piece.material.is_fireproof(),
        }
    }

    pub fn protects_against(&self, attack: AttackKind) -> bool {
        match attack {
            AttackKind::Melee => self.melee_protection,
            AttackKind::Ranged => self.range_protection,
        }
    }
}
