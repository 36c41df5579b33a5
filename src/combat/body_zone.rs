//! Body parts for hit location and body-point tracking (7 parts)
//!
//! Every combatant's `Target` carries one independent body-point pool per
//! part. Hit location is a d20 read against a fixed band table; melee uses
//! a flatter table than ranged fire.

use serde::{Deserialize, Serialize};

use crate::core::table::{BandTable, Upper};

/// Body parts for hit location (7 total)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BodyPart {
    /// Vital - zero points defeats the combatant
    Head,
    /// Vital
    Chest,
    /// Vital
    Stomach,
    RightArm,
    LeftArm,
    RightLeg,
    LeftLeg,
}

/// d20 → part for ranged hits: legs 1-6, arms 7-10, stomach 11-14,
/// chest 15-19, head 20
const RANGED_LOCATIONS: BandTable<i32, BodyPart> = BandTable::new(&[
    (Upper::AtMost(3), BodyPart::LeftLeg),
    (Upper::AtMost(6), BodyPart::RightLeg),
    (Upper::AtMost(8), BodyPart::LeftArm),
    (Upper::AtMost(10), BodyPart::RightArm),
    (Upper::AtMost(14), BodyPart::Stomach),
    (Upper::AtMost(19), BodyPart::Chest),
]);

/// d20 → part for melee hits, three faces per part up to 18
const MELEE_LOCATIONS: BandTable<i32, BodyPart> = BandTable::new(&[
    (Upper::AtMost(3), BodyPart::LeftLeg),
    (Upper::AtMost(6), BodyPart::RightLeg),
    (Upper::AtMost(9), BodyPart::LeftArm),
    (Upper::AtMost(12), BodyPart::RightArm),
    (Upper::AtMost(15), BodyPart::Stomach),
    (Upper::AtMost(18), BodyPart::Chest),
]);

impl BodyPart {
    pub const ALL: [BodyPart; 7] = [
        BodyPart::Head,
        BodyPart::Chest,
        BodyPart::Stomach,
        BodyPart::RightArm,
        BodyPart::LeftArm,
        BodyPart::RightLeg,
        BodyPart::LeftLeg,
    ];

    /// Position in `ALL`, used to index per-part arrays
    pub fn index(self) -> usize {
        self as usize
    }

    /// Is this part one whose loss defeats the combatant?
    pub fn is_vital(self) -> bool {
        matches!(self, BodyPart::Head | BodyPart::Chest | BodyPart::Stomach)
    }

    pub fn is_arm(self) -> bool {
        matches!(self, BodyPart::RightArm | BodyPart::LeftArm)
    }

    pub fn is_leg(self) -> bool {
        matches!(self, BodyPart::RightLeg | BodyPart::LeftLeg)
    }

    /// Part struck by a ranged hit for a d20 location roll
    pub fn ranged_hit_location(roll: i32) -> BodyPart {
        RANGED_LOCATIONS.lookup_or_else(&roll, |_| BodyPart::Head)
    }

    /// Part struck by a melee hit for a d20 location roll
    pub fn melee_hit_location(roll: i32) -> BodyPart {
        MELEE_LOCATIONS.lookup_or_else(&roll, |_| BodyPart::Head)
    }
}
