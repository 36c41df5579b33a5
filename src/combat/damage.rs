//! Armor absorption and net damage to one body part
//!
//! Each layer on the struck part that protects against the attack kind gets
//! an independent block roll. Blocking layers sum to the effective armor.
//! Armor past the guaranteed threshold always absorbs; the rest absorbs up
//! to a d10.

use serde::{Deserialize, Serialize};

use crate::combat::armor::AttackKind;
use crate::combat::dice::Dice;
use crate::combat::target::BodyPartState;
use crate::combat::weapons::AmmoType;
use crate::core::config::RulesConfig;

/// What happened to a single hit on its way through the armor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageReport {
    pub raw: i32,
    pub effective_armor: i32,
    pub absorbed: i32,
    pub net: i32,
}

/// Damage left after `absorbed`, by ammunition
pub fn net_damage(raw: i32, absorbed: i32, ammo: AmmoType) -> i32 {
    match ammo {
        // ceil((2r - a) / 2)
        AmmoType::ArmorPenetration => {
            let doubled = raw * 2 - absorbed;
            if doubled <= 0 {
                0
            } else {
                (doubled + 1) / 2
            }
        }
        AmmoType::Hardballs => (raw * 2 - absorbed).max(0),
        AmmoType::Standard => (raw - absorbed).max(0),
    }
}

/// Sum of the layers that protect against `attack` and win their block roll
pub fn effective_armor(part: &BodyPartState, attack: AttackKind, dice: &mut dyn Dice) -> i32 {
    part.armor
        .iter()
        .filter(|layer| layer.protects_against(attack))
        .filter(|layer| dice.block(layer.block_chance))
        .map(|layer| layer.absorb)
        .sum()
}

/// Resolve armor for one hit and subtract the net damage from the part
pub fn apply_damage_to_body_part(
    part: &mut BodyPartState,
    raw: i32,
    attack: AttackKind,
    ammo: AmmoType,
    rules: &RulesConfig,
    dice: &mut dyn Dice,
) -> DamageReport {
    let effective = effective_armor(part, attack, dice);
    let guaranteed = (effective - rules.guaranteed_absorb_threshold).max(0);
    let absorbed = if effective > 0 {
        effective.min(dice.d10()) + guaranteed
    } else {
        0
    };
    let net = net_damage(raw, absorbed, ammo);
    part.temporary -= net;

    DamageReport {
        raw,
        effective_armor: effective,
        absorbed,
        net,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::armor::{ArmorMaterial, ArmorPiece, ArmorType};
    use crate::combat::body_zone::BodyPart;
    use crate::combat::dice::ScriptedDice;
    use crate::combat::target::Target;

    fn armored_chest(pieces: &[ArmorPiece]) -> Target {
        let mut target = Target::from_attributes(15, 15);
        target.rebuild_armor(pieces);
        target
    }

    #[test]
    fn test_unarmored_takes_full_damage() {
        let rules = RulesConfig::default();
        let mut target = armored_chest(&[]);
        let mut dice = ScriptedDice::default();
        let chest = target.part_mut(BodyPart::Chest);
        let report = apply_damage_to_body_part(
            chest,
            4,
            AttackKind::Ranged,
            AmmoType::Standard,
            &rules,
            &mut dice,
        );
        assert_eq!(report.absorbed, 0);
        assert_eq!(report.net, 4);
        assert_eq!(chest.temporary, 3);
    }

    #[test]
    fn test_guaranteed_absorb_above_ten() {
        let rules = RulesConfig::default();
        let mut target = armored_chest(&[
            ArmorPiece::new("Plate", 8, ArmorType::Harness, ArmorMaterial::HeavyCombat),
            ArmorPiece::new("Coat", 4, ArmorType::Trenchcoat, ArmorMaterial::Ballistic),
        ]);
        // d10 = 3 → min(12, 3) + 2 = 5
        let mut dice = ScriptedDice::new([3]);
        let chest = target.part_mut(BodyPart::Chest);
        let before = chest.temporary;
        let report = apply_damage_to_body_part(
            chest,
            5,
            AttackKind::Ranged,
            AmmoType::Standard,
            &rules,
            &mut dice,
        );
        assert_eq!(report.effective_armor, 12);
        assert_eq!(report.absorbed, 5);
        assert_eq!(report.net, 0);
        assert_eq!(chest.temporary, before);
    }

    #[test]
    fn test_failed_block_skips_layer() {
        let rules = RulesConfig::default();
        let mut target = armored_chest(&[
            ArmorPiece::new("Vest", 3, ArmorType::Harness, ArmorMaterial::BulletProof)
                .with_block_chance(0.5),
            ArmorPiece::new("Jacket", 2, ArmorType::Jacket, ArmorMaterial::Ballistic),
        ]);
        let mut dice = ScriptedDice::new([10]).with_chances([false, true]);
        let report = apply_damage_to_body_part(
            target.part_mut(BodyPart::Chest),
            6,
            AttackKind::Ranged,
            AmmoType::Standard,
            &rules,
            &mut dice,
        );
        assert_eq!(report.effective_armor, 2);
        assert_eq!(report.absorbed, 2);
        assert_eq!(report.net, 4);
    }

    #[test]
    fn test_cloth_ignored_by_bullets_but_not_blades() {
        let rules = RulesConfig::default();
        let mut target = armored_chest(&[ArmorPiece::new(
            "Coat",
            3,
            ArmorType::Trenchcoat,
            ArmorMaterial::Cloth,
        )]);
        let mut dice = ScriptedDice::new([10]);
        let ranged = apply_damage_to_body_part(
            target.part_mut(BodyPart::Chest),
            4,
            AttackKind::Ranged,
            AmmoType::Standard,
            &rules,
            &mut dice,
        );
        assert_eq!(ranged.net, 4);

        let melee = apply_damage_to_body_part(
            target.part_mut(BodyPart::Chest),
            4,
            AttackKind::Melee,
            AmmoType::Standard,
            &rules,
            &mut dice,
        );
        assert_eq!(melee.absorbed, 3);
        assert_eq!(melee.net, 1);
    }

    #[test]
    fn test_ammo_types() {
        assert_eq!(net_damage(5, 3, AmmoType::Standard), 2);
        assert_eq!(net_damage(5, 3, AmmoType::Hardballs), 7);
        // ceil(7 / 2)
        assert_eq!(net_damage(5, 3, AmmoType::ArmorPenetration), 4);
        assert_eq!(net_damage(1, 9, AmmoType::ArmorPenetration), 0);
        assert_eq!(net_damage(1, 9, AmmoType::Hardballs), 0);
        assert_eq!(net_damage(1, 9, AmmoType::Standard), 0);
    }

    #[test]
    fn test_zero_damage_changes_nothing() {
        let rules = RulesConfig::default();
        let mut target = armored_chest(&[]);
        let mut dice = ScriptedDice::default();
        for ammo in [AmmoType::Standard, AmmoType::Hardballs, AmmoType::ArmorPenetration] {
            let report = apply_damage_to_body_part(
                target.part_mut(BodyPart::Head),
                0,
                AttackKind::Ranged,
                ammo,
                &rules,
                &mut dice,
            );
            assert_eq!(report.net, 0);
        }
        let head = target.part(BodyPart::Head);
        assert_eq!(head.temporary, head.maximum());
    }
}
