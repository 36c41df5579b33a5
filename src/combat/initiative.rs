//! Initiative: per-round turn order
//!
//! Every combatant rolls `initiative bonus + d10` plus one extra d10 kept only
//! for breaking ties. Order is total, then bonus, then tie-break roll, all
//! descending. The sort is stable, so full ties keep roster order.

use serde::{Deserialize, Serialize};

use crate::combat::combatant::Combatant;
use crate::combat::dice::Dice;
use crate::core::types::CombatantId;

/// One slot of the turn order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitiativeEntry {
    pub combatant: CombatantId,
    pub bonus: i32,
    pub roll: i32,
    pub total: i32,
    pub tiebreak: i32,
}

/// Roll and order initiative for `combatants`
///
/// Dice are consumed in roster order, two d10 per combatant (initiative,
/// then tie-break).
pub fn roll_initiative(combatants: &[Combatant], dice: &mut dyn Dice) -> Vec<InitiativeEntry> {
    let mut order: Vec<InitiativeEntry> = combatants
        .iter()
        .map(|c| {
            let roll = dice.d10();
            let tiebreak = dice.d10();
            InitiativeEntry {
                combatant: c.id,
                bonus: c.bonuses.initiative,
                roll,
                total: c.bonuses.initiative + roll,
                tiebreak,
            }
        })
        .collect();

    order.sort_by(|a, b| {
        b.total
            .cmp(&a.total)
            .then(b.bonus.cmp(&a.bonus))
            .then(b.tiebreak.cmp(&a.tiebreak))
    });
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::combatant::{Attributes, DerivedBonuses};
    use crate::combat::dice::{ScriptedDice, SeededDice};

    fn with_initiative(name: &str, initiative: i32) -> Combatant {
        Combatant::new(
            name,
            Attributes::default(),
            DerivedBonuses {
                initiative,
                actions_per_round: 2,
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_sorted_by_total() {
        let group = vec![
            with_initiative("A", 1),
            with_initiative("B", 2),
            with_initiative("C", 3),
        ];
        // A: 1+9=10, B: 2+2=4, C: 3+5=8
        let mut dice = ScriptedDice::new([9, 1, 2, 1, 5, 1]);
        let order = roll_initiative(&group, &mut dice);
        let ids: Vec<_> = order.iter().map(|e| e.combatant).collect();
        assert_eq!(ids, vec![group[0].id, group[2].id, group[1].id]);
        assert_eq!(order[0].total, 10);
    }

    #[test]
    fn test_tie_broken_by_bonus() {
        let group = vec![with_initiative("Low", 1), with_initiative("High", 4)];
        // Both total 8
        let mut dice = ScriptedDice::new([7, 10, 4, 1]);
        let order = roll_initiative(&group, &mut dice);
        assert_eq!(order[0].combatant, group[1].id);
    }

    #[test]
    fn test_tie_broken_by_extra_roll() {
        let group = vec![with_initiative("First", 2), with_initiative("Second", 2)];
        let mut dice = ScriptedDice::new([5, 3, 5, 8]);
        let order = roll_initiative(&group, &mut dice);
        assert_eq!(order[0].combatant, group[1].id);
        assert_eq!(order[0].tiebreak, 8);
    }

    #[test]
    fn test_full_tie_keeps_roster_order() {
        let group = vec![with_initiative("First", 2), with_initiative("Second", 2)];
        let mut dice = ScriptedDice::new([5, 3, 5, 3]);
        let order = roll_initiative(&group, &mut dice);
        assert_eq!(order[0].combatant, group[0].id);
    }

    #[test]
    fn test_order_is_a_permutation() {
        let group: Vec<_> = (0..6).map(|i| with_initiative(&format!("C{i}"), i)).collect();
        let mut dice = SeededDice::from_seed(11);
        let order = roll_initiative(&group, &mut dice);
        assert_eq!(order.len(), group.len());
        for c in &group {
            assert_eq!(order.iter().filter(|e| e.combatant == c.id).count(), 1);
        }
        for pair in order.windows(2) {
            assert!(pair[0].total >= pair[1].total);
        }
    }
}
