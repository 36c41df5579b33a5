//! Defeat sweep
//!
//! Moves every defeated combatant out of the active roster and the turn
//! order into the defeated list. Matching is by id so the three lists never
//! have to share an ordering.

use crate::combat::combatant::Combatant;
use crate::combat::initiative::InitiativeEntry;

/// Sweep defeated combatants; returns the names moved this call
pub fn sweep_defeated(
    active: &mut Vec<Combatant>,
    turn_order: &mut Vec<InitiativeEntry>,
    defeated: &mut Vec<Combatant>,
) -> Vec<String> {
    let (fallen, standing): (Vec<_>, Vec<_>) = std::mem::take(active)
        .into_iter()
        .partition(|c| c.target.is_defeated());
    *active = standing;

    if fallen.is_empty() {
        return Vec::new();
    }

    turn_order.retain(|entry| !fallen.iter().any(|c| c.id == entry.combatant));

    let names: Vec<String> = fallen.iter().map(|c| c.name.clone()).collect();
    for c in &fallen {
        tracing::info!(
            "{} defeated (vital parts down: {:?})",
            c.name,
            c.target.failed_vitals()
        );
    }
    defeated.extend(fallen);
    names
}
