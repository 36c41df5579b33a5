//! Read-only views of a session for the transport layer
//!
//! Everything here is plain data, serialized with serde_json by callers.

use serde::{Deserialize, Serialize};

use crate::combat::armor::ArmorLayer;
use crate::combat::body_zone::BodyPart;
use crate::combat::combatant::Combatant;
use crate::combat::environment::Environment;
use crate::combat::session::{CombatSession, RoundReport};
use crate::combat::stress::StressTier;
use crate::combat::weapons::{AmmoType, Magazine, Weapon};
use crate::combat::wounds::WoundTier;
use crate::core::types::Round;

/// One slot of the turn order, by name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnEntry {
    pub name: String,
    pub initiative: i32,
    pub actions_remaining: i32,
    pub actions_per_round: i32,
}

/// Round, turn order and whose turn it is
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub round: Round,
    pub in_progress: bool,
    pub current_actor: Option<String>,
    pub turn_order: Vec<TurnEntry>,
    pub defeated: Vec<String>,
    /// Present on the summary returned by a round change
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub round_report: Option<RoundReport>,
}

impl SessionSummary {
    pub fn of(session: &CombatSession) -> Self {
        let turn_order = session
            .turn_order()
            .iter()
            .filter_map(|entry| {
                let c = session.active().iter().find(|c| c.id == entry.combatant)?;
                Some(TurnEntry {
                    name: c.name.clone(),
                    initiative: entry.total,
                    actions_remaining: c.actions_remaining,
                    actions_per_round: c.actions_per_round,
                })
            })
            .collect();

        Self {
            round: session.round(),
            in_progress: session.is_in_progress(),
            current_actor: session.current_actor().map(|c| c.name.clone()),
            turn_order,
            defeated: session.defeated().iter().map(|c| c.name.clone()).collect(),
            round_report: None,
        }
    }

    pub fn with_round_report(mut self, report: RoundReport) -> Self {
        self.round_report = Some(report);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartStats {
    pub part: BodyPart,
    pub maximum: i32,
    pub temporary: i32,
    pub armor: Vec<ArmorLayer>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponStats {
    pub name: String,
    pub ammo_type: AmmoType,
    pub primary: Magazine,
    pub secondary: Option<Magazine>,
}

impl WeaponStats {
    fn of(weapon: &Weapon) -> Self {
        Self {
            name: weapon.name.clone(),
            ammo_type: weapon.ammo_type,
            primary: weapon.primary.magazine.clone(),
            secondary: weapon.mode(true).map(|p| p.magazine.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatantStats {
    pub name: String,
    pub parts: Vec<PartStats>,
    pub stress: StressTier,
    pub wounds: WoundTier,
    pub burning: u16,
    pub actions_remaining: i32,
    pub actions_per_round: i32,
    pub movement: i32,
    pub is_avoiding: bool,
    pub in_cover: bool,
    pub main_hand: Option<WeaponStats>,
    pub off_hand: Option<WeaponStats>,
}

impl CombatantStats {
    pub fn of(c: &Combatant) -> Self {
        Self {
            name: c.name.clone(),
            parts: c
                .target
                .parts()
                .map(|(part, state)| PartStats {
                    part,
                    maximum: state.maximum(),
                    temporary: state.temporary,
                    armor: state.armor.clone(),
                })
                .collect(),
            stress: c.stress,
            wounds: c.wounds,
            burning: c.burning,
            actions_remaining: c.actions_remaining,
            actions_per_round: c.actions_per_round,
            movement: c.effective_movement(),
            is_avoiding: c.is_avoiding,
            in_cover: c.in_cover,
            main_hand: c.main_hand.as_ref().map(WeaponStats::of),
            off_hand: c.off_hand.as_ref().map(WeaponStats::of),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefeatedStats {
    pub name: String,
    /// Vital parts at or below zero
    pub failed_vitals: Vec<BodyPart>,
}

/// Full state dump: every combatant plus the environment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub round: Round,
    pub in_progress: bool,
    pub environment: Environment,
    pub combatants: Vec<CombatantStats>,
    pub defeated: Vec<DefeatedStats>,
}

impl StatsSnapshot {
    pub fn of(session: &CombatSession, environment: Environment) -> Self {
        Self {
            round: session.round(),
            in_progress: session.is_in_progress(),
            environment,
            combatants: session.active().iter().map(CombatantStats::of).collect(),
            defeated: session
                .defeated()
                .iter()
                .map(|c| DefeatedStats {
                    name: c.name.clone(),
                    failed_vitals: c.target.failed_vitals(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::combatant::{Attributes, DerivedBonuses};
    use crate::combat::dice::ScriptedDice;
    use crate::core::config::RulesConfig;

    fn session() -> CombatSession {
        let mut session = CombatSession::new(
            RulesConfig::default(),
            Box::new(ScriptedDice::new([2, 1, 8, 1])),
        );
        let roster = ["Slow", "Quick"]
            .into_iter()
            .map(|name| {
                Combatant::new(
                    name,
                    Attributes {
                        physique: 10,
                        mental_strength: 10,
                        ..Default::default()
                    },
                    DerivedBonuses {
                        actions_per_round: 2,
                        movement_squares: 4,
                        ..Default::default()
                    },
                )
            })
            .collect();
        session.start(roster).unwrap();
        session
    }

    #[test]
    fn test_summary_follows_turn_order() {
        let summary = SessionSummary::of(&session());
        assert_eq!(summary.current_actor.as_deref(), Some("Quick"));
        let names: Vec<&str> = summary.turn_order.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Quick", "Slow"]);
        assert_eq!(summary.turn_order[0].initiative, 8);
        assert!(summary.round_report.is_none());
    }

    #[test]
    fn test_stats_lists_parts_and_defeated() {
        let mut session = session();
        session
            .apply_manual_damage("Slow", BodyPart::Stomach, 20)
            .unwrap();
        let stats = StatsSnapshot::of(&session, Environment::default());
        assert_eq!(stats.combatants.len(), 1);
        assert_eq!(stats.combatants[0].parts.len(), 7);
        assert_eq!(stats.combatants[0].movement, 4);
        assert_eq!(
            stats.defeated,
            vec![DefeatedStats {
                name: "Slow".into(),
                failed_vitals: vec![BodyPart::Stomach],
            }]
        );
        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains("\"Stomach\""));
    }
}
