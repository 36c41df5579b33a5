//! Ammunition drawn per Shoot action
//!
//! Bursts and automatic fire want a minimum number of rounds. A magazine
//! that can't supply them is emptied for a single shot instead.

use serde::{Deserialize, Serialize};

use crate::combat::weapons::{FiringMode, Magazine};

/// Shots to resolve and the chance penalty they carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmmoDraw {
    pub shots: u32,
    pub rounds_spent: u32,
    pub chance_penalty: i32,
}

/// Take rounds for one action in `mode`
///
/// `penalty_per_shot` applies to rapid volleys only.
pub fn draw(magazine: &mut Magazine, mode: FiringMode, penalty_per_shot: i32) -> AmmoDraw {
    let full_or_exhaust = |magazine: &mut Magazine, rounds: u32, shots: u32| {
        if magazine.current >= rounds {
            AmmoDraw {
                shots,
                rounds_spent: magazine.consume(rounds),
                chance_penalty: 0,
            }
        } else {
            AmmoDraw {
                shots: 1,
                rounds_spent: magazine.exhaust(),
                chance_penalty: 0,
            }
        }
    };

    match mode {
        FiringMode::SingleRound => AmmoDraw {
            shots: 1,
            rounds_spent: magazine.consume(1),
            chance_penalty: 0,
        },
        FiringMode::Burst => full_or_exhaust(magazine, 3, 2),
        FiringMode::FullAuto => full_or_exhaust(magazine, 10, 3),
        FiringMode::AreaSpray => full_or_exhaust(magazine, 20, 1),
        FiringMode::RapidVolley(size) => {
            let rounds = size.rounds();
            AmmoDraw {
                shots: rounds,
                rounds_spent: magazine.consume(rounds),
                chance_penalty: penalty_per_shot * rounds as i32,
            }
        }
    }
}
