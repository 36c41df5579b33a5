//! Dice: the only source of randomness in the engine
//!
//! Everything random goes through the `Dice` trait so a session can run on a
//! seeded generator (reproducible skirmishes) or on a scripted roll queue
//! (tests, replays).

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;

/// Injectable dice source
pub trait Dice: Send + Sync {
    /// Uniform integer in `low..=high`; returns `low` when `low >= high`
    fn range(&mut self, low: i32, high: i32) -> i32;

    /// `true` with probability `chance` (clamped to `0.0..=1.0`)
    fn chance(&mut self, chance: f64) -> bool;

    fn d3(&mut self) -> i32 {
        self.range(1, 3)
    }

    fn d4(&mut self) -> i32 {
        self.range(1, 4)
    }

    fn d6(&mut self) -> i32 {
        self.range(1, 6)
    }

    fn d10(&mut self) -> i32 {
        self.range(1, 10)
    }

    fn d20(&mut self) -> i32 {
        self.range(1, 20)
    }

    /// Uniform `min..=max` plus a flat bonus
    fn damage(&mut self, min: i32, max: i32, added: i32) -> i32 {
        self.range(min, max) + added
    }

    /// Number of body areas a multi-hit weapon strikes (at least 1)
    fn target_areas(&mut self, max_areas: u32) -> u32 {
        if max_areas == 0 {
            return 1;
        }
        self.range(1, max_areas as i32).max(1) as u32
    }

    /// Whether an armor layer with this block chance stops the attack
    fn block(&mut self, block_chance: f64) -> bool {
        self.chance(block_chance)
    }
}

/// ChaCha8-backed dice, deterministic for a given seed
#[derive(Debug, Clone)]
pub struct SeededDice {
    rng: ChaCha8Rng,
}

impl SeededDice {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Seed from the thread RNG
    pub fn from_entropy() -> Self {
        Self::from_seed(rand::random())
    }
}

impl Dice for SeededDice {
    fn range(&mut self, low: i32, high: i32) -> i32 {
        if low >= high {
            return low;
        }
        self.rng.gen_range(low..=high)
    }

    fn chance(&mut self, chance: f64) -> bool {
        self.rng.gen_bool(chance.clamp(0.0, 1.0))
    }
}

/// Replays a fixed sequence of rolls
///
/// Integer rolls and block-chance outcomes are queued separately. Each
/// scripted value is clamped into the requested range; degenerate ranges
/// (`low >= high`) consume nothing. A drained roll queue yields `low`, a
/// drained chance queue yields `true` for any positive chance.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDice {
    rolls: VecDeque<i32>,
    chances: VecDeque<bool>,
}

impl ScriptedDice {
    pub fn new(rolls: impl IntoIterator<Item = i32>) -> Self {
        Self {
            rolls: rolls.into_iter().collect(),
            chances: VecDeque::new(),
        }
    }

    pub fn with_chances(mut self, chances: impl IntoIterator<Item = bool>) -> Self {
        self.chances = chances.into_iter().collect();
        self
    }

    /// Rolls not yet consumed
    pub fn remaining(&self) -> usize {
        self.rolls.len()
    }
}

impl Dice for ScriptedDice {
    fn range(&mut self, low: i32, high: i32) -> i32 {
        if low >= high {
            return low;
        }
        match self.rolls.pop_front() {
            Some(roll) => roll.clamp(low, high),
            None => {
                tracing::warn!("Scripted dice ran dry rolling {}..={}", low, high);
                low
            }
        }
    }

    fn chance(&mut self, chance: f64) -> bool {
        self.chances.pop_front().unwrap_or(chance > 0.0)
    }
}
