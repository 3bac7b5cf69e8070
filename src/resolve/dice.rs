//! Dice rolls for damage and healing.
//!
//! Every roll is a uniform integer over a half-open range `[min, max)`.
//! The resolver only sees the `Dice` trait, so battles can be driven by a
//! seeded `SmallRng` in play or by a scripted sequence in tests.

use std::collections::VecDeque;

use rand::rngs::SmallRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A half-open integer range `[min, max)` to roll within.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Roll {
    pub min: u32,
    pub max: u32,
}

impl Roll {
    pub const fn new(min: u32, max: u32) -> Self {
        Roll { min, max }
    }

    /// Returns true if `value` can be produced by this roll.
    pub const fn contains(self, value: u32) -> bool {
        value >= self.min && value < self.max
    }

    /// Clamps `value` into the range of this roll.
    pub fn clamp(self, value: u32) -> u32 {
        if self.max <= self.min {
            return self.min;
        }
        value.clamp(self.min, self.max - 1)
    }
}

/// Player's regular attack.
pub const ATTACK_ROLL: Roll = Roll::new(5, 15);
/// Player's special attack.
pub const SPECIAL_ROLL: Roll = Roll::new(15, 30);
/// Monster's retaliation after a player action.
pub const COUNTER_ROLL: Roll = Roll::new(5, 15);
/// Player's heal.
pub const HEAL_ROLL: Roll = Roll::new(10, 20);

/// Source of random rolls.
pub trait Dice {
    /// Returns a value in `[roll.min, roll.max)`.
    fn roll(&mut self, roll: Roll) -> u32;
}

impl Dice for SmallRng {
    fn roll(&mut self, roll: Roll) -> u32 {
        if roll.max <= roll.min {
            return roll.min;
        }
        self.gen_range(roll.min..roll.max)
    }
}

impl<D: Dice + ?Sized> Dice for &mut D {
    fn roll(&mut self, roll: Roll) -> u32 {
        (**self).roll(roll)
    }
}

/// Dice that replay a fixed sequence of values.
///
/// Each value is clamped into the requested roll. Once the sequence runs
/// out, every roll returns the roll's minimum.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDice {
    values: VecDeque<u32>,
}

impl ScriptedDice {
    pub fn new<I: IntoIterator<Item = u32>>(values: I) -> Self {
        ScriptedDice {
            values: values.into_iter().collect(),
        }
    }

    /// Number of scripted values not yet consumed.
    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

impl Dice for ScriptedDice {
    fn roll(&mut self, roll: Roll) -> u32 {
        match self.values.pop_front() {
            Some(v) => roll.clamp(v),
            None => roll.min,
        }
    }
}
