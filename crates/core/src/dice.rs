use crate::{RngState, MAX_DICE};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Die {
    pub value: u8,
    pub held: bool,
}

impl Default for Die {
    fn default() -> Self {
        Self {
            value: 1,
            held: false,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DiceError {
    #[error("invalid die index {0}")]
    InvalidIndex(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dice {
    dice: Vec<Die>,
}

impl Dice {
    /// `count` unheld dice showing 1, clamped to `1..=MAX_DICE`.
    pub fn fresh(count: usize) -> Self {
        let count = count.clamp(1, MAX_DICE);
        Self {
            dice: vec![Die::default(); count],
        }
    }

    pub fn from_values(values: &[u8]) -> Self {
        let mut dice = Self::fresh(values.len());
        for (die, value) in dice.dice.iter_mut().zip(values) {
            die.value = (*value).clamp(1, 6);
        }
        dice
    }

    pub fn len(&self) -> usize {
        self.dice.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dice.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Die> {
        self.dice.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Die> {
        self.dice.iter()
    }

    pub fn values(&self) -> Vec<u8> {
        self.dice.iter().map(|die| die.value).collect()
    }

    pub fn held_count(&self) -> usize {
        self.dice.iter().filter(|die| die.held).count()
    }

    /// Re-randomizes every die that is not held.
    pub fn reroll(&mut self, rng: &mut RngState) {
        for die in &mut self.dice {
            if !die.held {
                die.value = rng.roll_die();
            }
        }
    }

    /// Flips one die's held flag and returns the new flag.
    pub fn toggle_hold(&mut self, index: usize) -> Result<bool, DiceError> {
        let die = self
            .dice
            .get_mut(index)
            .ok_or(DiceError::InvalidIndex(index))?;
        die.held = !die.held;
        Ok(die.held)
    }
}
