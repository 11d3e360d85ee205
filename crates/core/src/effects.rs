use crate::{count_face, round_half_up, JokerDef, Score, ScoreStep};
use serde::{Deserialize, Serialize};

/// What a joker does to a hand's score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum JokerEffect {
    FlatChips { amount: i64 },
    FlatMult { amount: f64 },
    /// Fraction of the running chips, `0.25` is +25%.
    PercentChips { amount: f64 },
    PerFaceChips { face: u8, amount: i64 },
    /// Applied once per matching die.
    PerFaceMult { face: u8, factor: f64 },
    /// Purchase-time only: raises the die count.
    AddDie {
        #[serde(default = "default_add_die")]
        amount: u8,
    },
}

fn default_add_die() -> u8 {
    1
}

impl JokerEffect {
    /// The score increment this effect contributes given the dice and the
    /// chips accumulated so far, or `None` when it would change nothing.
    pub fn step(&self, label: &str, values: &[u8], running_chips: i64) -> Option<ScoreStep> {
        match *self {
            JokerEffect::FlatChips { amount } => chips_step(label, amount),
            JokerEffect::FlatMult { amount } => {
                if amount == 0.0 {
                    return None;
                }
                Some(ScoreStep::MultAdd {
                    label: label.to_string(),
                    delta: amount,
                })
            }
            JokerEffect::PercentChips { amount } => {
                let scaled = round_half_up(running_chips as f64 * (1.0 + amount));
                chips_step(label, scaled.saturating_sub(running_chips))
            }
            JokerEffect::PerFaceChips { face, amount } => {
                let count = count_face(values, face) as i64;
                chips_step(label, amount.saturating_mul(count))
            }
            JokerEffect::PerFaceMult { face, factor } => {
                let count = count_face(values, face);
                if count == 0 || factor == 1.0 {
                    return None;
                }
                Some(ScoreStep::MultMul {
                    label: label.to_string(),
                    factor: factor.powi(count as i32),
                })
            }
            JokerEffect::AddDie { .. } => None,
        }
    }

    pub fn extra_dice(&self) -> usize {
        match *self {
            JokerEffect::AddDie { amount } => usize::from(amount),
            _ => 0,
        }
    }

    pub fn describe(&self) -> String {
        match *self {
            JokerEffect::FlatChips { amount } => format!("+{amount} chips to hand result"),
            JokerEffect::FlatMult { amount } => {
                format!("+{} mult to hand result", crate::trim_float(amount))
            }
            JokerEffect::PercentChips { amount } => format!(
                "+{}% chips to hand result",
                crate::trim_float(amount * 100.0)
            ),
            JokerEffect::PerFaceChips { face, amount } => format!("+{amount} chips per {face}"),
            JokerEffect::PerFaceMult { face, factor } => format!(
                "Each {face} multiplies mult by {}",
                crate::trim_float(factor)
            ),
            JokerEffect::AddDie { amount } => format!("Add +{amount} die"),
        }
    }
}

fn chips_step(label: &str, delta: i64) -> Option<ScoreStep> {
    if delta == 0 {
        return None;
    }
    Some(ScoreStep::Chips {
        label: label.to_string(),
        delta,
    })
}

/// Runs the joker inventory over a base score, left to right.
pub fn apply_jokers(base: Score, values: &[u8], jokers: &[JokerDef]) -> Score {
    let mut score = base;
    for joker in jokers {
        if let Some(step) = joker.effect.step(&joker.name, values, score.chips) {
            score.apply(&step);
        }
    }
    score
}
