use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Score {
    pub chips: i64,
    pub mult: f64,
}

impl Score {
    pub fn new(chips: i64, mult: f64) -> Self {
        Self { chips, mult }
    }

    pub fn total_raw(&self) -> f64 {
        self.chips as f64 * self.mult
    }

    pub fn total(&self) -> i64 {
        round_half_up(self.total_raw())
    }

    pub fn apply(&mut self, step: &ScoreStep) {
        match step {
            ScoreStep::Chips { delta, .. } => self.chips = self.chips.saturating_add(*delta),
            ScoreStep::MultAdd { delta, .. } => self.mult += delta,
            ScoreStep::MultMul { factor, .. } => self.mult *= factor,
        }
    }
}

/// Rounds halves towards positive infinity, so `37.5 -> 38` and `-2.5 -> -2`.
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// One presentable increment of a hand's score.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScoreStep {
    Chips { label: String, delta: i64 },
    MultAdd { label: String, delta: f64 },
    MultMul { label: String, factor: f64 },
}

impl ScoreStep {
    pub fn caption(&self) -> String {
        match self {
            ScoreStep::Chips { label, delta } => format!("+{delta} chips - {label}"),
            ScoreStep::MultAdd { label, delta } => format!("+{} mult - {label}", trim_float(*delta)),
            ScoreStep::MultMul { label, factor } => {
                format!("x{} mult - {label}", trim_float(*factor))
            }
        }
    }
}

/// Two decimal places at most, trailing zeros dropped.
pub fn trim_float(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    let text = format!("{rounded:.2}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}
