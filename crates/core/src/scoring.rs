use crate::{
    apply_jokers, evaluate_hand, GameConfig, HandKind, JokerDef, Score, ScoreStep,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const CHIPS_TWEEN_MS: u64 = 400;
pub const MULT_ADD_TWEEN_MS: u64 = 350;
pub const MULT_MUL_TWEEN_MS: u64 = 450;
pub const TOTAL_TWEEN_MS: u64 = 500;

#[derive(Debug, Clone)]
pub struct ScoreTables {
    hand_rules: HashMap<HandKind, (i64, f64)>,
}

impl Default for ScoreTables {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}

impl ScoreTables {
    pub fn from_config(config: &GameConfig) -> Self {
        let mut hand_rules = HashMap::new();
        for hand in &config.hands {
            hand_rules.insert(hand.kind, (hand.chips, hand.mult));
        }
        Self { hand_rules }
    }

    pub fn hand_base(&self, kind: HandKind) -> (i64, f64) {
        self.hand_rules
            .get(&kind)
            .copied()
            .unwrap_or_else(|| default_hand_base(kind))
    }

    /// Rows for a scoring guide, in evaluation priority order.
    pub fn guide(&self) -> Vec<GuideRow> {
        HandKind::ALL
            .iter()
            .map(|kind| {
                let (chips, mult) = self.hand_base(*kind);
                GuideRow {
                    kind: *kind,
                    chips: if kind.sums_dice() { None } else { Some(chips) },
                    mult,
                }
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GuideRow {
    pub kind: HandKind,
    /// `None` when the hand scores the dice sum.
    pub chips: Option<i64>,
    pub mult: f64,
}

/// Base hand plus joker pipeline, without presentation steps.
pub fn score_hand(values: &[u8], tables: &ScoreTables, jokers: &[JokerDef]) -> (HandKind, Score) {
    let eval = evaluate_hand(values, tables);
    (eval.kind, apply_jokers(eval.base(), values, jokers))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringSequence {
    pub hand: HandKind,
    pub base: Score,
    pub steps: Vec<ScoreStep>,
    pub total: Score,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReplayFrame {
    pub chips: i64,
    pub mult: f64,
    pub total: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TweenTarget {
    Chips,
    Mult,
    Total,
}

/// A timed number transition for a presentation layer to animate.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub target: TweenTarget,
    pub from: f64,
    pub to: f64,
    pub duration_ms: u64,
    pub caption: String,
}

pub fn build_scoring(values: &[u8], tables: &ScoreTables, jokers: &[JokerDef]) -> ScoringSequence {
    let eval = evaluate_hand(values, tables);
    let base = eval.base();
    let mut running = base;
    let mut steps = vec![ScoreStep::Chips {
        label: eval.kind.display_name().to_string(),
        delta: base.chips,
    }];
    for joker in jokers {
        if let Some(step) = joker.effect.step(&joker.name, values, running.chips) {
            running.apply(&step);
            steps.push(step);
        }
    }
    ScoringSequence {
        hand: eval.kind,
        base,
        steps,
        total: running,
    }
}

impl ScoringSequence {
    pub fn final_total(&self) -> i64 {
        self.total.total()
    }

    /// Running displays after each step. Chips start at zero, mult at the
    /// hand's base mult; the last frame matches [`score_hand`].
    pub fn replay(&self) -> Vec<ReplayFrame> {
        let mut display = Score::new(0, self.base.mult);
        self.steps
            .iter()
            .map(|step| {
                display.apply(step);
                ReplayFrame {
                    chips: display.chips,
                    mult: display.mult,
                    total: display.total(),
                }
            })
            .collect()
    }

    pub fn transitions(&self) -> Vec<Transition> {
        let mut display = Score::new(0, self.base.mult);
        let mut out = Vec::with_capacity(self.steps.len() + 1);
        for step in &self.steps {
            let before = display;
            display.apply(step);
            let (target, from, to, duration_ms) = match step {
                ScoreStep::Chips { .. } => (
                    TweenTarget::Chips,
                    before.chips as f64,
                    display.chips as f64,
                    CHIPS_TWEEN_MS,
                ),
                ScoreStep::MultAdd { .. } => {
                    (TweenTarget::Mult, before.mult, display.mult, MULT_ADD_TWEEN_MS)
                }
                ScoreStep::MultMul { .. } => {
                    (TweenTarget::Mult, before.mult, display.mult, MULT_MUL_TWEEN_MS)
                }
            };
            out.push(Transition {
                target,
                from,
                to,
                duration_ms,
                caption: step.caption(),
            });
        }
        let total = display.total();
        out.push(Transition {
            target: TweenTarget::Total,
            from: 0.0,
            to: total as f64,
            duration_ms: TOTAL_TWEEN_MS,
            caption: format!("Total: {total}"),
        });
        out
    }
}

pub fn default_hand_base(kind: HandKind) -> (i64, f64) {
    match kind {
        HandKind::Yahtzee => (50, 5.0),
        HandKind::FourOfAKind => (30, 3.0),
        HandKind::FullHouse => (25, 2.0),
        HandKind::LargeStraight => (40, 3.0),
        HandKind::SmallStraight => (30, 2.0),
        HandKind::ThreeOfAKind => (20, 2.0),
        HandKind::TwoPair => (15, 1.5),
        HandKind::OnePair => (10, 1.2),
        HandKind::HighSum => (0, 1.0),
    }
}
