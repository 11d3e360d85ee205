use crate::{Score, ScoreTables};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandKind {
    Yahtzee,
    FourOfAKind,
    FullHouse,
    LargeStraight,
    SmallStraight,
    ThreeOfAKind,
    TwoPair,
    OnePair,
    HighSum,
}

impl HandKind {
    /// Evaluation priority order; the first matching kind wins.
    pub const ALL: [HandKind; 9] = [
        HandKind::Yahtzee,
        HandKind::FourOfAKind,
        HandKind::FullHouse,
        HandKind::LargeStraight,
        HandKind::SmallStraight,
        HandKind::ThreeOfAKind,
        HandKind::TwoPair,
        HandKind::OnePair,
        HandKind::HighSum,
    ];

    pub fn id(self) -> &'static str {
        match self {
            HandKind::Yahtzee => "yahtzee",
            HandKind::FourOfAKind => "four_of_a_kind",
            HandKind::FullHouse => "full_house",
            HandKind::LargeStraight => "large_straight",
            HandKind::SmallStraight => "small_straight",
            HandKind::ThreeOfAKind => "three_of_a_kind",
            HandKind::TwoPair => "two_pair",
            HandKind::OnePair => "one_pair",
            HandKind::HighSum => "high_sum",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            HandKind::Yahtzee => "Yahtzee",
            HandKind::FourOfAKind => "Four of a Kind",
            HandKind::FullHouse => "Full House",
            HandKind::LargeStraight => "Large Straight",
            HandKind::SmallStraight => "Small Straight",
            HandKind::ThreeOfAKind => "Three of a Kind",
            HandKind::TwoPair => "Two Pair",
            HandKind::OnePair => "One Pair",
            HandKind::HighSum => "High Sum",
        }
    }

    /// Chips are ignored for [`HandKind::HighSum`], which scores the dice sum.
    pub fn sums_dice(self) -> bool {
        matches!(self, HandKind::HighSum)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandEval {
    pub kind: HandKind,
    pub chips: i64,
    pub mult: f64,
}

impl HandEval {
    pub fn base(&self) -> Score {
        Score::new(self.chips, self.mult)
    }
}

pub fn evaluate_hand(values: &[u8], tables: &ScoreTables) -> HandEval {
    let kind = classify_hand(values);
    let (table_chips, mult) = tables.hand_base(kind);
    let chips = if kind.sums_dice() {
        dice_sum(values)
    } else {
        table_chips
    };
    HandEval { kind, chips, mult }
}

pub fn classify_hand(values: &[u8]) -> HandKind {
    if values.is_empty() {
        return HandKind::HighSum;
    }

    let len = values.len();
    let counts = face_counts(values);
    let top = counts.first().copied().unwrap_or(0);
    let second = counts.get(1).copied().unwrap_or(0);
    let distinct = distinct_sorted(values);

    if top == len {
        return HandKind::Yahtzee;
    }
    if top == 4 {
        return HandKind::FourOfAKind;
    }
    if top == 3 && second == 2 {
        return HandKind::FullHouse;
    }
    if distinct.len() == len && is_run(&distinct) {
        return HandKind::LargeStraight;
    }
    if distinct.len() >= 4 && distinct.windows(4).any(is_run) {
        return HandKind::SmallStraight;
    }
    if top == 3 {
        return HandKind::ThreeOfAKind;
    }
    if top == 2 && second == 2 {
        return HandKind::TwoPair;
    }
    if top == 2 {
        return HandKind::OnePair;
    }
    HandKind::HighSum
}

/// Face-count histogram, largest count first.
pub fn face_counts(values: &[u8]) -> Vec<usize> {
    let mut by_face: HashMap<u8, usize> = HashMap::new();
    for value in values {
        *by_face.entry(*value).or_insert(0) += 1;
    }
    let mut counts: Vec<usize> = by_face.values().copied().collect();
    counts.sort_by(|a, b| b.cmp(a));
    counts
}

pub fn count_face(values: &[u8], face: u8) -> usize {
    values.iter().filter(|value| **value == face).count()
}

pub fn dice_sum(values: &[u8]) -> i64 {
    values.iter().map(|value| i64::from(*value)).sum()
}

fn distinct_sorted(values: &[u8]) -> Vec<u8> {
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    sorted.dedup();
    sorted
}

fn is_run(values: &[u8]) -> bool {
    values.windows(2).all(|w| w[1] == w[0] + 1)
}
