use crate::GameRules;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Rolling,
    Finished,
    Shop,
    Lost,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub round: u32,
    pub phase: Phase,
    pub target: i64,
    pub score: i64,
    pub coins: i64,
    pub rerolls_left: u8,
    pub discards_left: u8,
    pub hands_left: u8,
    pub num_dice: usize,
    /// At least one roll since the current dice were dealt.
    #[serde(default)]
    pub rolled: bool,
}

impl GameState {
    pub fn new(rules: &GameRules) -> Self {
        Self {
            round: 1,
            phase: Phase::Idle,
            target: rules.start_target,
            score: 0,
            coins: rules.start_coins,
            rerolls_left: rules.start_rerolls,
            discards_left: rules.start_discards,
            hands_left: rules.start_hands,
            num_dice: rules.start_dice.clamp(1, rules.dice_cap()),
            rolled: false,
        }
    }

    pub fn target_reached(&self) -> bool {
        self.score >= self.target
    }
}
