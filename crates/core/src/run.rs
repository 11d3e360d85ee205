use crate::{
    DiceError, Dice, GameConfig, GameRules, GameState, HandKind, Inventory, JokerCatalog, Phase,
    RngState, ScoreTables, ScoringSequence, ShopError, ShopState,
};
use thiserror::Error;

mod hand;
mod shop;
mod state;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RunError {
    #[error("invalid phase: {0:?}")]
    InvalidPhase(Phase),
    #[error("no rerolls left")]
    NoRerollsLeft,
    #[error("no discards left")]
    NoDiscardsLeft,
    #[error("no hands left")]
    NoHandsLeft,
    #[error("roll at least once before finishing the hand")]
    NotRolled,
    #[error("round not cleared")]
    RoundNotCleared,
    #[error("shop not available")]
    ShopNotAvailable,
    #[error("dice error: {0}")]
    Dice(#[from] DiceError),
    #[error("shop error: {0}")]
    Shop(#[from] ShopError),
}

/// One player's session: every piece of mutable game state lives here.
#[derive(Debug)]
pub struct RunState {
    pub config: GameConfig,
    pub tables: ScoreTables,
    pub catalog: JokerCatalog,
    pub inventory: Inventory,
    pub rng: RngState,
    pub dice: Dice,
    pub state: GameState,
    pub shop: Option<ShopState>,
    pub last_result: Option<HandResult>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HandResult {
    pub sequence: ScoringSequence,
    pub total: i64,
    pub coins_earned: i64,
    pub celebrate: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandPreview {
    pub hand: HandKind,
    pub chips: i64,
    pub mult: f64,
    pub total: i64,
}

impl RunState {
    pub fn rules(&self) -> &GameRules {
        &self.config.rules
    }
}
