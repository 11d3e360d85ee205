use crate::HandKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Event {
    HandStarted {
        round: u32,
        dice: usize,
        rerolls: u8,
    },
    RollStarted { rerolls: u8 },
    DiceRolled { values: Vec<u8>, rerolls: u8 },
    HoldToggled { index: usize, held: bool },
    Discarded { discards: u8, dice: usize },
    HandScored {
        hand: HandKind,
        chips: i64,
        mult: f64,
        total: i64,
        coins_earned: i64,
    },
    Celebration { hand: HandKind },
    ShopEntered { offers: usize },
    JokerBought {
        id: String,
        cost: i64,
        coins: i64,
    },
    RoundAdvanced { round: u32, target: i64 },
    RunLost { score: i64, target: i64 },
}

#[derive(Debug, Default)]
pub struct EventBus {
    queue: Vec<Event>,
}

impl EventBus {
    pub fn push(&mut self, event: Event) {
        self.queue.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.queue.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
