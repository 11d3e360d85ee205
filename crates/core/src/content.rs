use crate::{JokerEffect, RngState};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JokerDef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub emoji: String,
    #[serde(default)]
    pub description: String,
    pub cost: i64,
    pub effect: JokerEffect,
}

impl JokerDef {
    pub fn new(id: &str, emoji: &str, name: &str, cost: i64, effect: JokerEffect) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            emoji: emoji.to_string(),
            description: effect.describe(),
            cost,
            effect,
        }
    }

    pub fn describe(&self) -> String {
        if self.description.is_empty() {
            self.effect.describe()
        } else {
            self.description.clone()
        }
    }

    pub fn title(&self) -> String {
        if self.emoji.is_empty() {
            self.name.clone()
        } else {
            format!("{} {}", self.emoji, self.name)
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct JokerCatalog {
    pub jokers: Vec<JokerDef>,
}

impl JokerCatalog {
    pub fn new(jokers: Vec<JokerDef>) -> Self {
        Self { jokers }
    }

    pub fn builtin() -> Self {
        Self::new(builtin_jokers())
    }

    pub fn get(&self, id: &str) -> Option<&JokerDef> {
        self.jokers.iter().find(|joker| joker.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.jokers.is_empty()
    }

    /// Up to `count` distinct jokers in random order.
    pub fn pick_offers(&self, count: usize, rng: &mut RngState) -> Vec<JokerDef> {
        let mut indices: Vec<usize> = (0..self.jokers.len()).collect();
        rng.shuffle(&mut indices);
        indices
            .into_iter()
            .take(count)
            .map(|idx| self.jokers[idx].clone())
            .collect()
    }
}

pub fn builtin_jokers() -> Vec<JokerDef> {
    vec![
        JokerDef::new(
            "j7",
            "💎",
            "Chip Booster",
            4,
            JokerEffect::FlatChips { amount: 10 },
        ),
        JokerDef::new("j2", "✖️", "Multiplier", 6, JokerEffect::FlatMult { amount: 1.0 }),
        JokerDef::new(
            "j3",
            "🍀",
            "Lucky Ticket",
            7,
            JokerEffect::PercentChips { amount: 0.25 },
        ),
        JokerDef::new(
            "j4",
            "🎲",
            "Snake Eyes",
            8,
            JokerEffect::PerFaceMult { face: 1, factor: 3.0 },
        ),
        JokerDef::new(
            "j5",
            "🔥",
            "Six Appeal",
            5,
            JokerEffect::PerFaceChips { face: 6, amount: 20 },
        ),
        JokerDef::new(
            "j6",
            "🌟",
            "Flat Flair",
            7,
            JokerEffect::FlatChips { amount: 25 },
        ),
        JokerDef::new("j1", "➕", "Extra Die", 6, JokerEffect::AddDie { amount: 1 }),
    ]
}
