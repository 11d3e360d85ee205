use crate::JokerDef;
use serde::{Deserialize, Serialize};

/// Owned jokers in purchase order. Duplicates are separate entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Inventory {
    pub jokers: Vec<JokerDef>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct JokerGroup {
    pub joker: JokerDef,
    pub count: usize,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_joker(&mut self, joker: JokerDef) {
        self.jokers.push(joker);
    }

    pub fn len(&self) -> usize {
        self.jokers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jokers.is_empty()
    }

    /// One entry per joker id, in order of first purchase.
    pub fn grouped(&self) -> Vec<JokerGroup> {
        let mut groups: Vec<JokerGroup> = Vec::new();
        for joker in &self.jokers {
            match groups.iter_mut().find(|group| group.joker.id == joker.id) {
                Some(group) => group.count += 1,
                None => groups.push(JokerGroup {
                    joker: joker.clone(),
                    count: 1,
                }),
            }
        }
        groups
    }
}
