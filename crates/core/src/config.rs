use crate::HandKind;
use serde::{Deserialize, Serialize};

pub const MAX_DICE: usize = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandRule {
    pub kind: HandKind,
    pub chips: i64,
    pub mult: f64,
}

/// Starting resources and economy knobs for a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameRules {
    pub start_rerolls: u8,
    pub start_discards: u8,
    pub start_hands: u8,
    pub start_dice: usize,
    pub max_dice: usize,
    pub start_target: i64,
    pub target_growth: f64,
    pub start_coins: i64,
    pub coin_floor: i64,
    pub coin_divisor: i64,
    pub shop_offers: usize,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            start_rerolls: 3,
            start_discards: 2,
            start_hands: 1,
            start_dice: 5,
            max_dice: MAX_DICE,
            start_target: 10,
            target_growth: 2.6,
            start_coins: 1,
            coin_floor: 15,
            coin_divisor: 25,
            shop_offers: 3,
        }
    }
}

impl GameRules {
    /// Die cap, never above [`MAX_DICE`] and never zero.
    pub fn dice_cap(&self) -> usize {
        self.max_dice.clamp(1, MAX_DICE)
    }

    pub fn coins_for(&self, total: i64) -> i64 {
        let earned = if self.coin_divisor > 0 {
            total.div_euclid(self.coin_divisor)
        } else {
            0
        };
        earned.max(self.coin_floor)
    }

    pub fn next_target(&self, target: i64) -> i64 {
        crate::round_half_up(target as f64 * self.target_growth)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default)]
    pub rules: GameRules,
    #[serde(default = "default_hand_rules")]
    pub hands: Vec<HandRule>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rules: GameRules::default(),
            hands: default_hand_rules(),
        }
    }
}

impl GameConfig {
    pub fn hand_rule(&self, kind: HandKind) -> Option<&HandRule> {
        self.hands.iter().find(|rule| rule.kind == kind)
    }
}

pub fn default_hand_rules() -> Vec<HandRule> {
    HandKind::ALL
        .iter()
        .map(|kind| {
            let (chips, mult) = crate::default_hand_base(*kind);
            HandRule {
                kind: *kind,
                chips,
                mult,
            }
        })
        .collect()
}
