use serde::{Deserialize, Serialize};

pub use yachtro_core::{GameConfig, GameRules, HandKind, HandRule, JokerCatalog, JokerDef, JokerEffect};

pub const RULES_FILE: &str = "rules.json";
pub const HANDS_FILE: &str = "hands.json";
pub const JOKERS_FILE: &str = "jokers.json";

/// On-disk shape of `jokers.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JokerPack {
    #[serde(default)]
    pub version: u32,
    pub jokers: Vec<JokerDef>,
}
