use crate::schema::{
    GameConfig, GameRules, HandRule, JokerCatalog, JokerDef, JokerEffect, JokerPack, HANDS_FILE,
    JOKERS_FILE, RULES_FILE,
};
use anyhow::{bail, Context};
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Reads `rules.json` and `hands.json` from `dir`. Either file may be
/// missing, in which case the built-in values are used.
pub fn load_game_config(dir: &Path) -> anyhow::Result<GameConfig> {
    let mut config = GameConfig::default();
    if let Some(rules) = load_optional_json::<GameRules>(&dir.join(RULES_FILE))? {
        config.rules = rules;
    }
    if let Some(hands) = load_optional_json::<Vec<HandRule>>(&dir.join(HANDS_FILE))? {
        config.hands = hands;
    }
    validate_rules(&config.rules)?;
    validate_hands(&config.hands)?;
    Ok(config)
}

/// Reads `jokers.json` from `dir`, falling back to the built-in catalog.
pub fn load_jokers(dir: &Path) -> anyhow::Result<JokerCatalog> {
    let path = dir.join(JOKERS_FILE);
    let catalog = match load_optional_json::<JokerPack>(&path)? {
        Some(pack) => JokerCatalog::new(pack.jokers),
        None => {
            tracing::debug!(path = %path.display(), "no joker file, using built-in catalog");
            JokerCatalog::builtin()
        }
    };
    validate_jokers(&catalog.jokers).with_context(|| format!("validate {}", path.display()))?;
    Ok(catalog)
}

pub fn validate_rules(rules: &GameRules) -> anyhow::Result<()> {
    let cap = rules.dice_cap();
    if rules.start_dice == 0 || rules.start_dice > cap {
        bail!("start_dice {} outside 1..={}", rules.start_dice, cap);
    }
    if rules.coin_divisor <= 0 {
        bail!("coin_divisor must be positive, got {}", rules.coin_divisor);
    }
    if rules.target_growth <= 0.0 {
        bail!("target_growth must be positive, got {}", rules.target_growth);
    }
    if rules.start_hands == 0 {
        bail!("start_hands must be at least 1");
    }
    Ok(())
}

pub fn validate_hands(hands: &[HandRule]) -> anyhow::Result<()> {
    let mut seen = HashSet::new();
    for rule in hands {
        if !seen.insert(rule.kind) {
            bail!("duplicate hand rule {}", rule.kind.id());
        }
        if !rule.mult.is_finite() {
            bail!("hand {} has a non-finite mult", rule.kind.id());
        }
    }
    Ok(())
}

pub fn validate_jokers(jokers: &[JokerDef]) -> anyhow::Result<()> {
    let mut ids = HashSet::new();
    for joker in jokers {
        if !ids.insert(joker.id.as_str()) {
            bail!("duplicate joker id {}", joker.id);
        }
        if joker.cost < 0 {
            bail!("joker {} has negative cost {}", joker.id, joker.cost);
        }
        match joker.effect {
            JokerEffect::PerFaceChips { face, .. } | JokerEffect::PerFaceMult { face, .. } => {
                if !(1..=6).contains(&face) {
                    bail!("joker {} targets face {}", joker.id, face);
                }
            }
            JokerEffect::AddDie { amount } => {
                if amount == 0 {
                    bail!("joker {} adds zero dice", joker.id);
                }
            }
            JokerEffect::FlatChips { .. }
            | JokerEffect::FlatMult { .. }
            | JokerEffect::PercentChips { .. } => {}
        }
    }
    Ok(())
}

fn load_optional_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }
    load_json(path).map(Some)
}

fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> anyhow::Result<T> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let value = serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write(dir: &Path, name: &str, body: &str) {
        let mut file = fs::File::create(dir.join(name)).expect("create");
        file.write_all(body.as_bytes()).expect("write");
    }

    #[test]
    fn empty_dir_uses_builtins() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = load_game_config(dir.path()).expect("config");
        assert_eq!(config.rules.start_rerolls, 3);
        assert_eq!(config.hands.len(), 9);
        let catalog = load_jokers(dir.path()).expect("jokers");
        assert_eq!(catalog.jokers.len(), 7);
    }

    #[test]
    fn partial_rules_keep_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        write(dir.path(), RULES_FILE, r#"{ "start_rerolls": 5 }"#);
        let config = load_game_config(dir.path()).expect("config");
        assert_eq!(config.rules.start_rerolls, 5);
        assert_eq!(config.rules.start_discards, 2);
    }

    #[test]
    fn rejects_bad_faces() {
        let dir = tempfile::tempdir().expect("tempdir");
        write(
            dir.path(),
            JOKERS_FILE,
            r#"{ "jokers": [ { "id": "bad", "name": "Bad", "cost": 1,
                 "effect": { "type": "per_face_chips", "face": 7, "amount": 3 } } ] }"#,
        );
        let err = load_jokers(dir.path()).expect_err("face 7");
        assert!(format!("{err:#}").contains("targets face 7"));
    }

    #[test]
    fn rejects_zero_start_dice() {
        let rules = GameRules {
            start_dice: 0,
            ..GameRules::default()
        };
        assert!(validate_rules(&rules).is_err());
    }

    #[test]
    fn malformed_json_names_the_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        write(dir.path(), HANDS_FILE, "[ not json");
        let err = load_game_config(dir.path()).expect_err("parse error");
        assert!(format!("{err:#}").contains(HANDS_FILE));
    }
}
