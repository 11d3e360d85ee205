use std::path::PathBuf;
use yachtro_core::{builtin_jokers, EventBus, HandKind, JokerEffect, Phase, RunState};
use yachtro_data::{load_game_config, load_jokers};

fn assets_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("assets")
}

fn new_run(seed: u64) -> RunState {
    let config = load_game_config(&assets_root()).expect("load config");
    let catalog = load_jokers(&assets_root()).expect("load jokers");
    RunState::new(config, catalog, seed)
}

#[test]
fn shipped_hands_match_builtin_table() {
    let config = load_game_config(&assets_root()).expect("load config");
    for kind in HandKind::ALL {
        let rule = config.hand_rule(kind).expect("hand rule");
        assert_eq!((rule.chips, rule.mult), yachtro_core::default_hand_base(kind));
    }
}

#[test]
fn shipped_jokers_match_builtin_effects() {
    let catalog = load_jokers(&assets_root()).expect("load jokers");
    let builtin = builtin_jokers();
    assert_eq!(catalog.jokers.len(), builtin.len());
    for joker in &builtin {
        let loaded = catalog.get(&joker.id).expect("joker in file");
        assert_eq!(loaded.effect, joker.effect);
        assert_eq!(loaded.cost, joker.cost);
    }
    let extra = catalog.get("j1").expect("extra die");
    assert_eq!(extra.effect, JokerEffect::AddDie { amount: 1 });
}

#[test]
fn loaded_run_plays_a_hand() {
    let mut run = new_run(99);
    let mut events = EventBus::default();
    run.roll(&mut events).expect("roll");
    let result = run.finish_hand(&mut events).expect("finish");
    assert_eq!(result.total, result.sequence.final_total());
    assert!(matches!(run.phase(), Phase::Finished | Phase::Lost));
    assert!(events.drain().count() >= 3);
}
