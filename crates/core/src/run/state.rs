use super::*;
use crate::*;

impl RunState {
    pub fn new(config: GameConfig, catalog: JokerCatalog, seed: u64) -> Self {
        let tables = ScoreTables::from_config(&config);
        let state = GameState::new(&config.rules);
        let dice = Dice::fresh(state.num_dice);
        Self {
            config,
            tables,
            catalog,
            inventory: Inventory::new(),
            rng: RngState::from_seed(seed),
            dice,
            state,
            shop: None,
            last_result: None,
        }
    }

    pub fn with_defaults(seed: u64) -> Self {
        Self::new(GameConfig::default(), JokerCatalog::builtin(), seed)
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn values(&self) -> Vec<u8> {
        self.dice.values()
    }

    /// Live score of the dice as they lie, jokers included.
    pub fn preview(&self) -> HandPreview {
        let (hand, score) = score_hand(&self.values(), &self.tables, &self.inventory.jokers);
        HandPreview {
            hand,
            chips: score.chips,
            mult: score.mult,
            total: score.total(),
        }
    }

    pub fn can_roll(&self) -> bool {
        self.state.phase == Phase::Idle && self.state.rerolls_left > 0
    }

    pub fn can_discard(&self) -> bool {
        self.state.phase == Phase::Idle && self.state.discards_left > 0
    }

    pub fn can_finish(&self) -> bool {
        self.state.phase == Phase::Idle && self.state.rolled && self.state.hands_left > 0
    }

    pub fn can_next_hand(&self) -> bool {
        self.state.phase == Phase::Finished && self.state.hands_left > 0
    }

    pub fn can_advance(&self) -> bool {
        self.state.phase == Phase::Finished
            && self.state.hands_left == 0
            && self.state.target_reached()
    }

    /// Starts over with the same rules and catalog; the rng keeps its stream.
    pub fn restart(&mut self, events: &mut EventBus) {
        self.state = GameState::new(&self.config.rules);
        self.inventory = Inventory::new();
        self.shop = None;
        self.last_result = None;
        self.deal_fresh();
        tracing::info!(seed = self.rng.seed(), "run restarted");
        self.push_hand_started(events);
    }

    pub(super) fn deal_fresh(&mut self) {
        self.dice = Dice::fresh(self.state.num_dice);
        self.state.rerolls_left = self.config.rules.start_rerolls;
        self.state.rolled = false;
    }

    pub(super) fn require_phase(&self, phase: Phase) -> Result<(), RunError> {
        if self.state.phase != phase {
            return Err(RunError::InvalidPhase(self.state.phase));
        }
        Ok(())
    }

    pub(super) fn push_hand_started(&self, events: &mut EventBus) {
        events.push(Event::HandStarted {
            round: self.state.round,
            dice: self.dice.len(),
            rerolls: self.state.rerolls_left,
        });
    }
}
