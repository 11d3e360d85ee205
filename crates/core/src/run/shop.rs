use super::*;
use crate::*;

impl RunState {
    pub fn open_shop(&mut self, events: &mut EventBus) -> Result<(), RunError> {
        if !self.can_advance() {
            return Err(RunError::RoundNotCleared);
        }
        let shop = ShopState::generate(&self.catalog, self.config.rules.shop_offers, &mut self.rng);
        events.push(Event::ShopEntered {
            offers: shop.offers.len(),
        });
        self.shop = Some(shop);
        self.state.phase = Phase::Shop;
        Ok(())
    }

    pub fn buy_joker(&mut self, index: usize, events: &mut EventBus) -> Result<JokerDef, RunError> {
        self.require_phase(Phase::Shop)?;
        let shop = self.shop.as_mut().ok_or(RunError::ShopNotAvailable)?;
        let joker = shop.buy(index, self.state.coins)?;
        self.state.coins -= joker.cost;

        let extra = joker.effect.extra_dice();
        if extra > 0 {
            let cap = self.config.rules.dice_cap();
            self.state.num_dice = self.state.num_dice.saturating_add(extra).min(cap);
        }
        self.inventory.add_joker(joker.clone());

        tracing::info!(id = %joker.id, cost = joker.cost, coins = self.state.coins, "joker bought");
        events.push(Event::JokerBought {
            id: joker.id.clone(),
            cost: joker.cost,
            coins: self.state.coins,
        });
        Ok(joker)
    }

    pub fn leave_shop(&mut self, events: &mut EventBus) -> Result<(), RunError> {
        self.require_phase(Phase::Shop)?;
        self.advance_round(events);
        Ok(())
    }

    /// Advances without visiting the shop.
    pub fn next_round(&mut self, events: &mut EventBus) -> Result<(), RunError> {
        if !self.can_advance() {
            return Err(RunError::RoundNotCleared);
        }
        self.advance_round(events);
        Ok(())
    }

    fn advance_round(&mut self, events: &mut EventBus) {
        let rules = &self.config.rules;
        self.state.round += 1;
        self.state.target = rules.next_target(self.state.target);
        self.state.score = 0;
        self.state.hands_left = rules.start_hands;
        self.state.discards_left = rules.start_discards;
        self.state.phase = Phase::Idle;
        self.shop = None;
        self.deal_fresh();
        tracing::info!(round = self.state.round, target = self.state.target, "round advanced");
        events.push(Event::RoundAdvanced {
            round: self.state.round,
            target: self.state.target,
        });
        self.push_hand_started(events);
    }
}
