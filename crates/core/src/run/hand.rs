use super::*;
use crate::*;

impl RunState {
    pub fn start_roll(&mut self, events: &mut EventBus) -> Result<(), RunError> {
        self.require_phase(Phase::Idle)?;
        if self.state.rerolls_left == 0 {
            return Err(RunError::NoRerollsLeft);
        }
        self.state.phase = Phase::Rolling;
        events.push(Event::RollStarted {
            rerolls: self.state.rerolls_left,
        });
        Ok(())
    }

    pub fn settle_roll(&mut self, events: &mut EventBus) -> Result<Vec<u8>, RunError> {
        self.require_phase(Phase::Rolling)?;
        self.dice.reroll(&mut self.rng);
        self.state.rerolls_left = self.state.rerolls_left.saturating_sub(1);
        self.state.rolled = true;
        self.state.phase = Phase::Idle;
        let values = self.dice.values();
        tracing::debug!(?values, rerolls = self.state.rerolls_left, "dice rolled");
        events.push(Event::DiceRolled {
            values: values.clone(),
            rerolls: self.state.rerolls_left,
        });
        Ok(values)
    }

    /// [`start_roll`](Self::start_roll) and [`settle_roll`](Self::settle_roll)
    /// back to back, for front ends without a rolling animation.
    pub fn roll(&mut self, events: &mut EventBus) -> Result<Vec<u8>, RunError> {
        self.start_roll(events)?;
        self.settle_roll(events)
    }

    pub fn toggle_hold(&mut self, index: usize, events: &mut EventBus) -> Result<bool, RunError> {
        self.require_phase(Phase::Idle)?;
        let held = self.dice.toggle_hold(index)?;
        events.push(Event::HoldToggled { index, held });
        Ok(held)
    }

    pub fn discard(&mut self, events: &mut EventBus) -> Result<(), RunError> {
        self.require_phase(Phase::Idle)?;
        if self.state.discards_left == 0 {
            return Err(RunError::NoDiscardsLeft);
        }
        self.state.discards_left -= 1;
        self.deal_fresh();
        tracing::debug!(discards = self.state.discards_left, "hand discarded");
        events.push(Event::Discarded {
            discards: self.state.discards_left,
            dice: self.dice.len(),
        });
        Ok(())
    }

    pub fn finish_hand(&mut self, events: &mut EventBus) -> Result<HandResult, RunError> {
        self.require_phase(Phase::Idle)?;
        if self.state.hands_left == 0 {
            return Err(RunError::NoHandsLeft);
        }
        if !self.state.rolled {
            return Err(RunError::NotRolled);
        }

        let sequence = build_scoring(&self.values(), &self.tables, &self.inventory.jokers);
        let total = sequence.final_total();
        let coins_earned = self.config.rules.coins_for(total);
        let celebrate = sequence.hand == HandKind::Yahtzee;

        self.state.score += total;
        self.state.coins += coins_earned;
        self.state.hands_left -= 1;
        self.state.phase = Phase::Finished;

        tracing::info!(
            hand = sequence.hand.id(),
            total,
            coins_earned,
            score = self.state.score,
            "hand scored"
        );
        events.push(Event::HandScored {
            hand: sequence.hand,
            chips: sequence.total.chips,
            mult: sequence.total.mult,
            total,
            coins_earned,
        });
        if celebrate {
            events.push(Event::Celebration {
                hand: sequence.hand,
            });
        }
        if self.state.hands_left == 0 && !self.state.target_reached() {
            self.state.phase = Phase::Lost;
            tracing::info!(score = self.state.score, target = self.state.target, "run lost");
            events.push(Event::RunLost {
                score: self.state.score,
                target: self.state.target,
            });
        }

        let result = HandResult {
            sequence,
            total,
            coins_earned,
            celebrate,
        };
        self.last_result = Some(result.clone());
        Ok(result)
    }

    pub fn next_hand(&mut self, events: &mut EventBus) -> Result<(), RunError> {
        self.require_phase(Phase::Finished)?;
        if self.state.hands_left == 0 {
            return Err(RunError::NoHandsLeft);
        }
        self.deal_fresh();
        self.state.phase = Phase::Idle;
        self.push_hand_started(events);
        Ok(())
    }
}
