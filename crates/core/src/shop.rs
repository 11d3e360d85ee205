use crate::{JokerCatalog, JokerDef, RngState};
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct ShopState {
    pub offers: Vec<JokerDef>,
    pub purchased: bool,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShopError {
    #[error("invalid shop offer index")]
    InvalidOfferIndex,
    #[error("already purchased this visit")]
    AlreadyPurchased,
    #[error("not enough coins: need {cost}, have {coins}")]
    NotEnoughCoins { cost: i64, coins: i64 },
}

impl ShopState {
    pub fn generate(catalog: &JokerCatalog, offers: usize, rng: &mut RngState) -> Self {
        Self {
            offers: catalog.pick_offers(offers, rng),
            purchased: false,
        }
    }

    pub fn affordable(&self, index: usize, coins: i64) -> bool {
        !self.purchased
            && self
                .offers
                .get(index)
                .map(|offer| coins >= offer.cost)
                .unwrap_or(false)
    }

    /// Takes one offer. Only one purchase is allowed per visit.
    pub fn buy(&mut self, index: usize, coins: i64) -> Result<JokerDef, ShopError> {
        if self.purchased {
            return Err(ShopError::AlreadyPurchased);
        }
        let offer = self
            .offers
            .get(index)
            .ok_or(ShopError::InvalidOfferIndex)?;
        if coins < offer.cost {
            return Err(ShopError::NotEnoughCoins {
                cost: offer.cost,
                coins,
            });
        }
        self.purchased = true;
        Ok(offer.clone())
    }
}
