//! Reward offer records and storage trait.

use crate::StoreError;
use eco_types::{OfferId, TokenAmount};
use serde::{Deserialize, Serialize};

/// Which kind of external provider fulfills an offer.
///
/// One variant per provider type with a uniform fulfillment contract —
/// adding a provider means adding a variant, not a string key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderCapability {
    MobileData,
    Airtime,
    TreeKit,
    SolarLamp,
}

/// A redeemable reward offer. Read-mostly; mutated only administratively.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RewardOffer {
    pub id: OfferId,
    pub title: String,
    pub cost: TokenAmount,
    pub capability: ProviderCapability,
    pub available: bool,
}

/// Trait for offer storage operations.
pub trait OfferStore {
    fn put_offer(&self, offer: &RewardOffer) -> Result<(), StoreError>;
    fn get_offer(&self, id: &OfferId) -> Result<Option<RewardOffer>, StoreError>;
    fn iter_offers(&self) -> Result<Vec<RewardOffer>, StoreError>;
}
