//! Reward catalog — read-mostly offer lookup.

use crate::error::RedemptionError;
use eco_store::{OfferStore, ProviderCapability, RewardOffer};
use eco_types::{OfferId, TokenAmount};
use std::sync::Arc;

/// Lookup front for redeemable offers.
pub struct RewardCatalog<S> {
    store: Arc<S>,
}

impl<S: OfferStore> RewardCatalog<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Fetch an offer, requiring it to be available.
    pub fn get_available(&self, id: &OfferId) -> Result<RewardOffer, RedemptionError> {
        let offer = self
            .store
            .get_offer(id)?
            .ok_or_else(|| RedemptionError::OfferNotFound(id.to_string()))?;
        if !offer.available {
            return Err(RedemptionError::OfferUnavailable(id.to_string()));
        }
        Ok(offer)
    }

    pub fn list(&self) -> Result<Vec<RewardOffer>, RedemptionError> {
        Ok(self.store.iter_offers()?)
    }

    /// Load the stock offer set. Administrative; offers are read-only to
    /// the redemption path.
    pub fn seed_defaults(&self) -> Result<(), RedemptionError> {
        for offer in default_offers() {
            self.store.put_offer(&offer)?;
        }
        Ok(())
    }
}

/// The stock offer set from the original platform catalog.
pub fn default_offers() -> Vec<RewardOffer> {
    vec![
        RewardOffer {
            id: OfferId::from("offer_1"),
            title: "Mobile Data 1GB".into(),
            cost: TokenAmount::new(25),
            capability: ProviderCapability::MobileData,
            available: true,
        },
        RewardOffer {
            id: OfferId::from("offer_2"),
            title: "Airtime ₦500".into(),
            cost: TokenAmount::new(30),
            capability: ProviderCapability::Airtime,
            available: true,
        },
        RewardOffer {
            id: OfferId::from("offer_3"),
            title: "Tree Planting Kit".into(),
            cost: TokenAmount::new(100),
            capability: ProviderCapability::TreeKit,
            available: true,
        },
        RewardOffer {
            id: OfferId::from("offer_4"),
            title: "Solar Lamp".into(),
            cost: TokenAmount::new(200),
            capability: ProviderCapability::SolarLamp,
            available: false,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use eco_store::MemoryStore;

    fn catalog() -> RewardCatalog<MemoryStore> {
        let catalog = RewardCatalog::new(Arc::new(MemoryStore::new()));
        catalog.seed_defaults().unwrap();
        catalog
    }

    #[test]
    fn test_available_offer() {
        let catalog = catalog();
        let offer = catalog.get_available(&OfferId::from("offer_1")).unwrap();
        assert_eq!(offer.cost, TokenAmount::new(25));
        assert_eq!(offer.capability, ProviderCapability::MobileData);
    }

    #[test]
    fn test_out_of_stock_offer() {
        let catalog = catalog();
        let err = catalog.get_available(&OfferId::from("offer_4")).unwrap_err();
        assert!(matches!(err, RedemptionError::OfferUnavailable(_)));
    }

    #[test]
    fn test_unknown_offer() {
        let catalog = catalog();
        let err = catalog.get_available(&OfferId::from("offer_99")).unwrap_err();
        assert!(matches!(err, RedemptionError::OfferNotFound(_)));
    }

    #[test]
    fn test_list_is_sorted() {
        let catalog = catalog();
        let offers = catalog.list().unwrap();
        assert_eq!(offers.len(), 4);
        assert_eq!(offers[0].id, OfferId::from("offer_1"));
    }
}
