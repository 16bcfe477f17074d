//! Fulfillment provider dispatch.
//!
//! One capability variant per provider type, each behind the same
//! `fulfill` contract. Providers are external and unreliable: calls may
//! block, fail, or be retried, and their outcomes re-enter the processor
//! through [`crate::RedemptionProcessor::resolve`].

use eco_store::{ProviderCapability, RewardOffer};
use eco_types::WalletReference;
use std::collections::HashMap;
use std::sync::Arc;

/// The provider's verdict on one fulfillment attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FulfillmentOutcome {
    Delivered,
    Failed(String),
}

/// External delivery of a redeemed offer.
pub trait FulfillmentProvider: Send + Sync {
    fn fulfill(&self, offer: &RewardOffer, wallet: &WalletReference) -> FulfillmentOutcome;
}

/// Routes offers to the provider registered for their capability.
#[derive(Default)]
pub struct FulfillmentRouter {
    providers: HashMap<ProviderCapability, Arc<dyn FulfillmentProvider>>,
}

impl FulfillmentRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        capability: ProviderCapability,
        provider: Arc<dyn FulfillmentProvider>,
    ) {
        self.providers.insert(capability, provider);
    }

    pub fn route(&self, capability: ProviderCapability) -> Option<Arc<dyn FulfillmentProvider>> {
        self.providers.get(&capability).cloned()
    }
}

/// A provider that always answers with a fixed outcome. Used in tests.
pub struct StaticProvider {
    outcome: FulfillmentOutcome,
}

impl StaticProvider {
    pub fn delivering() -> Self {
        Self {
            outcome: FulfillmentOutcome::Delivered,
        }
    }

    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            outcome: FulfillmentOutcome::Failed(reason.into()),
        }
    }
}

impl FulfillmentProvider for StaticProvider {
    fn fulfill(&self, _offer: &RewardOffer, _wallet: &WalletReference) -> FulfillmentOutcome {
        self.outcome.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_router_dispatches_by_capability() {
        let mut router = FulfillmentRouter::new();
        router.register(ProviderCapability::Airtime, Arc::new(StaticProvider::delivering()));
        assert!(router.route(ProviderCapability::Airtime).is_some());
        assert!(router.route(ProviderCapability::TreeKit).is_none());
    }
}
