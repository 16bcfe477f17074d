//! Redemption processor — burn now, fulfill later, compensate on failure.
//!
//! `redeem` commits the burn and records a `Pending` request inside a
//! critical section keyed by the caller's idempotency key, so a retried
//! call settles against the first attempt instead of burning twice.
//! `resolve` is the provider callback re-entry point; it tolerates
//! at-least-once delivery by treating an already-terminal request as
//! settled.

use crate::catalog::RewardCatalog;
use crate::error::RedemptionError;
use crate::provider::FulfillmentOutcome;
use eco_ledger::{LedgerError, LockMap, TokenLedger};
use eco_store::{
    AccountStore, LedgerEntryStore, OfferStore, RedemptionRecord, RedemptionStore, RelatedId,
};
use eco_types::{
    AccountId, IdempotencyKey, OfferId, RedemptionId, RedemptionStatus, RewardReason, Timestamp,
};
use rand::RngCore;
use std::sync::Arc;
use tracing::{info, warn};

/// Orchestrates token burn plus external fulfillment.
pub struct RedemptionProcessor<S> {
    store: Arc<S>,
    ledger: Arc<TokenLedger<S>>,
    catalog: RewardCatalog<S>,
    key_locks: LockMap<IdempotencyKey>,
    request_locks: LockMap<RedemptionId>,
}

impl<S> RedemptionProcessor<S>
where
    S: OfferStore + RedemptionStore + AccountStore + LedgerEntryStore,
{
    pub fn new(store: Arc<S>, ledger: Arc<TokenLedger<S>>) -> Self {
        let catalog = RewardCatalog::new(Arc::clone(&store));
        Self {
            store,
            ledger,
            catalog,
            key_locks: LockMap::new(),
            request_locks: LockMap::new(),
        }
    }

    pub fn catalog(&self) -> &RewardCatalog<S> {
        &self.catalog
    }

    /// Burn the offer cost and open a `Pending` redemption request.
    ///
    /// A repeated call with the same `idempotency_key` returns the prior
    /// request without touching the ledger. Fails without mutation when
    /// the offer is unavailable or the balance is short.
    pub fn redeem(
        &self,
        account_id: &AccountId,
        offer_id: &OfferId,
        idempotency_key: IdempotencyKey,
        now: Timestamp,
    ) -> Result<RedemptionRecord, RedemptionError> {
        let slot = self.key_locks.slot(&idempotency_key);
        let _guard = slot.lock().unwrap();

        if let Some(existing) = self.store.find_redemption_by_key(&idempotency_key)? {
            return Ok(existing);
        }

        let offer = self.catalog.get_available(offer_id)?;
        let id = generate_redemption_id();

        match self.ledger.burn(
            account_id,
            offer.cost,
            RelatedId::Redemption(id.clone()),
            idempotency_key.clone(),
            now,
        ) {
            Ok(_) => {}
            Err(LedgerError::InsufficientBalance { needed, available }) => {
                return Err(RedemptionError::InsufficientBalance { needed, available });
            }
            Err(e) => return Err(e.into()),
        }

        let record = RedemptionRecord {
            id: id.clone(),
            account_id: account_id.clone(),
            offer_id: offer_id.clone(),
            cost: offer.cost,
            idempotency_key,
            status: RedemptionStatus::Pending,
            created_at: now,
            resolved_at: None,
        };
        self.store.put_redemption(&record)?;

        info!(redemption = %id, account = %account_id, offer = %offer_id, cost = %offer.cost, "burn committed");
        Ok(record)
    }

    /// Settle a redemption from the provider's outcome.
    ///
    /// Failure (including timeout) mints a compensating refund, keyed by
    /// the redemption id so a replayed callback never refunds twice. An
    /// already-terminal request is returned as-is.
    pub fn resolve(
        &self,
        id: &RedemptionId,
        outcome: FulfillmentOutcome,
        now: Timestamp,
    ) -> Result<RedemptionRecord, RedemptionError> {
        let slot = self.request_locks.slot(id);
        let _guard = slot.lock().unwrap();

        let mut record = self
            .store
            .get_redemption(id)?
            .ok_or_else(|| RedemptionError::NotFound(id.to_string()))?;
        if record.status.is_terminal() {
            return Ok(record);
        }

        match outcome {
            FulfillmentOutcome::Delivered => {
                record.status = RedemptionStatus::Fulfilled;
                info!(redemption = %id, "fulfilled");
            }
            FulfillmentOutcome::Failed(reason) => {
                self.ledger.mint(
                    &record.account_id,
                    record.cost,
                    RewardReason::RedemptionRefund,
                    RelatedId::Redemption(id.clone()),
                    now,
                )?;
                record.status = RedemptionStatus::Failed;
                warn!(redemption = %id, %reason, "fulfillment failed, refunded");
            }
        }
        record.resolved_at = Some(now);
        self.store.put_redemption(&record)?;
        Ok(record)
    }

    pub fn get(&self, id: &RedemptionId) -> Result<RedemptionRecord, RedemptionError> {
        self.store
            .get_redemption(id)?
            .ok_or_else(|| RedemptionError::NotFound(id.to_string()))
    }

    pub fn redemptions_for(
        &self,
        account_id: &AccountId,
    ) -> Result<Vec<RedemptionRecord>, RedemptionError> {
        Ok(self.store.redemptions_for(account_id)?)
    }
}

fn generate_redemption_id() -> RedemptionId {
    let mut bytes = [0u8; 8];
    rand::thread_rng().fill_bytes(&mut bytes);
    RedemptionId::new(format!("rdm_{}", hex::encode(bytes)))
}
