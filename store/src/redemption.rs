//! Redemption request storage trait.

use crate::StoreError;
use eco_types::{AccountId, IdempotencyKey, OfferId, RedemptionId, RedemptionStatus, Timestamp, TokenAmount};
use serde::{Deserialize, Serialize};

/// A stored redemption request.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RedemptionRecord {
    pub id: RedemptionId,
    pub account_id: AccountId,
    pub offer_id: OfferId,
    pub cost: TokenAmount,
    /// Caller-supplied key; one committed burn per key, ever.
    pub idempotency_key: IdempotencyKey,
    pub status: RedemptionStatus,
    pub created_at: Timestamp,
    pub resolved_at: Option<Timestamp>,
}

/// Trait for redemption request storage operations.
pub trait RedemptionStore {
    fn put_redemption(&self, record: &RedemptionRecord) -> Result<(), StoreError>;
    fn get_redemption(&self, id: &RedemptionId) -> Result<Option<RedemptionRecord>, StoreError>;
    fn find_redemption_by_key(
        &self,
        key: &IdempotencyKey,
    ) -> Result<Option<RedemptionRecord>, StoreError>;
    fn redemptions_for(&self, account_id: &AccountId) -> Result<Vec<RedemptionRecord>, StoreError>;
}
