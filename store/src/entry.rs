//! Append-only ledger entry storage.
//!
//! Entries are immutable once written. Corrections are new compensating
//! entries, never edits, so the full history always sums to the balance.

use crate::StoreError;
use eco_types::{AccountId, IdempotencyKey, RedemptionId, ReportId, RewardReason, Timestamp};
use serde::{Deserialize, Serialize};

/// What a ledger entry settles against, for idempotency and audit.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelatedId {
    Report(ReportId),
    Redemption(RedemptionId),
}

/// A committed, immutable ledger entry. The `id` is a store-assigned
/// sequence number that also gives entries a total order per backend.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub id: u64,
    pub account_id: AccountId,
    /// Signed token delta: positive for mints and refunds, negative for burns.
    pub delta: i64,
    pub reason: RewardReason,
    pub related: RelatedId,
    /// Present only on burn entries, which are keyed by caller retries.
    pub idempotency_key: Option<IdempotencyKey>,
    pub created_at: Timestamp,
}

/// A ledger entry before the store assigns its sequence number.
#[derive(Clone, Debug)]
pub struct NewLedgerEntry {
    pub account_id: AccountId,
    pub delta: i64,
    pub reason: RewardReason,
    pub related: RelatedId,
    pub idempotency_key: Option<IdempotencyKey>,
    pub created_at: Timestamp,
}

/// Trait for append-only ledger entry storage.
pub trait LedgerEntryStore {
    /// Append an entry, assigning its sequence number.
    fn append_entry(&self, entry: NewLedgerEntry) -> Result<LedgerEntry, StoreError>;

    /// All entries for one account, in append order.
    fn entries_for(&self, account_id: &AccountId) -> Result<Vec<LedgerEntry>, StoreError>;

    /// Find an existing credit by its mint idempotency triple.
    fn find_credit(
        &self,
        account_id: &AccountId,
        reason: RewardReason,
        related: &RelatedId,
    ) -> Result<Option<LedgerEntry>, StoreError>;

    /// Find any entry with the given reason and related id, regardless of
    /// account. Used for cross-account invariant checks.
    fn find_by_reason(
        &self,
        reason: RewardReason,
        related: &RelatedId,
    ) -> Result<Option<LedgerEntry>, StoreError>;

    /// Find an existing burn by its caller-supplied idempotency key.
    fn find_by_idempotency_key(
        &self,
        key: &IdempotencyKey,
    ) -> Result<Option<LedgerEntry>, StoreError>;

    fn entry_count(&self) -> Result<u64, StoreError>;
}
