//! Thread-safe in-memory backend implementing every storage trait.
//!
//! Each table sits behind its own `Mutex`, so independent tables never
//! contend. Cross-table atomicity (balance check + append) is provided one
//! level up by the ledger's per-account critical sections, not here.

use crate::account::{AccountInfo, AccountStore};
use crate::entry::{LedgerEntry, LedgerEntryStore, NewLedgerEntry, RelatedId};
use crate::offer::{OfferStore, RewardOffer};
use crate::redemption::{RedemptionRecord, RedemptionStore};
use crate::report::{ReportRecord, ReportStore, VoteRecord, VoteStore};
use crate::StoreError;
use eco_types::{AccountId, IdempotencyKey, OfferId, RedemptionId, ReportId, RewardReason};
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Default)]
struct EntryTable {
    next_id: u64,
    entries: Vec<LedgerEntry>,
}

/// An in-memory store backing all engine tables.
/// Thread-safe for use with tokio's multi-threaded runtime.
#[derive(Default)]
pub struct MemoryStore {
    reports: Mutex<HashMap<ReportId, ReportRecord>>,
    votes: Mutex<HashMap<ReportId, Vec<VoteRecord>>>,
    accounts: Mutex<HashMap<AccountId, AccountInfo>>,
    ledger: Mutex<EntryTable>,
    redemptions: Mutex<HashMap<RedemptionId, RedemptionRecord>>,
    offers: Mutex<HashMap<OfferId, RewardOffer>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReportStore for MemoryStore {
    fn put_report(&self, report: &ReportRecord) -> Result<(), StoreError> {
        self.reports
            .lock()
            .unwrap()
            .insert(report.id.clone(), report.clone());
        Ok(())
    }

    fn get_report(&self, id: &ReportId) -> Result<Option<ReportRecord>, StoreError> {
        Ok(self.reports.lock().unwrap().get(id).cloned())
    }

    fn reports_for(&self, reporter: &AccountId) -> Result<Vec<ReportRecord>, StoreError> {
        Ok(self
            .reports
            .lock()
            .unwrap()
            .values()
            .filter(|r| &r.reporter == reporter)
            .cloned()
            .collect())
    }

    fn report_count(&self) -> Result<u64, StoreError> {
        Ok(self.reports.lock().unwrap().len() as u64)
    }
}

impl VoteStore for MemoryStore {
    fn append_vote(&self, vote: &VoteRecord) -> Result<(), StoreError> {
        let mut votes = self.votes.lock().unwrap();
        let report_votes = votes.entry(vote.report_id.clone()).or_default();
        if report_votes.iter().any(|v| v.validator == vote.validator) {
            return Err(StoreError::Duplicate(format!(
                "vote ({}, {})",
                vote.report_id, vote.validator
            )));
        }
        report_votes.push(vote.clone());
        Ok(())
    }

    fn votes_for(&self, report_id: &ReportId) -> Result<Vec<VoteRecord>, StoreError> {
        Ok(self
            .votes
            .lock()
            .unwrap()
            .get(report_id)
            .cloned()
            .unwrap_or_default())
    }

    fn has_voted(&self, report_id: &ReportId, validator: &AccountId) -> Result<bool, StoreError> {
        Ok(self
            .votes
            .lock()
            .unwrap()
            .get(report_id)
            .is_some_and(|votes| votes.iter().any(|v| &v.validator == validator)))
    }
}

impl AccountStore for MemoryStore {
    fn get_account(&self, id: &AccountId) -> Result<Option<AccountInfo>, StoreError> {
        Ok(self.accounts.lock().unwrap().get(id).cloned())
    }

    fn put_account(&self, info: &AccountInfo) -> Result<(), StoreError> {
        self.accounts
            .lock()
            .unwrap()
            .insert(info.id.clone(), info.clone());
        Ok(())
    }

    fn account_exists(&self, id: &AccountId) -> Result<bool, StoreError> {
        Ok(self.accounts.lock().unwrap().contains_key(id))
    }

    fn account_count(&self) -> Result<u64, StoreError> {
        Ok(self.accounts.lock().unwrap().len() as u64)
    }
}

impl LedgerEntryStore for MemoryStore {
    fn append_entry(&self, entry: NewLedgerEntry) -> Result<LedgerEntry, StoreError> {
        let mut table = self.ledger.lock().unwrap();
        let committed = LedgerEntry {
            id: table.next_id,
            account_id: entry.account_id,
            delta: entry.delta,
            reason: entry.reason,
            related: entry.related,
            idempotency_key: entry.idempotency_key,
            created_at: entry.created_at,
        };
        table.next_id += 1;
        table.entries.push(committed.clone());
        Ok(committed)
    }

    fn entries_for(&self, account_id: &AccountId) -> Result<Vec<LedgerEntry>, StoreError> {
        Ok(self
            .ledger
            .lock()
            .unwrap()
            .entries
            .iter()
            .filter(|e| &e.account_id == account_id)
            .cloned()
            .collect())
    }

    fn find_credit(
        &self,
        account_id: &AccountId,
        reason: RewardReason,
        related: &RelatedId,
    ) -> Result<Option<LedgerEntry>, StoreError> {
        Ok(self
            .ledger
            .lock()
            .unwrap()
            .entries
            .iter()
            .find(|e| &e.account_id == account_id && e.reason == reason && &e.related == related)
            .cloned())
    }

    fn find_by_reason(
        &self,
        reason: RewardReason,
        related: &RelatedId,
    ) -> Result<Option<LedgerEntry>, StoreError> {
        Ok(self
            .ledger
            .lock()
            .unwrap()
            .entries
            .iter()
            .find(|e| e.reason == reason && &e.related == related)
            .cloned())
    }

    fn find_by_idempotency_key(
        &self,
        key: &IdempotencyKey,
    ) -> Result<Option<LedgerEntry>, StoreError> {
        Ok(self
            .ledger
            .lock()
            .unwrap()
            .entries
            .iter()
            .find(|e| e.idempotency_key.as_ref() == Some(key))
            .cloned())
    }

    fn entry_count(&self) -> Result<u64, StoreError> {
        Ok(self.ledger.lock().unwrap().entries.len() as u64)
    }
}

impl RedemptionStore for MemoryStore {
    fn put_redemption(&self, record: &RedemptionRecord) -> Result<(), StoreError> {
        self.redemptions
            .lock()
            .unwrap()
            .insert(record.id.clone(), record.clone());
        Ok(())
    }

    fn get_redemption(&self, id: &RedemptionId) -> Result<Option<RedemptionRecord>, StoreError> {
        Ok(self.redemptions.lock().unwrap().get(id).cloned())
    }

    fn find_redemption_by_key(
        &self,
        key: &IdempotencyKey,
    ) -> Result<Option<RedemptionRecord>, StoreError> {
        Ok(self
            .redemptions
            .lock()
            .unwrap()
            .values()
            .find(|r| &r.idempotency_key == key)
            .cloned())
    }

    fn redemptions_for(&self, account_id: &AccountId) -> Result<Vec<RedemptionRecord>, StoreError> {
        Ok(self
            .redemptions
            .lock()
            .unwrap()
            .values()
            .filter(|r| &r.account_id == account_id)
            .cloned()
            .collect())
    }
}

impl OfferStore for MemoryStore {
    fn put_offer(&self, offer: &RewardOffer) -> Result<(), StoreError> {
        self.offers
            .lock()
            .unwrap()
            .insert(offer.id.clone(), offer.clone());
        Ok(())
    }

    fn get_offer(&self, id: &OfferId) -> Result<Option<RewardOffer>, StoreError> {
        Ok(self.offers.lock().unwrap().get(id).cloned())
    }

    fn iter_offers(&self) -> Result<Vec<RewardOffer>, StoreError> {
        let mut offers: Vec<_> = self.offers.lock().unwrap().values().cloned().collect();
        offers.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(offers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eco_types::{EvidenceRef, IncidentType, Location, ReportStatus, Timestamp, TokenAmount, Verdict, WalletReference};

    fn test_report(id: &str) -> ReportRecord {
        ReportRecord {
            id: ReportId::from(id),
            reporter: AccountId::from("acct_reporter"),
            incident_type: IncidentType::Flood,
            location: Location { lat: 6.45, lng: 3.43 },
            description: "flooding after rainfall".into(),
            evidence_ref: EvidenceRef::from("media/1.jpg"),
            confidence: Some(0.87),
            status: ReportStatus::Pending,
            required_votes: 3,
            created_at: Timestamp::new(1000),
        }
    }

    fn test_vote(report: &str, validator: &str) -> VoteRecord {
        VoteRecord {
            report_id: ReportId::from(report),
            validator: AccountId::from(validator),
            verdict: Verdict::Approve,
            cast_at: Timestamp::new(1001),
        }
    }

    #[test]
    fn test_put_get_report() {
        let store = MemoryStore::new();
        store.put_report(&test_report("rpt_1")).unwrap();
        let got = store.get_report(&ReportId::from("rpt_1")).unwrap().unwrap();
        assert_eq!(got.status, ReportStatus::Pending);
        assert!(store.get_report(&ReportId::from("rpt_2")).unwrap().is_none());
    }

    #[test]
    fn test_duplicate_vote_rejected() {
        let store = MemoryStore::new();
        store.append_vote(&test_vote("rpt_1", "acct_v1")).unwrap();
        let err = store.append_vote(&test_vote("rpt_1", "acct_v1")).unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(_)));
        assert_eq!(store.votes_for(&ReportId::from("rpt_1")).unwrap().len(), 1);
    }

    #[test]
    fn test_same_validator_different_reports() {
        let store = MemoryStore::new();
        store.append_vote(&test_vote("rpt_1", "acct_v1")).unwrap();
        store.append_vote(&test_vote("rpt_2", "acct_v1")).unwrap();
        assert!(store
            .has_voted(&ReportId::from("rpt_2"), &AccountId::from("acct_v1"))
            .unwrap());
    }

    #[test]
    fn test_entry_sequence_numbers() {
        let store = MemoryStore::new();
        let entry = |related: &str| NewLedgerEntry {
            account_id: AccountId::from("acct_1"),
            delta: 10,
            reason: RewardReason::ParticipationReward,
            related: RelatedId::Report(ReportId::from(related)),
            idempotency_key: None,
            created_at: Timestamp::new(0),
        };
        let first = store.append_entry(entry("rpt_1")).unwrap();
        let second = store.append_entry(entry("rpt_2")).unwrap();
        assert_eq!(first.id, 0);
        assert_eq!(second.id, 1);
        assert_eq!(store.entry_count().unwrap(), 2);
    }

    #[test]
    fn test_find_credit_by_triple() {
        let store = MemoryStore::new();
        let related = RelatedId::Report(ReportId::from("rpt_1"));
        store
            .append_entry(NewLedgerEntry {
                account_id: AccountId::from("acct_1"),
                delta: 50,
                reason: RewardReason::VerificationReward,
                related: related.clone(),
                idempotency_key: None,
                created_at: Timestamp::new(0),
            })
            .unwrap();
        let found = store
            .find_credit(&AccountId::from("acct_1"), RewardReason::VerificationReward, &related)
            .unwrap();
        assert_eq!(found.unwrap().delta, 50);
        let missing = store
            .find_credit(&AccountId::from("acct_2"), RewardReason::VerificationReward, &related)
            .unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn test_account_balance_roundtrip() {
        let store = MemoryStore::new();
        let info = AccountInfo {
            id: AccountId::from("acct_1"),
            wallet_reference: WalletReference::from("addr_test1"),
            cached_balance: TokenAmount::new(120),
        };
        store.put_account(&info).unwrap();
        let got = store.get_account(&AccountId::from("acct_1")).unwrap().unwrap();
        assert_eq!(got.cached_balance, TokenAmount::new(120));
    }
}
