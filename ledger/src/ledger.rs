//! The token ledger: idempotent mint and burn over an append-only log.
//!
//! Every mutating operation on an account runs inside that account's
//! critical section, so the balance check and the entry append are one
//! atomic unit. The cached balance on the account record is updated in the
//! same section and therefore always equals the sum of the entry deltas.

use crate::error::LedgerError;
use crate::locks::LockMap;
use eco_store::{
    AccountInfo, AccountStore, LedgerEntry, LedgerEntryStore, NewLedgerEntry, RelatedId,
};
use eco_types::{AccountId, IdempotencyKey, RewardReason, Timestamp, TokenAmount, WalletReference};
use std::sync::Arc;
use tracing::{debug, error};

/// Append-only per-account token ledger.
pub struct TokenLedger<S> {
    store: Arc<S>,
    account_locks: LockMap<AccountId>,
}

impl<S: AccountStore + LedgerEntryStore> TokenLedger<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            account_locks: LockMap::new(),
        }
    }

    /// Register an account. Idempotent: re-opening an existing account
    /// returns it unchanged.
    pub fn open_account(
        &self,
        id: AccountId,
        wallet_reference: WalletReference,
    ) -> Result<AccountInfo, LedgerError> {
        let slot = self.account_locks.slot(&id);
        let _guard = slot.lock().unwrap();

        if let Some(existing) = self.store.get_account(&id)? {
            return Ok(existing);
        }
        let info = AccountInfo {
            id,
            wallet_reference,
            cached_balance: TokenAmount::ZERO,
        };
        self.store.put_account(&info)?;
        Ok(info)
    }

    /// Credit `amount` to an account.
    ///
    /// Idempotent per `(account, reason, related)`: a repeated call with
    /// the same triple returns the previously committed entry.
    pub fn mint(
        &self,
        account_id: &AccountId,
        amount: TokenAmount,
        reason: RewardReason,
        related: RelatedId,
        now: Timestamp,
    ) -> Result<LedgerEntry, LedgerError> {
        if amount.is_zero() {
            return Err(LedgerError::InvalidAmount);
        }

        let slot = self.account_locks.slot(account_id);
        let _guard = slot.lock().unwrap();

        if let Some(existing) = self.store.find_credit(account_id, reason, &related)? {
            return Ok(existing);
        }

        // A verification reward for one report can only ever exist once,
        // whatever account it was paid to. Finding one elsewhere means the
        // engine itself is broken; abort rather than tolerate it.
        if reason == RewardReason::VerificationReward {
            if let Some(prior) = self.store.find_by_reason(reason, &related)? {
                error!(
                    related = ?related,
                    prior_account = %prior.account_id,
                    requested_account = %account_id,
                    "duplicate verification reward detected"
                );
                return Err(LedgerError::ConsistencyFault(format!(
                    "verification reward for {related:?} already paid to {}",
                    prior.account_id
                )));
            }
        }

        let mut info = self
            .store
            .get_account(account_id)?
            .ok_or_else(|| LedgerError::UnknownAccount(account_id.to_string()))?;

        let entry = self.store.append_entry(NewLedgerEntry {
            account_id: account_id.clone(),
            delta: amount.as_credit(),
            reason,
            related,
            idempotency_key: None,
            created_at: now,
        })?;

        info.cached_balance = info
            .cached_balance
            .checked_add(amount)
            .ok_or_else(|| LedgerError::ConsistencyFault("balance overflow".into()))?;
        self.store.put_account(&info)?;

        debug!(account = %account_id, %amount, ?reason, "minted");
        Ok(entry)
    }

    /// Debit `amount` from an account.
    ///
    /// Fails without mutation when the balance is insufficient. Idempotent
    /// per `idempotency_key`: a retried burn returns the committed entry.
    pub fn burn(
        &self,
        account_id: &AccountId,
        amount: TokenAmount,
        related: RelatedId,
        idempotency_key: IdempotencyKey,
        now: Timestamp,
    ) -> Result<LedgerEntry, LedgerError> {
        if amount.is_zero() {
            return Err(LedgerError::InvalidAmount);
        }

        let slot = self.account_locks.slot(account_id);
        let _guard = slot.lock().unwrap();

        if let Some(existing) = self.store.find_by_idempotency_key(&idempotency_key)? {
            return Ok(existing);
        }

        let mut info = self
            .store
            .get_account(account_id)?
            .ok_or_else(|| LedgerError::UnknownAccount(account_id.to_string()))?;

        let new_balance =
            info.cached_balance
                .checked_sub(amount)
                .ok_or(LedgerError::InsufficientBalance {
                    needed: amount.raw(),
                    available: info.cached_balance.raw(),
                })?;

        let entry = self.store.append_entry(NewLedgerEntry {
            account_id: account_id.clone(),
            delta: amount.as_debit(),
            reason: RewardReason::Redemption,
            related,
            idempotency_key: Some(idempotency_key),
            created_at: now,
        })?;

        info.cached_balance = new_balance;
        self.store.put_account(&info)?;

        debug!(account = %account_id, %amount, "burned");
        Ok(entry)
    }

    /// The committed balance of an account. Reads never block writers on
    /// other accounts and never observe a half-applied mutation.
    pub fn balance_of(&self, account_id: &AccountId) -> Result<TokenAmount, LedgerError> {
        self.store
            .get_account(account_id)?
            .map(|info| info.cached_balance)
            .ok_or_else(|| LedgerError::UnknownAccount(account_id.to_string()))
    }

    /// Full entry history for an account, in append order.
    pub fn history(&self, account_id: &AccountId) -> Result<Vec<LedgerEntry>, LedgerError> {
        Ok(self.store.entries_for(account_id)?)
    }

    /// Recompute an account's balance from its entries and compare against
    /// the cache. Divergence is a fault in the engine itself.
    pub fn audit(&self, account_id: &AccountId) -> Result<(), LedgerError> {
        let slot = self.account_locks.slot(account_id);
        let _guard = slot.lock().unwrap();

        let info = self
            .store
            .get_account(account_id)?
            .ok_or_else(|| LedgerError::UnknownAccount(account_id.to_string()))?;
        let sum: i64 = self
            .store
            .entries_for(account_id)?
            .iter()
            .map(|e| e.delta)
            .sum();

        if sum < 0 || sum as u64 != info.cached_balance.raw() {
            error!(account = %account_id, cached = %info.cached_balance, sum, "ledger audit failed");
            return Err(LedgerError::ConsistencyFault(format!(
                "account {account_id}: cached {} vs entry sum {sum}",
                info.cached_balance
            )));
        }
        Ok(())
    }
}
