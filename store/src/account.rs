//! Account storage trait.

use crate::StoreError;
use eco_types::{AccountId, TokenAmount, WalletReference};
use serde::{Deserialize, Serialize};

/// Per-account information stored alongside the ledger.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AccountInfo {
    pub id: AccountId,
    /// Opaque external wallet address, handed to fulfillment providers.
    pub wallet_reference: WalletReference,
    /// Derived balance, maintained transactionally by the ledger. Always
    /// equals the sum of this account's ledger entry deltas.
    pub cached_balance: TokenAmount,
}

/// Trait for account storage operations.
pub trait AccountStore {
    fn get_account(&self, id: &AccountId) -> Result<Option<AccountInfo>, StoreError>;
    fn put_account(&self, info: &AccountInfo) -> Result<(), StoreError>;
    fn account_exists(&self, id: &AccountId) -> Result<bool, StoreError>;
    fn account_count(&self) -> Result<u64, StoreError>;
}
