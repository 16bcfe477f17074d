use eco_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("account {0} is not registered")]
    UnknownAccount(String),

    #[error("insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: u64, available: u64 },

    #[error("amount must be positive")]
    InvalidAmount,

    #[error("internal consistency fault: {0}")]
    ConsistencyFault(String),

    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}
