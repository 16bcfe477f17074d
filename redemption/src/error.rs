use eco_ledger::LedgerError;
use eco_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RedemptionError {
    #[error("offer {0} not found")]
    OfferNotFound(String),

    #[error("offer {0} is not available")]
    OfferUnavailable(String),

    #[error("insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: u64, available: u64 },

    #[error("redemption {0} not found")]
    NotFound(String),

    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}
