use eco_ledger::LedgerError;
use eco_redemption::RedemptionError;
use eco_validation::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("redemption error: {0}")]
    Redemption(#[from] RedemptionError),

    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("configuration error: {0}")]
    Config(String),
}
