use eco_ledger::LedgerError;
use eco_store::StoreError;
use eco_types::ReportStatus;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("report {0} not found")]
    NotFound(String),

    #[error("report {report} is already {status:?}; votes are refused")]
    InvalidState {
        report: String,
        status: ReportStatus,
    },

    #[error("validator {validator} has already voted on report {report}")]
    DuplicateVote {
        report: String,
        validator: String,
    },

    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}
