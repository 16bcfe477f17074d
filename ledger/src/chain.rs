//! Optional external anchoring of ledger entries.
//!
//! The internal ledger is the source of truth. Anchoring is best-effort:
//! a failed submission never invalidates the entry it referenced, and the
//! engine's correctness never depends on what the returned reference
//! looks like.

use eco_store::LedgerEntry;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Opaque reference returned by an external chain submitter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainRef(String);

impl ChainRef {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChainRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Error)]
pub enum ChainError {
    #[error("chain submitter unavailable: {0}")]
    Unavailable(String),
}

/// External anchoring interface.
pub trait ChainSubmitter: Send + Sync {
    fn submit(&self, entry: &LedgerEntry) -> Result<ChainRef, ChainError>;
}

/// A submitter that anchors nowhere and fabricates an opaque reference.
/// Used in tests and when no chain integration is configured.
pub struct NullChainSubmitter;

impl ChainSubmitter for NullChainSubmitter {
    fn submit(&self, _entry: &LedgerEntry) -> Result<ChainRef, ChainError> {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        Ok(ChainRef::new(format!("tx_{}", hex::encode(bytes))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eco_store::RelatedId;
    use eco_types::{AccountId, ReportId, RewardReason, Timestamp};

    #[test]
    fn test_null_submitter_returns_opaque_ref() {
        let entry = LedgerEntry {
            id: 0,
            account_id: AccountId::from("acct_1"),
            delta: 50,
            reason: RewardReason::VerificationReward,
            related: RelatedId::Report(ReportId::from("rpt_1")),
            idempotency_key: None,
            created_at: Timestamp::new(0),
        };
        let a = NullChainSubmitter.submit(&entry).unwrap();
        let b = NullChainSubmitter.submit(&entry).unwrap();
        assert!(a.as_str().starts_with("tx_"));
        assert_ne!(a, b);
    }
}
