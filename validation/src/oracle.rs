//! External scoring oracle interface.
//!
//! The oracle is advisory: its score annotates a report for display and
//! audit, never feeds the quorum arithmetic, and its absence never blocks
//! report creation.

use eco_types::EvidenceRef;

/// Best-effort confidence scoring for submitted evidence.
pub trait ScoringOracle: Send + Sync {
    /// Score evidence and description, returning a confidence in [0, 1],
    /// or `None` when the oracle cannot produce one.
    fn score(&self, evidence: &EvidenceRef, description: &str) -> Option<f64>;
}

/// An oracle returning a fixed score (or none). Used in tests and when no
/// scoring pipeline is configured.
pub struct NullOracle {
    fixed: Option<f64>,
}

impl NullOracle {
    pub fn absent() -> Self {
        Self { fixed: None }
    }

    pub fn fixed(score: f64) -> Self {
        Self { fixed: Some(score) }
    }
}

impl ScoringOracle for NullOracle {
    fn score(&self, _evidence: &EvidenceRef, _description: &str) -> Option<f64> {
        self.fixed
    }
}
