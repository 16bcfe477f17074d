//! Report and vote storage traits.
//!
//! Storage is intentionally dumb: existence and uniqueness checks only.
//! Lifecycle rules live in the quorum coordinator, which is the sole writer
//! of report state.

use crate::StoreError;
use eco_types::{
    AccountId, EvidenceRef, IncidentType, Location, ReportId, ReportStatus, Timestamp, Verdict,
};
use serde::{Deserialize, Serialize};

/// A stored incident report.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReportRecord {
    pub id: ReportId,
    pub reporter: AccountId,
    pub incident_type: IncidentType,
    pub location: Location,
    pub description: String,
    /// Externally owned evidence handle; never dereferenced here.
    pub evidence_ref: EvidenceRef,
    /// Advisory oracle score in [0, 1]; absent when the oracle was
    /// unreachable. Never consulted by the quorum arithmetic.
    pub confidence: Option<f64>,
    pub status: ReportStatus,
    /// Quorum size fixed at creation time from the active policy.
    pub required_votes: u32,
    pub created_at: Timestamp,
}

/// A single validator's vote on a report.
///
/// `(report_id, validator)` is the unique key: the first vote stands and
/// later attempts are rejected, never overwritten.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VoteRecord {
    pub report_id: ReportId,
    pub validator: AccountId,
    pub verdict: Verdict,
    pub cast_at: Timestamp,
}

/// Trait for report storage operations.
pub trait ReportStore {
    fn put_report(&self, report: &ReportRecord) -> Result<(), StoreError>;
    fn get_report(&self, id: &ReportId) -> Result<Option<ReportRecord>, StoreError>;
    fn reports_for(&self, reporter: &AccountId) -> Result<Vec<ReportRecord>, StoreError>;
    fn report_count(&self) -> Result<u64, StoreError>;
}

/// Trait for vote storage operations.
pub trait VoteStore {
    /// Append a vote. Fails with [`StoreError::Duplicate`] if this
    /// `(report_id, validator)` pair has already voted.
    fn append_vote(&self, vote: &VoteRecord) -> Result<(), StoreError>;
    fn votes_for(&self, report_id: &ReportId) -> Result<Vec<VoteRecord>, StoreError>;
    fn has_voted(&self, report_id: &ReportId, validator: &AccountId) -> Result<bool, StoreError>;
}
