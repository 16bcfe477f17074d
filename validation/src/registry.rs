//! Report registry — durable storage front for reports and votes.
//!
//! The registry holds no business rules beyond existence checks. Lifecycle
//! invariants concentrate in the quorum coordinator, which calls
//! [`ReportRegistry::append_vote`] and [`ReportRegistry::put_report`] only
//! from inside its own per-report critical section.

use crate::error::ValidationError;
use eco_store::{ReportRecord, ReportStore, VoteRecord, VoteStore};
use eco_types::{
    AccountId, EvidenceRef, IncidentType, Location, ReportId, ReportStatus, Timestamp,
};
use rand::RngCore;
use std::sync::Arc;
use tracing::info;

/// The fields a submitter provides for a new report.
#[derive(Clone, Debug)]
pub struct NewReport {
    pub reporter: AccountId,
    pub incident_type: IncidentType,
    pub location: Location,
    pub description: String,
    pub evidence_ref: EvidenceRef,
    /// Advisory oracle score, when one was obtainable.
    pub confidence: Option<f64>,
}

/// Storage front for report and vote records.
pub struct ReportRegistry<S> {
    store: Arc<S>,
}

impl<S: ReportStore + VoteStore> ReportRegistry<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Create a new `Pending` report with an empty vote set.
    pub fn create_report(
        &self,
        new: NewReport,
        required_votes: u32,
        now: Timestamp,
    ) -> Result<ReportRecord, ValidationError> {
        let record = ReportRecord {
            id: generate_report_id(),
            reporter: new.reporter,
            incident_type: new.incident_type,
            location: new.location,
            description: new.description,
            evidence_ref: new.evidence_ref,
            confidence: new.confidence,
            status: ReportStatus::Pending,
            required_votes,
            created_at: now,
        };
        self.store.put_report(&record)?;
        info!(report = %record.id, incident = %record.incident_type, "report created");
        Ok(record)
    }

    pub fn get_report(&self, id: &ReportId) -> Result<ReportRecord, ValidationError> {
        self.store
            .get_report(id)?
            .ok_or_else(|| ValidationError::NotFound(id.to_string()))
    }

    pub fn reports_for(&self, reporter: &AccountId) -> Result<Vec<ReportRecord>, ValidationError> {
        Ok(self.store.reports_for(reporter)?)
    }

    /// Append a vote. Coordinator-only; callers must hold the report's
    /// critical section.
    pub fn append_vote(&self, vote: &VoteRecord) -> Result<(), ValidationError> {
        match self.store.append_vote(vote) {
            Err(eco_store::StoreError::Duplicate(_)) => Err(ValidationError::DuplicateVote {
                report: vote.report_id.to_string(),
                validator: vote.validator.to_string(),
            }),
            other => Ok(other?),
        }
    }

    pub fn votes_for(&self, id: &ReportId) -> Result<Vec<VoteRecord>, ValidationError> {
        Ok(self.store.votes_for(id)?)
    }

    pub fn has_voted(
        &self,
        id: &ReportId,
        validator: &AccountId,
    ) -> Result<bool, ValidationError> {
        Ok(self.store.has_voted(id, validator)?)
    }

    /// Persist a mutated report. Coordinator-only.
    pub fn put_report(&self, record: &ReportRecord) -> Result<(), ValidationError> {
        Ok(self.store.put_report(record)?)
    }
}

fn generate_report_id() -> ReportId {
    let mut bytes = [0u8; 8];
    rand::thread_rng().fill_bytes(&mut bytes);
    ReportId::new(format!("rpt_{}", hex::encode(bytes)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use eco_store::MemoryStore;

    fn registry() -> ReportRegistry<MemoryStore> {
        ReportRegistry::new(Arc::new(MemoryStore::new()))
    }

    fn submission(confidence: Option<f64>) -> NewReport {
        NewReport {
            reporter: AccountId::from("acct_reporter"),
            incident_type: IncidentType::Pollution,
            location: Location { lat: 6.6, lng: 3.3 },
            description: "oil sheen on the lagoon".into(),
            evidence_ref: EvidenceRef::from("media/42.jpg"),
            confidence,
        }
    }

    #[test]
    fn test_create_report_starts_pending() {
        let registry = registry();
        let report = registry
            .create_report(submission(Some(0.82)), 3, Timestamp::new(100))
            .unwrap();
        assert_eq!(report.status, ReportStatus::Pending);
        assert_eq!(report.required_votes, 3);
        assert!(registry.votes_for(&report.id).unwrap().is_empty());
    }

    #[test]
    fn test_missing_oracle_score_does_not_block_creation() {
        let registry = registry();
        let report = registry
            .create_report(submission(None), 3, Timestamp::new(100))
            .unwrap();
        assert!(report.confidence.is_none());
        assert_eq!(report.status, ReportStatus::Pending);
    }

    #[test]
    fn test_get_unknown_report() {
        let registry = registry();
        let err = registry.get_report(&ReportId::from("rpt_ghost")).unwrap_err();
        assert!(matches!(err, ValidationError::NotFound(_)));
    }

    #[test]
    fn test_report_ids_are_unique() {
        let registry = registry();
        let a = registry
            .create_report(submission(None), 3, Timestamp::new(100))
            .unwrap();
        let b = registry
            .create_report(submission(None), 3, Timestamp::new(100))
            .unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(registry.reports_for(&AccountId::from("acct_reporter")).unwrap().len(), 2);
    }
}
