//! Quorum coordinator — vote accounting and the terminal report transition.
//!
//! `cast_vote` is the single public mutation. Everything it does for one
//! report — duplicate check, vote append, participation mint, tally, and
//! the quorum-triggered transition plus verification mint — runs inside
//! that report's critical section, so exactly one caller can fire the
//! terminal transition. Lock order is report first, then account; no path
//! takes them the other way round.

use crate::error::ValidationError;
use crate::registry::ReportRegistry;
use eco_ledger::{LockMap, TokenLedger};
use eco_store::{
    AccountStore, LedgerEntry, LedgerEntryStore, RelatedId, ReportStore, VoteRecord, VoteStore,
};
use eco_types::{AccountId, ReportId, ReportStatus, RewardPolicy, Timestamp, Verdict};
use std::sync::Arc;
use tracing::info;

/// Vote counts for one report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VoteTally {
    pub approvals: u32,
    pub rejections: u32,
    pub required: u32,
}

impl VoteTally {
    /// The quorum decision rule.
    ///
    /// Fires exactly when all required votes are in — never earlier, so
    /// the outcome is independent of arrival order. A tie rejects:
    /// uncertain evidence never issues a reward.
    pub fn decide(&self) -> Option<ReportStatus> {
        if self.approvals + self.rejections != self.required {
            return None;
        }
        if self.approvals > self.rejections {
            Some(ReportStatus::Verified)
        } else {
            Some(ReportStatus::Rejected)
        }
    }
}

/// What an accepted vote produced.
#[derive(Clone, Debug)]
pub struct VoteOutcome {
    /// The participation reward committed for this vote.
    pub participation: LedgerEntry,
    pub tally: VoteTally,
    /// The terminal state, when this vote completed the quorum.
    pub decision: Option<ReportStatus>,
}

/// Owns report lifecycle state and vote accounting.
pub struct QuorumCoordinator<S> {
    registry: Arc<ReportRegistry<S>>,
    ledger: Arc<TokenLedger<S>>,
    policy: RewardPolicy,
    report_locks: LockMap<ReportId>,
}

impl<S> QuorumCoordinator<S>
where
    S: ReportStore + VoteStore + AccountStore + LedgerEntryStore,
{
    pub fn new(
        registry: Arc<ReportRegistry<S>>,
        ledger: Arc<TokenLedger<S>>,
        policy: RewardPolicy,
    ) -> Self {
        Self {
            registry,
            ledger,
            policy,
            report_locks: LockMap::new(),
        }
    }

    pub fn policy(&self) -> &RewardPolicy {
        &self.policy
    }

    /// Cast a validator's vote on a pending report.
    ///
    /// On success the vote is recorded and a participation reward is minted
    /// to the validator, keyed so a retried call never double-pays. When
    /// this vote completes the quorum the report transitions to its
    /// terminal state; a `Verified` decision also mints the verification
    /// reward to the reporter, at most once per report ever.
    pub fn cast_vote(
        &self,
        report_id: &ReportId,
        validator: &AccountId,
        verdict: Verdict,
        now: Timestamp,
    ) -> Result<VoteOutcome, ValidationError> {
        let slot = self.report_locks.slot(report_id);
        let _guard = slot.lock().unwrap();

        let mut report = self.registry.get_report(report_id)?;
        if report.status.is_terminal() {
            return Err(ValidationError::InvalidState {
                report: report_id.to_string(),
                status: report.status,
            });
        }
        if self.registry.has_voted(report_id, validator)? {
            return Err(ValidationError::DuplicateVote {
                report: report_id.to_string(),
                validator: validator.to_string(),
            });
        }

        // Refuse unknown validators before recording anything, so a failed
        // call leaves the vote set untouched.
        self.ledger.balance_of(validator)?;

        self.registry.append_vote(&VoteRecord {
            report_id: report_id.clone(),
            validator: validator.clone(),
            verdict,
            cast_at: now,
        })?;

        let participation = self.ledger.mint(
            validator,
            self.policy.participation_reward(verdict),
            eco_types::RewardReason::ParticipationReward,
            RelatedId::Report(report_id.clone()),
            now,
        )?;

        let votes = self.registry.votes_for(report_id)?;
        let tally = VoteTally {
            approvals: votes.iter().filter(|v| v.verdict == Verdict::Approve).count() as u32,
            rejections: votes.iter().filter(|v| v.verdict == Verdict::Reject).count() as u32,
            required: report.required_votes,
        };

        let decision = tally.decide();
        if let Some(status) = decision {
            if status == ReportStatus::Verified {
                self.ledger.mint(
                    &report.reporter,
                    self.policy.verification_reward,
                    eco_types::RewardReason::VerificationReward,
                    RelatedId::Report(report_id.clone()),
                    now,
                )?;
            }
            report.status = status;
            self.registry.put_report(&report)?;
            info!(
                report = %report_id,
                approvals = tally.approvals,
                rejections = tally.rejections,
                ?status,
                "quorum reached"
            );
        }

        Ok(VoteOutcome {
            participation,
            tally,
            decision,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::NewReport;
    use eco_store::MemoryStore;
    use eco_types::{EvidenceRef, IncidentType, Location, TokenAmount, WalletReference};

    struct Fixture {
        registry: Arc<ReportRegistry<MemoryStore>>,
        ledger: Arc<TokenLedger<MemoryStore>>,
        coordinator: QuorumCoordinator<MemoryStore>,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(MemoryStore::new());
        let registry = Arc::new(ReportRegistry::new(Arc::clone(&store)));
        let ledger = Arc::new(TokenLedger::new(Arc::clone(&store)));
        let coordinator = QuorumCoordinator::new(
            Arc::clone(&registry),
            Arc::clone(&ledger),
            RewardPolicy::platform_defaults(),
        );
        Fixture {
            registry,
            ledger,
            coordinator,
        }
    }

    fn account(f: &Fixture, id: &str) -> AccountId {
        let id = AccountId::from(id);
        f.ledger
            .open_account(id.clone(), WalletReference::from("addr_test"))
            .unwrap();
        id
    }

    fn pending_report(f: &Fixture, reporter: &AccountId) -> ReportId {
        f.registry
            .create_report(
                NewReport {
                    reporter: reporter.clone(),
                    incident_type: IncidentType::Flood,
                    location: Location { lat: 6.45, lng: 3.43 },
                    description: "street flooding".into(),
                    evidence_ref: EvidenceRef::from("media/1.jpg"),
                    confidence: Some(0.9),
                },
                3,
                Timestamp::new(100),
            )
            .unwrap()
            .id
    }

    #[test]
    fn test_tally_decides_only_at_quorum() {
        let partial = VoteTally { approvals: 2, rejections: 0, required: 3 };
        assert_eq!(partial.decide(), None);
        let majority = VoteTally { approvals: 2, rejections: 1, required: 3 };
        assert_eq!(majority.decide(), Some(ReportStatus::Verified));
        let minority = VoteTally { approvals: 1, rejections: 2, required: 3 };
        assert_eq!(minority.decide(), Some(ReportStatus::Rejected));
    }

    #[test]
    fn test_tie_rejects() {
        let tie = VoteTally { approvals: 2, rejections: 2, required: 4 };
        assert_eq!(tie.decide(), Some(ReportStatus::Rejected));
    }

    #[test]
    fn test_approve_majority_verifies_any_order() {
        // Approve, Approve, Reject in every arrival order.
        let orders = [
            [Verdict::Approve, Verdict::Approve, Verdict::Reject],
            [Verdict::Approve, Verdict::Reject, Verdict::Approve],
            [Verdict::Reject, Verdict::Approve, Verdict::Approve],
        ];
        for order in orders {
            let f = fixture();
            let reporter = account(&f, "acct_reporter");
            let report = pending_report(&f, &reporter);
            let validators: Vec<_> = (0..3).map(|i| account(&f, &format!("acct_v{i}"))).collect();

            let mut last = None;
            for (validator, verdict) in validators.iter().zip(order) {
                last = Some(
                    f.coordinator
                        .cast_vote(&report, validator, verdict, Timestamp::new(200))
                        .unwrap(),
                );
            }
            assert_eq!(last.unwrap().decision, Some(ReportStatus::Verified));
            assert_eq!(
                f.registry.get_report(&report).unwrap().status,
                ReportStatus::Verified
            );
            assert_eq!(
                f.ledger.balance_of(&reporter).unwrap(),
                TokenAmount::new(50)
            );
        }
    }

    #[test]
    fn test_participation_rewards_per_verdict() {
        let f = fixture();
        let reporter = account(&f, "acct_reporter");
        let report = pending_report(&f, &reporter);
        let v1 = account(&f, "acct_v1");
        let v2 = account(&f, "acct_v2");
        let v3 = account(&f, "acct_v3");

        f.coordinator.cast_vote(&report, &v1, Verdict::Approve, Timestamp::new(200)).unwrap();
        f.coordinator.cast_vote(&report, &v2, Verdict::Approve, Timestamp::new(201)).unwrap();
        f.coordinator.cast_vote(&report, &v3, Verdict::Reject, Timestamp::new(202)).unwrap();

        assert_eq!(f.ledger.balance_of(&v1).unwrap(), TokenAmount::new(10));
        assert_eq!(f.ledger.balance_of(&v2).unwrap(), TokenAmount::new(10));
        assert_eq!(f.ledger.balance_of(&v3).unwrap(), TokenAmount::new(5));
    }

    #[test]
    fn test_reject_majority_mints_no_verification_reward() {
        let f = fixture();
        let reporter = account(&f, "acct_reporter");
        let report = pending_report(&f, &reporter);
        let verdicts = [Verdict::Approve, Verdict::Reject, Verdict::Reject];
        for (i, verdict) in verdicts.into_iter().enumerate() {
            let v = account(&f, &format!("acct_v{i}"));
            f.coordinator
                .cast_vote(&report, &v, verdict, Timestamp::new(200))
                .unwrap();
        }
        assert_eq!(
            f.registry.get_report(&report).unwrap().status,
            ReportStatus::Rejected
        );
        assert_eq!(f.ledger.balance_of(&reporter).unwrap(), TokenAmount::ZERO);
        assert!(f.ledger.history(&reporter).unwrap().is_empty());
    }

    #[test]
    fn test_duplicate_vote_leaves_state_unchanged() {
        let f = fixture();
        let reporter = account(&f, "acct_reporter");
        let report = pending_report(&f, &reporter);
        let v1 = account(&f, "acct_v1");

        f.coordinator.cast_vote(&report, &v1, Verdict::Approve, Timestamp::new(200)).unwrap();
        let err = f
            .coordinator
            .cast_vote(&report, &v1, Verdict::Reject, Timestamp::new(201))
            .unwrap_err();
        assert!(matches!(err, ValidationError::DuplicateVote { .. }));
        assert_eq!(f.registry.votes_for(&report).unwrap().len(), 1);
        assert_eq!(f.ledger.balance_of(&v1).unwrap(), TokenAmount::new(10));
    }

    #[test]
    fn test_vote_after_terminal_refused() {
        let f = fixture();
        let reporter = account(&f, "acct_reporter");
        let report = pending_report(&f, &reporter);
        for i in 0..3 {
            let v = account(&f, &format!("acct_v{i}"));
            f.coordinator
                .cast_vote(&report, &v, Verdict::Approve, Timestamp::new(200))
                .unwrap();
        }
        let late = account(&f, "acct_late");
        let err = f
            .coordinator
            .cast_vote(&report, &late, Verdict::Reject, Timestamp::new(300))
            .unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidState { status: ReportStatus::Verified, .. }
        ));
        assert_eq!(f.registry.votes_for(&report).unwrap().len(), 3);
        assert_eq!(f.ledger.balance_of(&late).unwrap(), TokenAmount::ZERO);
    }

    #[test]
    fn test_unknown_report() {
        let f = fixture();
        let v1 = account(&f, "acct_v1");
        let err = f
            .coordinator
            .cast_vote(&ReportId::from("rpt_ghost"), &v1, Verdict::Approve, Timestamp::new(200))
            .unwrap_err();
        assert!(matches!(err, ValidationError::NotFound(_)));
    }

    #[test]
    fn test_concurrent_votes_fire_exactly_one_transition() {
        use std::thread;

        let f = Arc::new(fixture());
        let reporter = account(&f, "acct_reporter");
        let report = pending_report(&f, &reporter);
        let validators: Vec<_> = (0..3).map(|i| account(&f, &format!("acct_v{i}"))).collect();

        let mut handles = Vec::new();
        for validator in validators {
            let f = Arc::clone(&f);
            let report = report.clone();
            handles.push(thread::spawn(move || {
                f.coordinator
                    .cast_vote(&report, &validator, Verdict::Approve, Timestamp::new(200))
            }));
        }
        let decisions: Vec<_> = handles
            .into_iter()
            .map(|h| h.join().unwrap().unwrap())
            .filter_map(|o| o.decision)
            .collect();

        // Whatever the interleaving, exactly one vote completes the quorum.
        assert_eq!(decisions, vec![ReportStatus::Verified]);
        assert_eq!(f.ledger.balance_of(&reporter).unwrap(), TokenAmount::new(50));
        f.ledger.audit(&reporter).unwrap();
    }
}
