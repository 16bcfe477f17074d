//! End-to-end engine wiring.
//!
//! The core (registry, coordinator, ledger, processor) is synchronous and
//! lock-based; this module surrounds it with the asynchronous external
//! boundary. Oracle scoring happens before a report enters the registry,
//! fulfillment runs under a deadline after the burn commits, and anchoring
//! is fire-and-forget after the entry exists. None of these calls hold a
//! per-report or per-account critical section while waiting.

use crate::config::EngineConfig;
use crate::error::EngineError;
use eco_ledger::{ChainSubmitter, TokenLedger};
use eco_redemption::{
    FulfillmentOutcome, FulfillmentRouter, RedemptionProcessor,
};
use eco_store::{
    AccountInfo, AccountStore, LedgerEntry, MemoryStore, OfferStore, RedemptionRecord,
    ReportRecord, RewardOffer,
};
use eco_types::{
    AccountId, EvidenceRef, IdempotencyKey, IncidentType, Location, OfferId, RedemptionId,
    ReportId, Timestamp, TokenAmount, Verdict, WalletReference,
};
use eco_validation::{NewReport, QuorumCoordinator, ReportRegistry, ScoringOracle, VoteOutcome};
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// The assembled report validation and token issuance engine.
pub struct EcoEngine {
    store: Arc<MemoryStore>,
    registry: Arc<ReportRegistry<MemoryStore>>,
    coordinator: QuorumCoordinator<MemoryStore>,
    ledger: Arc<TokenLedger<MemoryStore>>,
    processor: RedemptionProcessor<MemoryStore>,
    router: FulfillmentRouter,
    oracle: Arc<dyn ScoringOracle>,
    chain: Arc<dyn ChainSubmitter>,
    config: EngineConfig,
}

impl EcoEngine {
    /// Assemble an engine over a fresh in-memory store, seeding the stock
    /// offer catalog.
    pub fn new(
        config: EngineConfig,
        oracle: Arc<dyn ScoringOracle>,
        chain: Arc<dyn ChainSubmitter>,
        router: FulfillmentRouter,
    ) -> Result<Self, EngineError> {
        let store = Arc::new(MemoryStore::new());
        let registry = Arc::new(ReportRegistry::new(Arc::clone(&store)));
        let ledger = Arc::new(TokenLedger::new(Arc::clone(&store)));
        let coordinator = QuorumCoordinator::new(
            Arc::clone(&registry),
            Arc::clone(&ledger),
            config.policy.clone(),
        );
        let processor = RedemptionProcessor::new(Arc::clone(&store), Arc::clone(&ledger));
        processor.catalog().seed_defaults()?;

        Ok(Self {
            store,
            registry,
            coordinator,
            ledger,
            processor,
            router,
            oracle,
            chain,
            config,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // ── Accounts ─────────────────────────────────────────────────────────

    pub fn register_account(
        &self,
        id: AccountId,
        wallet_reference: WalletReference,
    ) -> Result<AccountInfo, EngineError> {
        Ok(self.ledger.open_account(id, wallet_reference)?)
    }

    pub fn balance_of(&self, account_id: &AccountId) -> Result<TokenAmount, EngineError> {
        Ok(self.ledger.balance_of(account_id)?)
    }

    pub fn history(&self, account_id: &AccountId) -> Result<Vec<LedgerEntry>, EngineError> {
        Ok(self.ledger.history(account_id)?)
    }

    /// Whether an account's balance qualifies it to act as a validator.
    pub fn validator_eligible(&self, account_id: &AccountId) -> Result<bool, EngineError> {
        Ok(self.balance_of(account_id)? >= self.config.policy.validator_eligibility_threshold)
    }

    // ── Reports & votes ──────────────────────────────────────────────────

    /// Score the evidence (best-effort) and create a `Pending` report.
    ///
    /// The oracle runs on the blocking pool, outside every critical
    /// section; an unreachable oracle leaves the confidence unset and
    /// never blocks creation.
    pub async fn submit_report(
        &self,
        reporter: AccountId,
        incident_type: IncidentType,
        location: Location,
        description: String,
        evidence_ref: EvidenceRef,
    ) -> Result<ReportRecord, EngineError> {
        // The reporter must hold an account before a verification reward
        // could ever be owed to it.
        self.ledger.balance_of(&reporter)?;

        let oracle = Arc::clone(&self.oracle);
        let evidence = evidence_ref.clone();
        let text = description.clone();
        let confidence = tokio::task::spawn_blocking(move || oracle.score(&evidence, &text))
            .await
            .unwrap_or_else(|e| {
                warn!(error = %e, "scoring oracle task failed");
                None
            });

        Ok(self.registry.create_report(
            NewReport {
                reporter,
                incident_type,
                location,
                description,
                evidence_ref,
                confidence,
            },
            self.config.policy.required_votes,
            Timestamp::now(),
        )?)
    }

    pub fn get_report(&self, id: &ReportId) -> Result<ReportRecord, EngineError> {
        Ok(self.registry.get_report(id)?)
    }

    /// Cast a validator vote. The committed participation entry is
    /// anchored best-effort; anchoring failure never invalidates it.
    pub fn cast_vote(
        &self,
        report_id: &ReportId,
        validator: &AccountId,
        verdict: Verdict,
    ) -> Result<VoteOutcome, EngineError> {
        let outcome = self
            .coordinator
            .cast_vote(report_id, validator, verdict, Timestamp::now())?;
        if let Err(e) = self.chain.submit(&outcome.participation) {
            warn!(entry = outcome.participation.id, error = %e, "anchoring failed");
        }
        Ok(outcome)
    }

    // ── Redemption ───────────────────────────────────────────────────────

    pub fn offers(&self) -> Result<Vec<RewardOffer>, EngineError> {
        Ok(self.processor.catalog().list()?)
    }

    pub fn get_redemption(&self, id: &RedemptionId) -> Result<RedemptionRecord, EngineError> {
        Ok(self.processor.get(id)?)
    }

    /// Redeem an offer: burn the cost, dispatch fulfillment under the
    /// configured deadline, and settle the request.
    ///
    /// Returns the settled record. A retry with the same key settles
    /// against the original attempt instead of burning again.
    pub async fn redeem(
        &self,
        account_id: &AccountId,
        offer_id: &OfferId,
        idempotency_key: IdempotencyKey,
    ) -> Result<RedemptionRecord, EngineError> {
        let record = self
            .processor
            .redeem(account_id, offer_id, idempotency_key, Timestamp::now())?;
        if record.status.is_terminal() {
            return Ok(record);
        }

        let outcome = self.dispatch_fulfillment(&record).await;
        Ok(self
            .processor
            .resolve(&record.id, outcome, Timestamp::now())?)
    }

    /// Run the provider for a pending request, bounded by the policy
    /// deadline. Every failure mode collapses to `Failed` so the request
    /// always reaches a terminal state.
    async fn dispatch_fulfillment(&self, record: &RedemptionRecord) -> FulfillmentOutcome {
        let offer = match self.store.get_offer(&record.offer_id) {
            Ok(Some(offer)) => offer,
            _ => return FulfillmentOutcome::Failed("offer vanished from catalog".into()),
        };
        let wallet = match self.store.get_account(&record.account_id) {
            Ok(Some(info)) => info.wallet_reference,
            _ => return FulfillmentOutcome::Failed("account has no wallet reference".into()),
        };
        let Some(provider) = self.router.route(offer.capability) else {
            return FulfillmentOutcome::Failed(format!(
                "no provider registered for {:?}",
                offer.capability
            ));
        };

        let deadline = Duration::from_secs(self.config.policy.fulfillment_timeout_secs);
        let call = tokio::task::spawn_blocking(move || provider.fulfill(&offer, &wallet));
        match tokio::time::timeout(deadline, call).await {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(e)) => FulfillmentOutcome::Failed(format!("provider task failed: {e}")),
            Err(_) => FulfillmentOutcome::Failed("fulfillment timed out".into()),
        }
    }
}
