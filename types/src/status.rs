//! Lifecycle enums for reports, votes, ledger entries, and redemptions.

use serde::{Deserialize, Serialize};

/// The lifecycle state of an incident report.
///
/// Transitions are monotonic: `Pending` may move to exactly one of
/// `Verified` or `Rejected`, and terminal states never change again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportStatus {
    /// Awaiting quorum; votes are being collected.
    Pending,
    /// Quorum reached with an approve majority. Terminal.
    Verified,
    /// Quorum reached without an approve majority (ties included). Terminal.
    Rejected,
}

impl ReportStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// A validator's verdict on a single report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    Approve,
    Reject,
}

/// Why a ledger entry was written.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RewardReason {
    /// Paid once to the reporter when their report reaches `Verified`.
    VerificationReward,
    /// Paid to a validator for each accepted vote, whatever the outcome.
    ParticipationReward,
    /// Tokens burned to pay for a reward offer.
    Redemption,
    /// Compensating credit after a failed fulfillment.
    RedemptionRefund,
}

/// The lifecycle state of a redemption request.
///
/// `Pending` holds only until the fulfillment provider resolves it; exactly
/// one of `Fulfilled` or `Failed` is reached, and neither changes again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RedemptionStatus {
    /// Burn committed; fulfillment dispatched but not yet resolved.
    Pending,
    /// Provider delivered the reward. Terminal.
    Fulfilled,
    /// Provider failed or timed out; the burn has been refunded. Terminal.
    Failed,
}

impl RedemptionStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}
