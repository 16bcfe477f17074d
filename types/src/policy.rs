//! Reward policy parameters.
//!
//! The quorum size, reward amounts, and fulfillment deadline are policy
//! constants, not law: they ship with defaults matching the original
//! platform economics and can be overridden through engine configuration.

use crate::amount::TokenAmount;
use crate::status::Verdict;
use serde::{Deserialize, Serialize};

/// All tunable policy values consulted by the coordinator and processor.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RewardPolicy {
    /// Number of votes that must arrive before a report's fate is decided.
    pub required_votes: u32,

    /// Participation reward for an `Approve` vote, paid on acceptance.
    pub approve_participation_reward: TokenAmount,

    /// Participation reward for a `Reject` vote, paid on acceptance.
    pub reject_participation_reward: TokenAmount,

    /// Reward minted to the reporter when their report reaches `Verified`.
    pub verification_reward: TokenAmount,

    /// Earned-token balance at which an account qualifies as a validator.
    pub validator_eligibility_threshold: TokenAmount,

    /// Seconds to wait for a fulfillment provider before the redemption is
    /// resolved `Failed` and compensated.
    pub fulfillment_timeout_secs: u64,
}

impl RewardPolicy {
    /// Defaults matching the original platform economics.
    pub fn platform_defaults() -> Self {
        Self {
            required_votes: 3,
            approve_participation_reward: TokenAmount::new(10),
            reject_participation_reward: TokenAmount::new(5),
            verification_reward: TokenAmount::new(50),
            validator_eligibility_threshold: TokenAmount::new(2000),
            fulfillment_timeout_secs: 30,
        }
    }

    /// The participation reward owed for a given verdict.
    pub fn participation_reward(&self, verdict: Verdict) -> TokenAmount {
        match verdict {
            Verdict::Approve => self.approve_participation_reward,
            Verdict::Reject => self.reject_participation_reward,
        }
    }
}

impl Default for RewardPolicy {
    fn default() -> Self {
        Self::platform_defaults()
    }
}
