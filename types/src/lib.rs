//! Fundamental types for the EcoReport engine.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: ids, token amounts, timestamps, incident and lifecycle enums,
//! and the reward policy parameters.

pub mod amount;
pub mod id;
pub mod incident;
pub mod policy;
pub mod status;
pub mod time;

pub use amount::TokenAmount;
pub use id::{AccountId, EvidenceRef, IdempotencyKey, OfferId, RedemptionId, ReportId, WalletReference};
pub use incident::{ConfidenceBand, IncidentType, Location};
pub use policy::RewardPolicy;
pub use status::{RedemptionStatus, ReportStatus, RewardReason, Verdict};
pub use time::Timestamp;
