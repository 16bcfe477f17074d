//! Token redemption.
//!
//! Redeeming is a two-step saga, not a single transaction: the burn
//! commits immediately and the external fulfillment resolves later. A
//! failed or timed-out fulfillment is compensated by a refund entry, so
//! the ledger never depends on the provider behaving.

pub mod catalog;
pub mod error;
pub mod processor;
pub mod provider;

pub use catalog::{default_offers, RewardCatalog};
pub use error::RedemptionError;
pub use processor::RedemptionProcessor;
pub use provider::{FulfillmentOutcome, FulfillmentProvider, FulfillmentRouter, StaticProvider};
