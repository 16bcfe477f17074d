//! Abstract storage traits for the EcoReport engine.
//!
//! Every backend implements these traits; the rest of the workspace depends
//! only on them. The engine ships with a thread-safe in-memory backend —
//! durable backends plug in behind the same traits.

pub mod account;
pub mod entry;
pub mod error;
pub mod memory;
pub mod offer;
pub mod redemption;
pub mod report;

pub use account::{AccountInfo, AccountStore};
pub use entry::{LedgerEntry, LedgerEntryStore, NewLedgerEntry, RelatedId};
pub use error::StoreError;
pub use memory::MemoryStore;
pub use offer::{OfferStore, ProviderCapability, RewardOffer};
pub use redemption::{RedemptionRecord, RedemptionStore};
pub use report::{ReportRecord, ReportStore, VoteRecord, VoteStore};
