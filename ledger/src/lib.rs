//! Append-only token ledger.
//!
//! Every account's balance is derived from its immutable entry log.
//! Mutations are serialized per account, idempotent under their stated
//! keys, and can never drive a balance negative.

pub mod chain;
pub mod error;
pub mod ledger;
pub mod locks;

pub use chain::{ChainError, ChainRef, ChainSubmitter, NullChainSubmitter};
pub use error::LedgerError;
pub use ledger::TokenLedger;
pub use locks::LockMap;
