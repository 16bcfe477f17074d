//! The EcoReport engine.
//!
//! Wires the synchronous core (registry, quorum coordinator, ledger,
//! redemption processor) to its asynchronous external collaborators: the
//! scoring oracle, fulfillment providers, and the chain submitter.
//! External calls always run outside the core's critical sections.

pub mod config;
pub mod engine;
pub mod error;
pub mod logging;

pub use config::EngineConfig;
pub use engine::EcoEngine;
pub use error::EngineError;
pub use logging::{init_logging, LogFormat};
