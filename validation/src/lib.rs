//! Report validation.
//!
//! Incoming reports enter the registry as `Pending` and are decided by a
//! fixed-size quorum of validator votes. The coordinator owns the report
//! lifecycle: it is the only writer of report state, and the terminal
//! transition and its triggered reward mint form one critical section per
//! report.

pub mod error;
pub mod oracle;
pub mod quorum;
pub mod registry;

pub use error::ValidationError;
pub use oracle::{NullOracle, ScoringOracle};
pub use quorum::{QuorumCoordinator, VoteOutcome, VoteTally};
pub use registry::{NewReport, ReportRegistry};
