//! Identifier newtypes used throughout the engine.
//!
//! All ids are opaque strings. The engine never inspects their contents;
//! typed wrappers exist so a report id cannot be passed where an account id
//! is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! string_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            pub fn new(raw: impl Into<String>) -> Self {
                Self(raw.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }
    };
}

string_id! {
    /// Identifies an account (reporter, validator, or redeemer).
    AccountId
}

string_id! {
    /// Identifies an incident report.
    ReportId
}

string_id! {
    /// Identifies a reward offer in the catalog.
    OfferId
}

string_id! {
    /// Identifies a redemption request.
    RedemptionId
}

string_id! {
    /// Caller-supplied key making a logical request retry-safe.
    ///
    /// Two calls carrying the same key have the effect of one.
    IdempotencyKey
}

string_id! {
    /// Opaque handle to externally stored evidence (photo, video, audio).
    /// The engine never dereferences it.
    EvidenceRef
}

string_id! {
    /// Opaque external wallet address used by fulfillment providers and the
    /// chain submitter. The engine's internal ledger is the source of truth;
    /// this reference only travels outward.
    WalletReference
}
