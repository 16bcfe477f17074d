//! Token amount type.
//!
//! Amounts are unsigned integers of whole EcoTokens. Ledger entry deltas are
//! signed at the storage layer; everywhere else amounts are non-negative by
//! construction.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

/// A non-negative quantity of EcoTokens.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TokenAmount(u64);

impl TokenAmount {
    pub const ZERO: Self = Self(0);

    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    /// Signed delta for a credit (mint / refund) ledger entry.
    pub fn as_credit(&self) -> i64 {
        self.0 as i64
    }

    /// Signed delta for a debit (burn) ledger entry.
    pub fn as_debit(&self) -> i64 {
        -(self.0 as i64)
    }
}

impl Add for TokenAmount {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ECO", self.0)
    }
}
