//! Staked token amounts.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A non-negative amount of staked tokens.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Tokens(u64);

impl Tokens {
    /// The zero amount.
    pub const ZERO: Tokens = Tokens(0);

    /// Creates a new amount.
    pub const fn new(amount: u64) -> Self {
        Self(amount)
    }

    /// Returns the amount as a `u64`.
    pub const fn to_u64(self) -> u64 {
        self.0
    }

    /// Returns `true` if the amount is zero.
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Adds two amounts, returning `None` on overflow.
    pub const fn checked_add(self, rhs: Tokens) -> Option<Tokens> {
        match self.0.checked_add(rhs.0) {
            Some(sum) => Some(Tokens(sum)),
            None => None,
        }
    }

    /// Subtracts `rhs` from `self`, returning `None` if the result would be negative.
    pub const fn checked_sub(self, rhs: Tokens) -> Option<Tokens> {
        match self.0.checked_sub(rhs.0) {
            Some(diff) => Some(Tokens(diff)),
            None => None,
        }
    }
}

impl From<u64> for Tokens {
    fn from(amount: u64) -> Self {
        Self(amount)
    }
}

impl fmt::Display for Tokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
