//! Identifiers of the hosted (non-native) blockchains that relays are served against.

use std::{borrow::Borrow, fmt};

use serde::{Deserialize, Serialize};

/// The identifier of a hosted blockchain, e.g. `"0001"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Blockchain(String);

impl Blockchain {
    /// Creates a new identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the identifier is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for Blockchain {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for Blockchain {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for Blockchain {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Blockchain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
