//! Session identifiers.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{errors::ParseError, types::BlockHeight};

/// The hash of the block that opens a session.
///
/// Together with the application and the blockchain it determines which nodes serve the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionBlockId(#[serde(with = "hex::serde")] [u8; 32]);

impl SessionBlockId {
    /// Creates a new session block id from the raw block hash.
    pub const fn new(hash: [u8; 32]) -> Self {
        Self(hash)
    }

    /// Returns the raw block hash.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for SessionBlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl FromStr for SessionBlockId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(s, &mut bytes)?;

        Ok(Self(bytes))
    }
}

/// The block that opens the session a relay is served in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionHeader {
    /// The hash of the session block.
    pub block_id: SessionBlockId,

    /// The height of the session block.
    pub block_height: BlockHeight,
}

impl SessionHeader {
    /// Creates a new session header.
    pub const fn new(block_id: SessionBlockId, block_height: BlockHeight) -> Self {
        Self {
            block_id,
            block_height,
        }
    }
}
