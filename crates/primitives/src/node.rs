//! Staked service nodes.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{chain::Blockchain, keys::PublicKey};

/// A service node that is part of the active set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// The public key the node signs and is addressed with.
    pub public_key: PublicKey,

    /// The blockchains the node is staked to serve.
    pub chains: BTreeSet<Blockchain>,
}

impl Node {
    /// Returns `true` if the node is staked for the given chain.
    pub fn serves(&self, chain: &Blockchain) -> bool {
        self.chains.contains(chain)
    }
}
