//! The hosted blockchains this node serves relays for.

use std::collections::HashMap;

use relay_primitives::prelude::Blockchain;
use serde::{Deserialize, Serialize};

use crate::errors::{RelayError, RelayResult};

/// A hosted blockchain and the URL of the endpoint that serves it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostedChain {
    /// The blockchain identifier.
    pub id: Blockchain,

    /// The URL relays for this chain are forwarded to.
    pub url: String,
}

/// The set of blockchains configured locally on this node.
///
/// This is not the network-wide set of chains, only the ones this node can forward relays to.
#[derive(Debug, Clone, Default)]
pub struct HostedChains(HashMap<Blockchain, HostedChain>);

impl HostedChains {
    /// Creates the set from the configured chains. Later entries win on duplicate ids.
    pub fn new(chains: impl IntoIterator<Item = HostedChain>) -> Self {
        chains.into_iter().collect()
    }

    /// Returns `true` if the chain is hosted by this node.
    pub fn contains(&self, chain: &Blockchain) -> bool {
        self.0.contains_key(chain)
    }

    /// Returns the URL relays for `chain` are forwarded to.
    pub fn url_for(&self, chain: &Blockchain) -> RelayResult<&str> {
        self.0
            .get(chain)
            .map(|hosted| hosted.url.as_str())
            .filter(|url| !url.is_empty())
            .ok_or_else(|| RelayError::UnknownHostedChainUrl(chain.clone()))
    }

    /// Returns the number of hosted chains.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no chain is hosted.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the hosted chains in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &HostedChain> {
        self.0.values()
    }
}

impl FromIterator<HostedChain> for HostedChains {
    fn from_iter<I: IntoIterator<Item = HostedChain>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|hosted| (hosted.id.clone(), hosted))
                .collect(),
        )
    }
}
