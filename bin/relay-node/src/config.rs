use std::time::Duration;

use relay_primitives::prelude::{Node, PublicKey};
use relay_service::prelude::HostedChain;
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_REQUEST_TIMEOUT_MS;

/// The configuration values that dictate the behavior of the relay node.
///
/// These values are local to each node. Nodes with different hosted chains or timeouts still agree
/// on which relays are admissible for a given application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Config {
    /// The RPC server addr for the relay node.
    pub rpc_addr: String,

    /// The public key this node is known by in the active set.
    pub node_pubkey: PublicKey,

    /// The number of worker threads of the runtime.
    pub num_threads: Option<u8>,

    /// The timeout for requests to hosted chains in milliseconds.
    pub request_timeout_ms: Option<u64>,

    /// The chains this node forwards relays to.
    #[serde(default)]
    pub hosted_chains: Vec<HostedChain>,

    /// The network's active node set.
    #[serde(default)]
    pub active_nodes: Vec<Node>,
}

impl Config {
    /// Returns the timeout for requests to hosted chains.
    pub(crate) fn request_timeout(&self) -> Duration {
        Duration::from_millis(
            self.request_timeout_ms
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS),
        )
    }
}

#[cfg(test)]
mod tests {
    use relay_primitives::prelude::Blockchain;

    use super::*;

    #[test]
    fn test_config_serde_toml() {
        let config = r#"
            rpc_addr = "localhost:8081"
            node_pubkey = "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
            num_threads = 8

            [[hosted_chains]]
            id = "0001"
            url = "http://localhost:8545"

            [[hosted_chains]]
            id = "0021"
            url = "http://localhost:8546"

            [[active_nodes]]
            public_key = "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
            chains = ["0001", "0021"]
        "#;

        let config = toml::from_str::<Config>(config);
        assert!(
            config.is_ok(),
            "must be able to deserialize config from toml but got: {}",
            config.unwrap_err()
        );

        let config = config.unwrap();
        assert_eq!(config.hosted_chains.len(), 2);
        assert_eq!(config.hosted_chains[1].id, Blockchain::new("0021"));
        assert_eq!(config.active_nodes[0].public_key, config.node_pubkey);
        assert!(config.active_nodes[0].serves(&Blockchain::new("0021")));
        assert_eq!(config.request_timeout(), Duration::from_secs(10));

        let serialized = toml::to_string(&config).expect("must be able to serialize config");
        let deserialized = toml::from_str::<Config>(&serialized)
            .expect("must be able to deserialize serialized config");
        assert_eq!(config, deserialized);
    }
}
