use std::collections::BTreeSet;

use relay_params::prelude::{AppParams, ParamsError, RelayParams};
use relay_primitives::prelude::{Address, Blockchain, PublicKey, Tokens};
use serde::{Deserialize, Serialize};

/// The consensus-critical parameters that dictate the behavior of the relay node.
///
/// Nodes that disagree on these values disagree on which relays are admissible and on how many
/// proofs a session may accrue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Params {
    /// The application staking parameters.
    pub apps: AppParams,

    /// The relay serving parameters.
    pub relay: RelayParams,

    /// The state the application registry starts from.
    #[serde(default)]
    pub genesis: GenesisParams,
}

impl Params {
    /// Checks that the parameters are usable.
    pub(crate) fn validate(&self) -> Result<(), ParamsError> {
        self.apps.validate()?;
        self.relay.validate()
    }
}

/// The accounts and applications that exist at genesis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct GenesisParams {
    /// Funded accounts.
    #[serde(default)]
    pub accounts: Vec<GenesisAccount>,

    /// Staked applications. Their stake is minted for them.
    #[serde(default)]
    pub applications: Vec<GenesisApplication>,
}

/// An account funded at genesis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct GenesisAccount {
    pub address: Address,
    pub balance: Tokens,
}

/// An application staked at genesis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct GenesisApplication {
    pub public_key: PublicKey,
    pub chains: BTreeSet<Blockchain>,
    pub stake: Tokens,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_serde_toml() {
        let params = r#"
            [apps]
            minimum_stake = 100
            unstaking_blocks = 144

            [relay]
            default_http_method = "POST"
            relays_per_token = 10
            nodes_per_session = 5

            [[genesis.accounts]]
            address = "0102030405060708090a0b0c0d0e0f1011121314"
            balance = 5000

            [[genesis.applications]]
            public_key = "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
            chains = ["0001"]
            stake = 1000
        "#;

        let params = toml::from_str::<Params>(params);
        assert!(
            params.is_ok(),
            "must be able to deserialize params from toml but got: {}",
            params.unwrap_err()
        );

        let params = params.unwrap();
        assert_eq!(params.validate(), Ok(()));
        assert_eq!(params.genesis.accounts[0].balance, Tokens::new(5_000));
        assert_eq!(params.genesis.applications[0].stake, Tokens::new(1_000));

        let serialized = toml::to_string(&params).expect("must be able to serialize params");
        let deserialized = toml::from_str::<Params>(&serialized)
            .expect("must be able to deserialize serialized params");
        assert_eq!(params, deserialized);
    }

    #[test]
    fn test_genesis_is_optional() {
        let params = r#"
            [apps]
            minimum_stake = 100
            unstaking_blocks = 144

            [relay]
            default_http_method = "POST"
            relays_per_token = 10
            nodes_per_session = 0
        "#;

        let params = toml::from_str::<Params>(params).expect("must parse params without genesis");

        assert_eq!(params.genesis, GenesisParams::default());
        assert_eq!(params.validate(), Err(ParamsError::ZeroNodesPerSession));
    }
}
