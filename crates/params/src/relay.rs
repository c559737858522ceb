//! Parameters for serving relays: the default HTTP method and the stake-derived relay cap.

use serde::{Deserialize, Serialize};

use super::{
    default::{DEFAULT_HTTP_METHOD, NODES_PER_SESSION, RELAYS_PER_TOKEN},
    errors::ParamsError,
};

/// The relay parameters shared by every node in the network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayParams {
    /// The method applied to HTTP relays that do not specify one.
    pub default_http_method: String,

    /// The number of relays an application is entitled to per staked token in a session.
    pub relays_per_token: u64,

    /// The number of nodes that serve a single session.
    ///
    /// The entitlement of an application is split evenly across these nodes.
    pub nodes_per_session: u64,
}

impl RelayParams {
    /// Checks that the parameters are usable.
    pub fn validate(&self) -> Result<(), ParamsError> {
        let method = &self.default_http_method;
        if method.is_empty() || method.chars().any(char::is_whitespace) {
            return Err(ParamsError::InvalidHttpMethod(method.clone()));
        }

        if self.nodes_per_session == 0 {
            return Err(ParamsError::ZeroNodesPerSession);
        }

        Ok(())
    }

    /// Computes the maximum number of relays a single node may accrue proofs for in one session of
    /// an application that has `tokens` staked.
    ///
    /// Any application with a non-zero stake is entitled to at least one relay per node.
    pub fn max_relays(&self, tokens: u64) -> u64 {
        if tokens == 0 {
            return 0;
        }

        let total = tokens.saturating_mul(self.relays_per_token);
        (total / self.nodes_per_session.max(1)).max(1)
    }
}

impl Default for RelayParams {
    fn default() -> Self {
        Self {
            default_http_method: DEFAULT_HTTP_METHOD.to_string(),
            relays_per_token: RELAYS_PER_TOKEN,
            nodes_per_session: NODES_PER_SESSION,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relay_params_serde() {
        let params = RelayParams::default();
        let serialized = toml::to_string(&params).unwrap();

        let deserialized: RelayParams = toml::from_str(&serialized).unwrap();

        assert_eq!(params, deserialized);
    }

    #[test]
    fn test_max_relays() {
        let params = RelayParams {
            default_http_method: "POST".to_string(),
            relays_per_token: 10,
            nodes_per_session: 5,
        };

        assert_eq!(params.max_relays(0), 0);
        assert_eq!(params.max_relays(1), 2);
        assert_eq!(params.max_relays(1000), 2000);
        assert_eq!(params.max_relays(u64::MAX), u64::MAX / 5);

        let stingy = RelayParams {
            relays_per_token: 1,
            nodes_per_session: 25,
            ..params
        };
        assert_eq!(stingy.max_relays(3), 1, "non-zero stake earns at least one relay");
    }

    #[test]
    fn test_invalid_relay_params() {
        let params = RelayParams {
            default_http_method: "PO ST".to_string(),
            ..RelayParams::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ParamsError::InvalidHttpMethod(_))
        ));

        let params = RelayParams {
            nodes_per_session: 0,
            ..RelayParams::default()
        };
        assert_eq!(params.validate(), Err(ParamsError::ZeroNodesPerSession));
    }
}
