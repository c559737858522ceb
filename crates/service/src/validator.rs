//! Admission of inbound relays.
//!
//! A relay is admitted by running [`ValidationStage::ORDER`] front to back and stopping at the
//! first stage that fails. The order is observable by clients through the reported error, so it
//! is part of the contract of this module. Once every stage passes, HTTP payloads without a method
//! get the network's default method.

use std::{fmt, sync::Arc};

use relay_primitives::prelude::{Application, Node, Payload, Relay, SessionHeader};
use tracing::trace;

use crate::{
    errors::{RelayError, RelayResult},
    hosted::HostedChains,
    session::SessionOracle,
};

/// The state a relay is validated against.
#[derive(Debug, Clone, Copy)]
pub struct ValidationContext<'a> {
    /// The chains this node hosts.
    pub hosted: &'a HostedChains,

    /// The session the relay is served in.
    pub session: &'a SessionHeader,

    /// The network's active node set at the session block.
    pub active_nodes: &'a [Node],

    /// The application the relay is served for.
    pub application: &'a Application,
}

/// A single admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationStage {
    /// The relay names a blockchain.
    Blockchain,

    /// The payload carries data.
    PayloadData,

    /// This node hosts the blockchain.
    HostedChain,

    /// The application is staked for the blockchain.
    RequestedChain,

    /// This node serves the application's session on the blockchain.
    Session,

    /// The service proof is valid and covers this relay: its blockchain, this node and the
    /// session being served.
    Proof,
}

impl ValidationStage {
    /// The stages in the order they run.
    pub const ORDER: [ValidationStage; 6] = [
        ValidationStage::Blockchain,
        ValidationStage::PayloadData,
        ValidationStage::HostedChain,
        ValidationStage::RequestedChain,
        ValidationStage::Session,
        ValidationStage::Proof,
    ];

    /// Runs this stage against `relay`.
    pub fn check(
        self,
        relay: &Relay,
        ctx: &ValidationContext<'_>,
        oracle: &dyn SessionOracle,
    ) -> RelayResult<()> {
        match self {
            ValidationStage::Blockchain => {
                if relay.blockchain.is_empty() {
                    return Err(RelayError::EmptyBlockchain);
                }
            }
            ValidationStage::PayloadData => {
                if relay.payload.data().is_empty() {
                    return Err(RelayError::EmptyPayloadData);
                }
            }
            ValidationStage::HostedChain => {
                if !ctx.hosted.contains(&relay.blockchain) {
                    return Err(RelayError::UnsupportedBlockchain(relay.blockchain.clone()));
                }
            }
            ValidationStage::RequestedChain => {
                if !ctx.application.requests(&relay.blockchain) {
                    return Err(RelayError::UnstakedBlockchain(relay.blockchain.clone()));
                }
            }
            ValidationStage::Session => oracle.verify_self(
                &ctx.application.public_key,
                &relay.blockchain,
                &ctx.session.block_id,
                ctx.active_nodes,
            )?,
            ValidationStage::Proof => relay.proof.validate_for(
                &relay.blockchain,
                oracle.node(),
                ctx.session.block_height,
            )?,
        }

        Ok(())
    }
}

impl fmt::Display for ValidationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValidationStage::Blockchain => "blockchain",
            ValidationStage::PayloadData => "payload-data",
            ValidationStage::HostedChain => "hosted-chain",
            ValidationStage::RequestedChain => "requested-chain",
            ValidationStage::Session => "session",
            ValidationStage::Proof => "proof",
        };

        f.write_str(name)
    }
}

/// Runs the admission pipeline for inbound relays.
#[derive(Debug, Clone)]
pub struct RelayValidator {
    oracle: Arc<dyn SessionOracle>,
    default_http_method: String,
}

impl RelayValidator {
    /// Creates a validator that consults `oracle` for session membership and applies
    /// `default_http_method` to HTTP payloads that do not set one.
    pub fn new(oracle: Arc<dyn SessionOracle>, default_http_method: impl Into<String>) -> Self {
        Self {
            oracle,
            default_http_method: default_http_method.into(),
        }
    }

    /// Returns the method applied to HTTP payloads without one.
    pub fn default_http_method(&self) -> &str {
        &self.default_http_method
    }

    /// Validates `relay` and normalizes its payload.
    ///
    /// Validating an already validated relay succeeds again without changing it.
    pub fn validate(&self, relay: &mut Relay, ctx: &ValidationContext<'_>) -> RelayResult<()> {
        for stage in ValidationStage::ORDER {
            if let Err(err) = stage.check(relay, ctx, self.oracle.as_ref()) {
                trace!(%stage, %err, "relay rejected");
                return Err(err);
            }
        }

        self.normalize(&mut relay.payload);

        Ok(())
    }

    fn normalize(&self, payload: &mut Payload) {
        if let Payload::Http { method, .. } = payload {
            let unset = method.as_deref().map_or(true, str::is_empty);
            if unset {
                *method = Some(self.default_http_method.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::BTreeSet,
        sync::atomic::{AtomicUsize, Ordering},
    };

    use relay_primitives::prelude::{Blockchain, ProofError, PublicKey, SessionBlockId};
    use relay_test_utils::{
        generate_keypair, generate_public_key, generate_session_header, http_relay,
        signed_proof, staked_application,
    };

    use super::*;
    use crate::{
        hosted::HostedChain,
        session::{ActiveSetOracle, SessionError},
    };

    const CHAIN: &str = "0001";

    /// Counts calls and delegates to an [`ActiveSetOracle`].
    #[derive(Debug)]
    struct CountingOracle {
        inner: ActiveSetOracle,
        calls: AtomicUsize,
    }

    impl CountingOracle {
        fn new(node: PublicKey) -> Self {
            Self {
                inner: ActiveSetOracle::new(node),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl SessionOracle for CountingOracle {
        fn node(&self) -> &PublicKey {
            self.inner.node()
        }

        fn verify_self(
            &self,
            application: &PublicKey,
            chain: &Blockchain,
            session_block_id: &SessionBlockId,
            active_nodes: &[Node],
        ) -> Result<(), SessionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner
                .verify_self(application, chain, session_block_id, active_nodes)
        }
    }

    struct Fixture {
        oracle: Arc<CountingOracle>,
        validator: RelayValidator,
        hosted: HostedChains,
        session: SessionHeader,
        nodes: Vec<Node>,
        client: secp256k1::Keypair,
        application: Application,
        relay: Relay,
    }

    impl Fixture {
        fn new() -> Self {
            let node = generate_public_key();
            let client = generate_keypair();
            let oracle = Arc::new(CountingOracle::new(node));

            Self {
                validator: RelayValidator::new(oracle.clone(), "POST"),
                oracle,
                hosted: HostedChains::new([HostedChain {
                    id: Blockchain::new(CHAIN),
                    url: "http://localhost:8545".to_string(),
                }]),
                session: generate_session_header(1),
                nodes: vec![Node {
                    public_key: node,
                    chains: BTreeSet::from([Blockchain::new(CHAIN)]),
                }],
                application: staked_application(&client, &[CHAIN], 1_000),
                relay: http_relay(&client, node, CHAIN, 1, b"{}"),
                client,
            }
        }

        fn validate(&mut self) -> RelayResult<()> {
            let ctx = ValidationContext {
                hosted: &self.hosted,
                session: &self.session,
                active_nodes: &self.nodes,
                application: &self.application,
            };

            self.validator.validate(&mut self.relay, &ctx)
        }
    }

    #[test]
    fn test_valid_relay_is_admitted_and_normalized() {
        let mut fixture = Fixture::new();

        assert_eq!(fixture.validate(), Ok(()));
        assert_eq!(fixture.relay.payload.method(), Some("POST"));
        assert_eq!(fixture.oracle.calls(), 1);
    }

    #[test]
    fn test_empty_blockchain_wins_over_empty_payload() {
        let mut fixture = Fixture::new();
        fixture.relay.blockchain = Blockchain::new("");
        fixture.relay.payload = Payload::http(Vec::new());

        assert_eq!(fixture.validate(), Err(RelayError::EmptyBlockchain));
        assert_eq!(fixture.relay.payload.method(), None);
        assert_eq!(fixture.oracle.calls(), 0);
    }

    #[test]
    fn test_empty_payload() {
        let mut fixture = Fixture::new();
        fixture.relay.payload = Payload::http(Vec::new());

        assert_eq!(fixture.validate(), Err(RelayError::EmptyPayloadData));
    }

    #[test]
    fn test_chain_not_hosted() {
        let mut fixture = Fixture::new();
        fixture.hosted = HostedChains::default();

        assert_eq!(
            fixture.validate(),
            Err(RelayError::UnsupportedBlockchain(Blockchain::new(CHAIN)))
        );
        assert_eq!(fixture.oracle.calls(), 0);
    }

    #[test]
    fn test_unrequested_chain_never_reaches_session_check() {
        let mut fixture = Fixture::new();
        fixture.application.chains = BTreeSet::from([Blockchain::new("0002")]);

        assert_eq!(
            fixture.validate(),
            Err(RelayError::UnstakedBlockchain(Blockchain::new(CHAIN)))
        );
        assert_eq!(fixture.oracle.calls(), 0);
    }

    #[test]
    fn test_node_outside_session() {
        let mut fixture = Fixture::new();
        fixture.nodes[0].public_key = generate_public_key();

        let err = fixture.validate().unwrap_err();

        assert!(matches!(
            err,
            RelayError::Session(SessionError::NotInSession { .. })
        ));
        assert_eq!(fixture.oracle.calls(), 1);
    }

    #[test]
    fn test_invalid_proof_is_checked_last() {
        let mut fixture = Fixture::new();
        fixture.relay.proof.index += 1;

        assert!(matches!(
            fixture.validate(),
            Err(RelayError::InvalidProof(ProofError::InvalidSignature(_)))
        ));
        assert_eq!(fixture.oracle.calls(), 1);
        assert_eq!(fixture.relay.payload.method(), None);
    }

    #[test]
    fn test_proof_for_other_servicer_is_rejected() {
        let mut fixture = Fixture::new();
        let other = generate_public_key();
        fixture.relay.proof = signed_proof(&fixture.client, other, CHAIN, 1, 1);

        assert_eq!(
            fixture.validate(),
            Err(RelayError::InvalidProof(ProofError::ServicerMismatch {
                proof: other,
                node: fixture.nodes[0].public_key,
            }))
        );
        assert_eq!(fixture.relay.payload.method(), None);
    }

    #[test]
    fn test_proof_for_other_session_is_rejected() {
        let mut fixture = Fixture::new();
        let node = fixture.nodes[0].public_key;
        fixture.relay.proof = signed_proof(&fixture.client, node, CHAIN, 1, 2);

        assert_eq!(
            fixture.validate(),
            Err(RelayError::InvalidProof(ProofError::SessionHeightMismatch {
                proof: 2,
                session: 1,
            }))
        );
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let mut fixture = Fixture::new();

        fixture.validate().unwrap();
        let normalized = fixture.relay.clone();
        fixture.validate().unwrap();

        assert_eq!(fixture.relay, normalized);
        assert_eq!(fixture.relay.payload.method(), Some("POST"));
    }

    #[test]
    fn test_explicit_method_is_kept() {
        let mut fixture = Fixture::new();
        if let Payload::Http { method, .. } = &mut fixture.relay.payload {
            *method = Some("GET".to_string());
        }

        fixture.validate().unwrap();

        assert_eq!(fixture.relay.payload.method(), Some("GET"));
    }

    #[test]
    fn test_websocket_payload_is_not_normalized() {
        let mut fixture = Fixture::new();
        fixture.relay.payload = Payload::WebSocket { data: vec![1] };

        fixture.validate().unwrap();

        assert_eq!(
            fixture.relay.payload,
            Payload::WebSocket { data: vec![1] }
        );
    }

    #[test]
    fn test_stage_order() {
        assert_eq!(
            ValidationStage::ORDER.map(|stage| stage.to_string()),
            [
                "blockchain",
                "payload-data",
                "hosted-chain",
                "requested-chain",
                "session",
                "proof"
            ]
        );
    }
}
