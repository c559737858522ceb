//! Service proofs: self-validating evidence of one unit of relay work.
//!
//! A proof is signed by the client application over the relay index, the session it belongs to,
//! the serving node and the blockchain. Its identity ([`ProofId`]) covers the same fields, so a
//! re-signed copy of an already accepted proof is still a duplicate.

use std::fmt;

use secp256k1::{schnorr::Signature, Keypair, Message, SECP256K1};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::{
    chain::Blockchain,
    keys::PublicKey,
    types::{BlockHeight, RelayIndex},
};

/// Domain separation tag for proof digests.
const PROOF_DIGEST_TAG: &[u8] = b"relay-service-proof/v1";

/// Errors returned by [`ServiceProof::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProofError {
    /// The proof does not name a blockchain.
    #[error("proof blockchain is empty")]
    EmptyBlockchain,

    /// The proof does not reference a session.
    #[error("proof session block height is zero")]
    ZeroSessionHeight,

    /// The proof was issued for a different blockchain than the relay targets.
    #[error("proof is for blockchain {proof} but the relay targets {relay}")]
    BlockchainMismatch {
        /// The blockchain named by the proof.
        proof: Blockchain,
        /// The blockchain the relay targets.
        relay: Blockchain,
    },

    /// The proof names another node as its servicer.
    #[error("proof is for servicer {proof} but was submitted to {node}")]
    ServicerMismatch {
        /// The servicer named by the proof.
        proof: PublicKey,
        /// The node the relay was submitted to.
        node: PublicKey,
    },

    /// The proof was issued for a different session than the one being served.
    #[error("proof is for session height {proof} but the session is at height {session}")]
    SessionHeightMismatch {
        /// The session height named by the proof.
        proof: BlockHeight,
        /// The height of the session being served.
        session: BlockHeight,
    },

    /// The signature does not verify against the client key.
    #[error("invalid proof signature by client {0}")]
    InvalidSignature(PublicKey),
}

/// The unique identity of a proof.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProofId(#[serde(with = "hex::serde")] [u8; 32]);

impl ProofId {
    /// Returns the raw identity bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for ProofId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

/// The fields of a proof that are covered by the client's signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnsignedServiceProof {
    /// The position of the relay in the client's sequence for this session.
    pub index: RelayIndex,

    /// The height of the block that opened the session.
    pub session_block_height: BlockHeight,

    /// The node serving the relay.
    pub servicer: PublicKey,

    /// The application that requested the relay.
    pub client: PublicKey,

    /// The hosted blockchain the relay targets.
    pub blockchain: Blockchain,
}

impl UnsignedServiceProof {
    /// Computes the digest that the client signs.
    pub fn digest(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();

        hasher.update(PROOF_DIGEST_TAG);
        hasher.update(self.index.to_be_bytes());
        hasher.update(self.session_block_height.to_be_bytes());
        hasher.update(self.servicer.to_bytes());
        hasher.update(self.client.to_bytes());
        hasher.update((self.blockchain.as_str().len() as u64).to_be_bytes());
        hasher.update(self.blockchain.as_str().as_bytes());

        hasher.finalize().into()
    }

    /// Signs the proof with the client's keypair.
    pub fn sign(self, keypair: &Keypair) -> ServiceProof {
        let msg = Message::from_digest(self.digest());
        let signature = SECP256K1.sign_schnorr_no_aux_rand(&msg, keypair);

        ServiceProof {
            index: self.index,
            session_block_height: self.session_block_height,
            servicer: self.servicer,
            client: self.client,
            blockchain: self.blockchain,
            signature,
        }
    }
}

/// A signed proof of one relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceProof {
    /// The position of the relay in the client's sequence for this session.
    pub index: RelayIndex,

    /// The height of the block that opened the session.
    pub session_block_height: BlockHeight,

    /// The node serving the relay.
    pub servicer: PublicKey,

    /// The application that requested the relay.
    pub client: PublicKey,

    /// The hosted blockchain the relay targets.
    pub blockchain: Blockchain,

    /// The client's Schnorr signature over [`UnsignedServiceProof::digest`].
    pub signature: Signature,
}

impl ServiceProof {
    /// Returns the signed fields of this proof.
    pub fn unsigned(&self) -> UnsignedServiceProof {
        UnsignedServiceProof {
            index: self.index,
            session_block_height: self.session_block_height,
            servicer: self.servicer,
            client: self.client,
            blockchain: self.blockchain.clone(),
        }
    }

    /// Returns the identity of this proof.
    pub fn id(&self) -> ProofId {
        ProofId(self.unsigned().digest())
    }

    /// Checks the proof's structure and signature.
    ///
    /// This does not consult any registry state.
    pub fn validate(&self) -> Result<(), ProofError> {
        if self.blockchain.is_empty() {
            return Err(ProofError::EmptyBlockchain);
        }

        if self.session_block_height == 0 {
            return Err(ProofError::ZeroSessionHeight);
        }

        let msg = Message::from_digest(self.unsigned().digest());
        SECP256K1
            .verify_schnorr(&self.signature, &msg, self.client.inner())
            .map_err(|_| ProofError::InvalidSignature(self.client))
    }

    /// Validates the proof and checks that it covers a relay to `chain` served by `node` in the
    /// session opened at `session_block_height`.
    pub fn validate_for(
        &self,
        chain: &Blockchain,
        node: &PublicKey,
        session_block_height: BlockHeight,
    ) -> Result<(), ProofError> {
        self.validate()?;

        if &self.blockchain != chain {
            return Err(ProofError::BlockchainMismatch {
                proof: self.blockchain.clone(),
                relay: chain.clone(),
            });
        }

        if &self.servicer != node {
            return Err(ProofError::ServicerMismatch {
                proof: self.servicer,
                node: *node,
            });
        }

        if self.session_block_height != session_block_height {
            return Err(ProofError::SessionHeightMismatch {
                proof: self.session_block_height,
                session: session_block_height,
            });
        }

        Ok(())
    }
}
