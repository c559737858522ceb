//! Applications, proofs and relays that pass validation.

use relay_primitives::prelude::{
    Application, BlockHeight, Blockchain, Payload, PublicKey, Relay, RelayIndex, ServiceProof,
    StakeStatus, Tokens, UnsignedServiceProof,
};
use secp256k1::Keypair;

use crate::keys::public_key_of;

/// Creates a staked, unjailed application owned by `client` that requests `chains`.
pub fn staked_application(client: &Keypair, chains: &[&str], tokens: u64) -> Application {
    Application {
        status: StakeStatus::Staked,
        ..Application::new(
            public_key_of(client),
            chains.iter().map(|chain| Blockchain::new(*chain)),
            Tokens::new(tokens),
        )
    }
}

/// Creates a proof of the `index`-th relay of `client` to `servicer`, signed by `client`.
pub fn signed_proof(
    client: &Keypair,
    servicer: PublicKey,
    chain: &str,
    index: RelayIndex,
    session_block_height: BlockHeight,
) -> ServiceProof {
    UnsignedServiceProof {
        index,
        session_block_height,
        servicer,
        client: public_key_of(client),
        blockchain: Blockchain::new(chain),
    }
    .sign(client)
}

/// Creates an HTTP relay without method carrying a valid proof for session height 1.
pub fn http_relay(
    client: &Keypair,
    servicer: PublicKey,
    chain: &str,
    index: RelayIndex,
    data: &[u8],
) -> Relay {
    Relay {
        blockchain: Blockchain::new(chain),
        payload: Payload::http(data),
        proof: signed_proof(client, servicer, chain, index, 1),
    }
}
