//! Random keys and identifiers.

use rand::{thread_rng, Rng};
use relay_primitives::prelude::{BlockHeight, PublicKey, SessionBlockId, SessionHeader};
use secp256k1::{Keypair, SECP256K1};

/// Generates a random keypair.
pub fn generate_keypair() -> Keypair {
    Keypair::new(SECP256K1, &mut thread_rng())
}

/// Returns the relay [`PublicKey`] of a keypair.
pub fn public_key_of(keypair: &Keypair) -> PublicKey {
    PublicKey::new(keypair.x_only_public_key().0)
}

/// Generates a random public key.
pub fn generate_public_key() -> PublicKey {
    public_key_of(&generate_keypair())
}

/// Generates a random session block id.
pub fn generate_session_block_id() -> SessionBlockId {
    let mut hash = [0u8; 32];
    thread_rng().fill(&mut hash);

    SessionBlockId::new(hash)
}

/// Generates a session header with a random block id at `block_height`.
pub fn generate_session_header(block_height: BlockHeight) -> SessionHeader {
    SessionHeader::new(generate_session_block_id(), block_height)
}
