//! This crate provides generators and fixtures for testing the staking and relay crates.
//!
//! Keys are random; everything derived from them (addresses, signatures, proof identities) is
//! consistent so fixtures pass validation unless a test tampers with them on purpose.

pub mod keys;
pub mod relay;

pub use keys::{
    generate_keypair, generate_public_key, generate_session_block_id, generate_session_header,
    public_key_of,
};
pub use relay::{http_relay, signed_proof, staked_application};
