//! This crate contains the data model shared by the staking and relay subsystems: keys and
//! addresses, staked applications, relays and their payloads, service proofs and the events emitted
//! by state transitions.
//!
//! It lies at the bottom of the crate-hierarchy in this workspace i.e., it does not depend on any
//! other crate in this workspace.

pub mod application;
pub mod chain;
pub mod errors;
pub mod events;
pub mod keys;
pub mod node;
pub mod proof;
pub mod relay;
pub mod session;
pub mod tokens;
pub mod types;

pub mod prelude;
