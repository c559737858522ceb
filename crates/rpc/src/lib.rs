//! Provides the RPC interface of the relay node.
//!
//! The RPCs are split into control RPCs about the node process itself and service RPCs that serve
//! relays and expose the state relay admission depends on.

pub mod traits;
pub mod types;
