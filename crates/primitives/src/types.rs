//! Common type aliases.

/// Height of a block in the relay network's own chain.
pub type BlockHeight = u64;

/// Position of a relay within the sequence of relays a client sends to a node during a session.
pub type RelayIndex = u64;
