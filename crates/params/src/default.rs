//! Default values for the relay network parameters.

/// Default minimum number of tokens an application must stake.
pub(crate) const MINIMUM_APP_STAKE: u64 = 100;

/// Default number of blocks an application stays in the unstaking queue before its tokens are
/// released.
pub(crate) const UNSTAKING_BLOCKS: u64 = 144;

/// Default method for HTTP relays whose payload does not set one.
pub(crate) const DEFAULT_HTTP_METHOD: &str = "POST";

/// Default number of relays granted per staked token.
pub(crate) const RELAYS_PER_TOKEN: u64 = 10;

/// Default number of nodes serving a single session.
pub(crate) const NODES_PER_SESSION: u64 = 5;
