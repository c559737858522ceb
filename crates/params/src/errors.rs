//! Errors for the relay network parameters.

use thiserror::Error;

/// Error while validating a set of parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamsError {
    /// The default HTTP method is empty or contains whitespace.
    #[error("invalid default http method: {0:?}")]
    InvalidHttpMethod(String),

    /// A session must be served by at least one node.
    #[error("nodes per session must be non-zero")]
    ZeroNodesPerSession,

    /// The minimum stake must be non-zero so that unstaked applications can never be served.
    #[error("minimum application stake must be non-zero")]
    ZeroMinimumStake,
}
