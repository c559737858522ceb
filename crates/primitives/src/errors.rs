//! Errors that can occur while parsing primitives from their textual form.

use thiserror::Error;

/// Error while parsing a hex-encoded identifier.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// The input is not valid hex or does not have the expected length.
    #[error("invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),

    /// The input is not a valid x-only public key.
    #[error("invalid public key: {0}")]
    PublicKey(#[from] secp256k1::Error),
}

/// The stable classification of every error the staking and relay subsystems report.
///
/// Callers translate these into user-visible results; [`ErrorKind::code`] is part of that contract
/// and must not change for an existing kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The referenced application does not exist.
    NotFound,
    /// The operation is not allowed in the current lifecycle state.
    InvalidState,
    /// The account cannot cover the requested stake.
    InsufficientFunds,
    /// The stake is below the network minimum.
    BelowMinimumStake,
    /// A required input (blockchain, payload, chain list) is empty.
    EmptyInput,
    /// This node does not host the requested blockchain.
    UnsupportedBlockchain,
    /// The application is not staked for the requested blockchain.
    UnstakedBlockchain,
    /// This node is not part of the session serving the relay.
    NotInSession,
    /// The service proof failed validation.
    InvalidProof,
    /// The payload kind cannot be executed.
    UnsupportedPayloadType,
    /// The request to the hosted blockchain failed.
    TransportFailure,
    /// The session's relay batch is at capacity.
    BatchFull,
    /// The proof has already been accepted for the session.
    DuplicateProof,
}

impl ErrorKind {
    /// Returns the stable numeric code of this kind.
    pub const fn code(&self) -> i32 {
        match self {
            ErrorKind::NotFound => 1,
            ErrorKind::InvalidState => 2,
            ErrorKind::InsufficientFunds => 3,
            ErrorKind::BelowMinimumStake => 4,
            ErrorKind::EmptyInput => 5,
            ErrorKind::UnsupportedBlockchain => 6,
            ErrorKind::UnstakedBlockchain => 7,
            ErrorKind::NotInSession => 8,
            ErrorKind::InvalidProof => 9,
            ErrorKind::UnsupportedPayloadType => 10,
            ErrorKind::TransportFailure => 11,
            ErrorKind::BatchFull => 12,
            ErrorKind::DuplicateProof => 13,
        }
    }
}
