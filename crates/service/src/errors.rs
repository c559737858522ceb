//! Errors that can occur while validating, executing and accounting for a relay.

use relay_primitives::prelude::{
    Address, Blockchain, ErrorKind, PayloadKind, ProofError, PublicKey,
};
use thiserror::Error;

use crate::{batch::BatchError, session::SessionError, transport::TransportError};

/// Errors that can occur while serving a relay.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelayError {
    /// The relay does not name a blockchain.
    #[error("relay blockchain is empty")]
    EmptyBlockchain,

    /// The relay payload carries no data.
    #[error("relay payload data is empty")]
    EmptyPayloadData,

    /// This node does not host the blockchain.
    #[error("blockchain {0} is not hosted by this node")]
    UnsupportedBlockchain(Blockchain),

    /// The application is not staked for the blockchain.
    #[error("application is not staked for blockchain {0}")]
    UnstakedBlockchain(Blockchain),

    /// This node is not part of the session.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// The service proof failed validation.
    #[error("invalid service proof: {0}")]
    InvalidProof(#[from] ProofError),

    /// No URL is configured for the hosted blockchain.
    #[error("no url configured for hosted blockchain {0}")]
    UnknownHostedChainUrl(Blockchain),

    /// The payload kind cannot be executed.
    #[error("unsupported payload type: {0}")]
    UnsupportedPayloadType(PayloadKind),

    /// The request to the hosted blockchain failed.
    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),

    /// No application is registered for the client of the proof.
    #[error("no application found for client {0}")]
    ApplicationNotFound(PublicKey),

    /// The application is jailed.
    #[error("application {0} is jailed")]
    ApplicationJailed(Address),

    /// The application's stake is not active.
    #[error("application {0} is not staked")]
    ApplicationNotStaked(Address),

    /// The proof could not be accrued.
    #[error(transparent)]
    Batch(#[from] BatchError),
}

impl RelayError {
    /// Returns the stable classification of this error.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            RelayError::EmptyBlockchain | RelayError::EmptyPayloadData => ErrorKind::EmptyInput,
            RelayError::UnsupportedBlockchain(_) => ErrorKind::UnsupportedBlockchain,
            RelayError::UnstakedBlockchain(_) => ErrorKind::UnstakedBlockchain,
            RelayError::Session(_) => ErrorKind::NotInSession,
            RelayError::InvalidProof(_) => ErrorKind::InvalidProof,
            RelayError::UnknownHostedChainUrl(_) => ErrorKind::UnsupportedBlockchain,
            RelayError::UnsupportedPayloadType(_) => ErrorKind::UnsupportedPayloadType,
            RelayError::Transport(_) => ErrorKind::TransportFailure,
            RelayError::ApplicationNotFound(_) => ErrorKind::NotFound,
            RelayError::ApplicationJailed(_) | RelayError::ApplicationNotStaked(_) => {
                ErrorKind::InvalidState
            }
            RelayError::Batch(err) => err.kind(),
        }
    }
}

/// The result type for relay operations.
pub type RelayResult<T> = Result<T, RelayError>;
