//! Errors that can occur while handling staking messages.

use relay_primitives::prelude::{Address, ErrorKind, Tokens};
use thiserror::Error;

/// Errors that can occur while validating or executing a staking message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    /// No application is registered under the address.
    #[error("no application found for address {0}")]
    ApplicationNotFound(Address),

    /// The account balance does not cover the stake.
    #[error("insufficient funds: required {required}, available {available}")]
    InsufficientFunds {
        /// The amount to be staked.
        required: Tokens,
        /// The spendable balance of the account.
        available: Tokens,
    },

    /// The resulting stake would be below the network minimum.
    #[error("stake of {amount} is below the minimum of {minimum}")]
    BelowMinimumStake {
        /// The stake the application would end up with.
        amount: Tokens,
        /// The network minimum.
        minimum: Tokens,
    },

    /// A stake message must carry a non-zero amount.
    #[error("stake amount must be non-zero")]
    ZeroStake,

    /// A stake message must request at least one chain.
    #[error("stake message requests no chains")]
    EmptyChains,

    /// A requested chain identifier is empty.
    #[error("stake message contains an empty chain identifier")]
    EmptyChainId,

    /// The application has not staked.
    #[error("application {0} is not staked")]
    NotStaked(Address),

    /// The application is already unstaking.
    #[error("application {0} is already unstaking")]
    AlreadyUnstaking(Address),

    /// The application is jailed and must unjail first.
    #[error("application {0} is jailed")]
    Jailed(Address),

    /// The application has no stake to unjail with.
    #[error("application {0} has no self stake")]
    MissingStake(Address),

    /// The application's stake is below the network minimum.
    #[error("stake of {tokens} is below the minimum of {minimum} required to unjail")]
    StakeTooLow {
        /// The staked tokens.
        tokens: Tokens,
        /// The network minimum.
        minimum: Tokens,
    },

    /// The application is not jailed.
    #[error("application {0} is not jailed")]
    NotJailed(Address),

    /// Adding the amount would overflow the token counter.
    #[error("token amount overflow")]
    Overflow,
}

impl AppError {
    /// Returns the stable classification of this error.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            AppError::ApplicationNotFound(_) => ErrorKind::NotFound,
            AppError::InsufficientFunds { .. } => ErrorKind::InsufficientFunds,
            AppError::BelowMinimumStake { .. } | AppError::StakeTooLow { .. } => {
                ErrorKind::BelowMinimumStake
            }
            AppError::ZeroStake | AppError::EmptyChains | AppError::EmptyChainId => {
                ErrorKind::EmptyInput
            }
            AppError::NotStaked(_)
            | AppError::AlreadyUnstaking(_)
            | AppError::Jailed(_)
            | AppError::MissingStake(_)
            | AppError::NotJailed(_)
            | AppError::Overflow => ErrorKind::InvalidState,
        }
    }
}

/// The result type for staking operations.
pub type AppResult<T> = Result<T, AppError>;
