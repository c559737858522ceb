//! The messages that drive the application staking lifecycle.

use std::{collections::BTreeSet, fmt};

use relay_primitives::prelude::{Address, Blockchain, PublicKey, Tokens};
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};

/// Stakes `value` tokens for the application owning `public_key`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgAppStake {
    /// The public key of the application.
    pub public_key: PublicKey,

    /// The hosted chains the application wants to consume.
    pub chains: BTreeSet<Blockchain>,

    /// The amount of tokens to stake.
    pub value: Tokens,
}

/// Begins unstaking the application at `address`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgBeginAppUnstake {
    /// The address of the application.
    pub address: Address,
}

/// Lifts the jail of the application at `address`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgAppUnjail {
    /// The address of the application.
    pub address: Address,
}

/// A staking message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppMsg {
    /// See [`MsgAppStake`].
    Stake(MsgAppStake),

    /// See [`MsgBeginAppUnstake`].
    BeginUnstake(MsgBeginAppUnstake),

    /// See [`MsgAppUnjail`].
    Unjail(MsgAppUnjail),
}

impl AppMsg {
    /// Performs the stateless checks on the message.
    pub fn validate_basic(&self) -> AppResult<()> {
        match self {
            AppMsg::Stake(msg) => {
                if msg.value.is_zero() {
                    return Err(AppError::ZeroStake);
                }

                if msg.chains.is_empty() {
                    return Err(AppError::EmptyChains);
                }

                if msg.chains.iter().any(Blockchain::is_empty) {
                    return Err(AppError::EmptyChainId);
                }

                Ok(())
            }
            AppMsg::BeginUnstake(_) | AppMsg::Unjail(_) => Ok(()),
        }
    }

    /// Returns the address of the account that sent the message.
    pub fn sender(&self) -> Address {
        match self {
            AppMsg::Stake(msg) => msg.public_key.address(),
            AppMsg::BeginUnstake(msg) => msg.address,
            AppMsg::Unjail(msg) => msg.address,
        }
    }
}

impl fmt::Display for AppMsg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppMsg::Stake(msg) => write!(f, "Stake {} by {}", msg.value, self.sender()),
            AppMsg::BeginUnstake(msg) => write!(f, "BeginUnstake by {}", msg.address),
            AppMsg::Unjail(msg) => write!(f, "Unjail by {}", msg.address),
        }
    }
}

impl From<MsgAppStake> for AppMsg {
    fn from(msg: MsgAppStake) -> Self {
        AppMsg::Stake(msg)
    }
}

impl From<MsgBeginAppUnstake> for AppMsg {
    fn from(msg: MsgBeginAppUnstake) -> Self {
        AppMsg::BeginUnstake(msg)
    }
}

impl From<MsgAppUnjail> for AppMsg {
    fn from(msg: MsgAppUnjail) -> Self {
        AppMsg::Unjail(msg)
    }
}
