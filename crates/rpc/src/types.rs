//! Types for the RPC server.

use std::collections::BTreeSet;

use relay_primitives::prelude::{
    Address, Application, BlockHeight, Blockchain, PublicKey, SessionBlockId, StakeStatus, Tokens,
};
use serde::{Deserialize, Serialize};

/// The response of a served relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcRelayResponse {
    /// The raw response body of the hosted chain.
    pub response: String,
}

/// The stake status of an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RpcStakeStatus {
    /// Not staked.
    Unstaked,

    /// Stake is active.
    Staked,

    /// Stake is being released.
    Unstaking {
        /// The height at which the stake is released.
        completion_height: BlockHeight,
    },
}

impl From<StakeStatus> for RpcStakeStatus {
    fn from(status: StakeStatus) -> Self {
        match status {
            StakeStatus::Unstaked => RpcStakeStatus::Unstaked,
            StakeStatus::Staked => RpcStakeStatus::Staked,
            StakeStatus::Unstaking { completion_height } => {
                RpcStakeStatus::Unstaking { completion_height }
            }
        }
    }
}

/// The staking record of an application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcApplication {
    /// The address of the application.
    pub address: Address,

    /// The public key of the application.
    pub public_key: PublicKey,

    /// The chains the application is staked for.
    pub chains: BTreeSet<Blockchain>,

    /// The staked tokens.
    pub tokens: Tokens,

    /// Whether the application is jailed.
    pub jailed: bool,

    /// The stake status.
    #[serde(flatten)]
    pub status: RpcStakeStatus,
}

impl From<Application> for RpcApplication {
    fn from(app: Application) -> Self {
        Self {
            address: app.address,
            public_key: app.public_key,
            chains: app.chains,
            tokens: app.tokens,
            jailed: app.jailed,
            status: app.status.into(),
        }
    }
}

/// The proofs accrued for one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcSessionBatch {
    /// The block that opened the session.
    pub session_block_id: SessionBlockId,

    /// The height of that block.
    pub session_block_height: BlockHeight,

    /// The application served.
    pub client: PublicKey,

    /// The chain served.
    pub blockchain: Blockchain,

    /// The node serving.
    pub servicer: PublicKey,

    /// The number of accrued proofs.
    pub proofs: usize,

    /// The cap of the batch.
    pub max_relays: u64,
}
