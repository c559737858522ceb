//! Parameters for the application staking lifecycle such as the minimum stake and the unstaking
//! period.

use serde::{Deserialize, Serialize};

use super::{
    default::{MINIMUM_APP_STAKE, UNSTAKING_BLOCKS},
    errors::ParamsError,
};

/// The application staking parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppParams {
    /// The minimum number of tokens an application must keep staked to be served or unjailed.
    pub minimum_stake: u64,

    /// The number of blocks between beginning to unstake and the release of the tokens.
    pub unstaking_blocks: u64,
}

impl AppParams {
    /// Checks that the parameters are usable.
    pub const fn validate(&self) -> Result<(), ParamsError> {
        if self.minimum_stake == 0 {
            return Err(ParamsError::ZeroMinimumStake);
        }

        Ok(())
    }
}

impl Default for AppParams {
    fn default() -> Self {
        Self {
            minimum_stake: MINIMUM_APP_STAKE,
            unstaking_blocks: UNSTAKING_BLOCKS,
        }
    }
}
