//! In-memory implementation of the application registry.

use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use parking_lot::RwLock;
use relay_params::prelude::AppParams;
use relay_primitives::prelude::{Address, Application, BlockHeight, StakeStatus, Tokens};
use tracing::{debug, info};

use crate::{
    errors::{AppError, AppResult},
    keeper::AppKeeper,
};

#[derive(Debug, Default)]
struct KeeperState {
    /// Registered applications.
    applications: BTreeMap<Address, Application>,

    /// Spendable balances of accounts.
    balances: HashMap<Address, Tokens>,

    /// Applications waiting for their stake to be released, keyed by release height.
    unstaking_queue: BTreeMap<BlockHeight, Vec<Address>>,
}

/// In-memory application registry.
///
/// Clones share the same state. Every mutation happens under a single write lock so readers see
/// either the state before or after it.
#[derive(Debug, Clone)]
pub struct InMemoryAppKeeper {
    params: AppParams,
    state: Arc<RwLock<KeeperState>>,
}

impl InMemoryAppKeeper {
    /// Creates an empty registry governed by `params`.
    pub fn new(params: AppParams) -> Self {
        Self {
            params,
            state: Arc::new(RwLock::new(KeeperState::default())),
        }
    }

    /// Returns the staking parameters.
    pub const fn params(&self) -> &AppParams {
        &self.params
    }

    /// Credits `amount` to the account at `address` and returns the new balance.
    pub fn fund_account(&self, address: &Address, amount: Tokens) -> AppResult<Tokens> {
        let mut state = self.state.write();

        let balance = state.balances.entry(*address).or_default();
        *balance = balance.checked_add(amount).ok_or(AppError::Overflow)?;

        Ok(*balance)
    }

    /// Returns every registered application ordered by address.
    pub fn applications(&self) -> Vec<Application> {
        self.state.read().applications.values().cloned().collect()
    }

    /// Releases the stake of every application whose unstaking period has elapsed at
    /// `block_height`: the record is deleted and its tokens are credited back to the account.
    ///
    /// Returns the addresses of the released applications.
    pub fn complete_unstaking(&self, block_height: BlockHeight) -> Vec<Address> {
        let mut state = self.state.write();

        let pending = state.unstaking_queue.split_off(&(block_height.saturating_add(1)));
        let matured = std::mem::replace(&mut state.unstaking_queue, pending);

        let mut released = Vec::new();
        for address in matured.into_values().flatten() {
            let Some(application) = state.applications.remove(&address) else {
                continue;
            };

            let balance = state.balances.entry(address).or_default();
            *balance = balance.checked_add(application.tokens()).unwrap_or(Tokens::new(u64::MAX));

            info!(%address, tokens = %application.tokens(), "application unstaked");
            released.push(address);
        }

        released
    }
}

impl AppKeeper for InMemoryAppKeeper {
    fn application(&self, address: &Address) -> Option<Application> {
        self.state.read().applications.get(address).cloned()
    }

    fn balance(&self, address: &Address) -> Tokens {
        self.state
            .read()
            .balances
            .get(address)
            .copied()
            .unwrap_or_default()
    }

    fn minimum_stake(&self) -> Tokens {
        Tokens::new(self.params.minimum_stake)
    }

    fn stake_application(
        &self,
        application: Application,
        amount: Tokens,
    ) -> AppResult<Application> {
        let mut state = self.state.write();
        let address = application.address;

        let available = state.balances.get(&address).copied().unwrap_or_default();
        let remaining = available
            .checked_sub(amount)
            .ok_or(AppError::InsufficientFunds {
                required: amount,
                available,
            })?;

        let staked = match state.applications.get(&address) {
            Some(existing) => Application {
                chains: application.chains,
                tokens: existing
                    .tokens()
                    .checked_add(amount)
                    .ok_or(AppError::Overflow)?,
                ..existing.clone()
            },
            None => Application {
                tokens: amount,
                status: StakeStatus::Staked,
                ..application
            },
        };

        state.balances.insert(address, remaining);
        state.applications.insert(address, staked.clone());
        debug!(%address, %amount, tokens = %staked.tokens(), "stored stake");

        Ok(staked)
    }

    fn begin_unstaking_application(
        &self,
        address: &Address,
        block_height: BlockHeight,
    ) -> AppResult<BlockHeight> {
        let mut state = self.state.write();

        let application = state
            .applications
            .get_mut(address)
            .ok_or(AppError::ApplicationNotFound(*address))?;

        let completion_height = block_height.saturating_add(self.params.unstaking_blocks);
        application.status = StakeStatus::Unstaking { completion_height };

        state
            .unstaking_queue
            .entry(completion_height)
            .or_default()
            .push(*address);

        Ok(completion_height)
    }

    fn set_jailed(&self, address: &Address, jailed: bool) -> AppResult<()> {
        let mut state = self.state.write();

        let application = state
            .applications
            .get_mut(address)
            .ok_or(AppError::ApplicationNotFound(*address))?;
        application.jailed = jailed;

        Ok(())
    }
}
