//! The application registry interface.

use relay_primitives::prelude::{Address, Application, BlockHeight, PublicKey, Tokens};

use crate::errors::{AppError, AppResult};

/// Interface to the staking records of applications and the balances that fund them.
///
/// Implementors provide storage and the atomic mutations. The validation rules that gate those
/// mutations are provided methods so that every registry enforces the same rules.
pub trait AppKeeper: Send + Sync {
    /// Returns the application registered under `address`.
    fn application(&self, address: &Address) -> Option<Application>;

    /// Returns the spendable balance of the account at `address`.
    fn balance(&self, address: &Address) -> Tokens;

    /// Returns the minimum stake of the network.
    fn minimum_stake(&self) -> Tokens;

    /// Debits `amount` from the application's account and adds it to the application's stake,
    /// registering the application if needed and replacing its requested chains.
    ///
    /// Either all of this happens or none of it does.
    fn stake_application(&self, application: Application, amount: Tokens)
        -> AppResult<Application>;

    /// Moves the application into the unstaking queue and returns the height at which its tokens
    /// are released.
    fn begin_unstaking_application(
        &self,
        address: &Address,
        block_height: BlockHeight,
    ) -> AppResult<BlockHeight>;

    /// Sets or clears the jailed flag of the application.
    fn set_jailed(&self, address: &Address, jailed: bool) -> AppResult<()>;

    /// Returns the application whose public key is `public_key`.
    fn application_by_key(&self, public_key: &PublicKey) -> Option<Application> {
        self.application(&public_key.address())
    }

    /// Checks whether `application` can stake `amount` more tokens.
    fn validate_application_staking(
        &self,
        application: &Application,
        amount: Tokens,
    ) -> AppResult<()> {
        if amount.is_zero() {
            return Err(AppError::ZeroStake);
        }

        let minimum = self.minimum_stake();
        let resulting_stake = match self.application(&application.address) {
            Some(existing) if existing.is_unstaking() => {
                return Err(AppError::AlreadyUnstaking(existing.address));
            }
            Some(existing) if existing.is_jailed() => {
                return Err(AppError::Jailed(existing.address));
            }
            Some(existing) => existing
                .tokens()
                .checked_add(amount)
                .ok_or(AppError::Overflow)?,
            None => amount,
        };

        if resulting_stake < minimum {
            return Err(AppError::BelowMinimumStake {
                amount: resulting_stake,
                minimum,
            });
        }

        let available = self.balance(&application.address);
        if available < amount {
            return Err(AppError::InsufficientFunds {
                required: amount,
                available,
            });
        }

        Ok(())
    }

    /// Checks whether `application` can begin unstaking.
    ///
    /// Jailed applications may unstake.
    fn validate_application_begin_unstaking(&self, application: &Application) -> AppResult<()> {
        if application.is_unstaking() {
            return Err(AppError::AlreadyUnstaking(application.address));
        }

        if !application.is_staked() {
            return Err(AppError::NotStaked(application.address));
        }

        Ok(())
    }

    /// Jails the application. Used by the slashing logic.
    fn jail_application(&self, address: &Address) -> AppResult<()> {
        self.set_jailed(address, true)
    }

    /// Lifts the jail of the application.
    fn unjail_application(&self, address: &Address) -> AppResult<()> {
        self.set_jailed(address, false)
    }
}
