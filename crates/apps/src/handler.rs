//! The handler that executes staking messages against an [`AppKeeper`].
//!
//! Every message is validated completely before the keeper is mutated, so a rejected message
//! leaves the registry untouched and emits no events.

use relay_primitives::{
    events::{ATTRIBUTE_KEY_AMOUNT, ATTRIBUTE_KEY_MODULE, ATTRIBUTE_KEY_SENDER, EVENT_TYPE_MESSAGE},
    prelude::{Address, Application, BlockHeight, Event},
};
use tracing::{debug, info, warn};

use crate::{
    errors::{AppError, AppResult},
    events::{
        ATTRIBUTE_KEY_APPLICATION, ATTRIBUTE_VALUE_CATEGORY, EVENT_TYPE_BEGIN_UNSTAKE,
        EVENT_TYPE_CREATE_APPLICATION, EVENT_TYPE_STAKE,
    },
    keeper::AppKeeper,
    msgs::{AppMsg, MsgAppStake, MsgAppUnjail, MsgBeginAppUnstake},
};

/// The context a message is executed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MsgCtx {
    /// The height of the block that includes the message.
    pub block_height: BlockHeight,
}

/// Executes staking messages.
#[derive(Debug, Clone)]
pub struct AppMsgHandler<K> {
    keeper: K,
}

impl<K: AppKeeper> AppMsgHandler<K> {
    /// Creates a new handler operating on `keeper`.
    pub const fn new(keeper: K) -> Self {
        Self { keeper }
    }

    /// Returns the underlying keeper.
    pub const fn keeper(&self) -> &K {
        &self.keeper
    }

    /// Handles a staking message and returns the events it emitted.
    pub fn handle(&self, ctx: &MsgCtx, msg: AppMsg) -> AppResult<Vec<Event>> {
        debug!(%msg, block_height = ctx.block_height, "handling staking message");

        let res = msg.validate_basic().and_then(|_| match msg.clone() {
            AppMsg::Stake(msg) => self.handle_stake(msg),
            AppMsg::BeginUnstake(msg) => self.handle_begin_unstake(ctx, msg),
            AppMsg::Unjail(msg) => self.handle_unjail(msg),
        });

        if let Err(err) = &res {
            warn!(%msg, %err, "staking message rejected");
        }

        res
    }

    fn handle_stake(&self, msg: MsgAppStake) -> AppResult<Vec<Event>> {
        let address = msg.public_key.address();
        let application = Application::new(msg.public_key, msg.chains, msg.value);

        self.keeper
            .validate_application_staking(&application, msg.value)?;
        let staked = self.keeper.stake_application(application, msg.value)?;

        info!(%address, amount = %msg.value, tokens = %staked.tokens(), "application staked");

        Ok(vec![
            Event::new(EVENT_TYPE_CREATE_APPLICATION)
                .with_attribute(ATTRIBUTE_KEY_APPLICATION, address)
                .with_attribute(ATTRIBUTE_KEY_AMOUNT, msg.value),
            Event::new(EVENT_TYPE_STAKE)
                .with_attribute(ATTRIBUTE_KEY_MODULE, ATTRIBUTE_VALUE_CATEGORY)
                .with_attribute(ATTRIBUTE_KEY_SENDER, address)
                .with_attribute(ATTRIBUTE_KEY_AMOUNT, msg.value),
            message_event(&address),
        ])
    }

    fn handle_begin_unstake(
        &self,
        ctx: &MsgCtx,
        msg: MsgBeginAppUnstake,
    ) -> AppResult<Vec<Event>> {
        let application = self
            .keeper
            .application(&msg.address)
            .ok_or(AppError::ApplicationNotFound(msg.address))?;

        self.keeper
            .validate_application_begin_unstaking(&application)?;
        let completion_height = self
            .keeper
            .begin_unstaking_application(&msg.address, ctx.block_height)?;

        info!(address = %msg.address, %completion_height, "application began unstaking");

        Ok(vec![
            Event::new(EVENT_TYPE_BEGIN_UNSTAKE)
                .with_attribute(ATTRIBUTE_KEY_MODULE, ATTRIBUTE_VALUE_CATEGORY)
                .with_attribute(ATTRIBUTE_KEY_SENDER, msg.address),
            message_event(&msg.address),
        ])
    }

    fn handle_unjail(&self, msg: MsgAppUnjail) -> AppResult<Vec<Event>> {
        self.validate_unjail(&msg.address)?;
        self.keeper.unjail_application(&msg.address)?;

        info!(address = %msg.address, "application unjailed");

        Ok(vec![message_event(&msg.address)])
    }

    /// Checks the unjail preconditions in order; the first one that fails is reported.
    fn validate_unjail(&self, address: &Address) -> AppResult<Application> {
        let application = self
            .keeper
            .application(address)
            .ok_or(AppError::ApplicationNotFound(*address))?;

        // cannot be unjailed without a self stake
        if application.tokens().is_zero() {
            return Err(AppError::MissingStake(*address));
        }

        let minimum = self.keeper.minimum_stake();
        if application.tokens() < minimum {
            return Err(AppError::StakeTooLow {
                tokens: application.tokens(),
                minimum,
            });
        }

        if !application.is_jailed() {
            return Err(AppError::NotJailed(*address));
        }

        Ok(application)
    }
}

fn message_event(sender: &Address) -> Event {
    Event::new(EVENT_TYPE_MESSAGE)
        .with_attribute(ATTRIBUTE_KEY_MODULE, ATTRIBUTE_VALUE_CATEGORY)
        .with_attribute(ATTRIBUTE_KEY_SENDER, sender)
}
