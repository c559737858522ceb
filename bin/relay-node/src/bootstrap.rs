//! Wires the registry, the relay service and the RPC server together.

use std::sync::Arc;

use anyhow::Context;
use relay_apps::{msgs::MsgAppStake, AppMsg, AppMsgHandler, InMemoryAppKeeper, MsgCtx};
use relay_service::prelude::{
    ActiveSetOracle, HostedChains, ProofBatches, RelayExecutor, RelayService, RelayValidator,
    ReqwestTransport,
};
use tracing::info;

use crate::{
    config::Config,
    params::{GenesisParams, Params},
    rpc_server,
};

/// Runs the node until it is asked to shut down.
pub(crate) async fn run(params: Params, config: Config) -> anyhow::Result<()> {
    params.validate().context("invalid params")?;

    let keeper = InMemoryAppKeeper::new(params.apps);
    seed_genesis(&AppMsgHandler::new(keeper.clone()), &params.genesis)
        .context("could not apply genesis")?;

    let timeout = config.request_timeout();
    let validator = RelayValidator::new(
        Arc::new(ActiveSetOracle::new(config.node_pubkey)),
        params.relay.default_http_method.clone(),
    );
    let transport = ReqwestTransport::new(timeout).context("could not build http transport")?;
    let executor = RelayExecutor::new(validator, transport, timeout);

    let hosted = HostedChains::new(config.hosted_chains);
    info!(hosted = hosted.len(), active_nodes = config.active_nodes.len(), "relay service ready");

    let service = RelayService::new(keeper, executor, hosted, ProofBatches::new(), params.relay);
    let rpc = rpc_server::RelayRpc::new(service, config.active_nodes);

    rpc_server::start_rpc(&rpc, &config.rpc_addr).await
}

/// Funds the genesis accounts and stakes the genesis applications.
fn seed_genesis(
    handler: &AppMsgHandler<InMemoryAppKeeper>,
    genesis: &GenesisParams,
) -> anyhow::Result<()> {
    let keeper = handler.keeper();
    let ctx = MsgCtx { block_height: 0 };

    for account in &genesis.accounts {
        keeper
            .fund_account(&account.address, account.balance)
            .with_context(|| format!("could not fund {}", account.address))?;
    }

    for app in &genesis.applications {
        let address = app.public_key.address();
        keeper
            .fund_account(&address, app.stake)
            .with_context(|| format!("could not fund application {address}"))?;

        handler
            .handle(
                &ctx,
                AppMsg::Stake(MsgAppStake {
                    public_key: app.public_key,
                    chains: app.chains.clone(),
                    value: app.stake,
                }),
            )
            .with_context(|| format!("could not stake application {address}"))?;
    }

    info!(
        accounts = genesis.accounts.len(),
        applications = genesis.applications.len(),
        "applied genesis"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use relay_apps::AppKeeper;
    use relay_params::prelude::AppParams;
    use relay_primitives::prelude::{Blockchain, Tokens};
    use relay_test_utils::generate_public_key;

    use super::*;
    use crate::params::{GenesisAccount, GenesisApplication};

    #[test]
    fn test_seed_genesis() {
        let keeper = InMemoryAppKeeper::new(AppParams::default());
        let handler = AppMsgHandler::new(keeper.clone());
        let account = generate_public_key().address();
        let app = generate_public_key();

        let genesis = GenesisParams {
            accounts: vec![GenesisAccount {
                address: account,
                balance: Tokens::new(50),
            }],
            applications: vec![GenesisApplication {
                public_key: app,
                chains: BTreeSet::from([Blockchain::new("0001")]),
                stake: Tokens::new(1_000),
            }],
        };

        seed_genesis(&handler, &genesis).unwrap();

        assert_eq!(keeper.balance(&account), Tokens::new(50));
        let staked = keeper.application_by_key(&app).unwrap();
        assert!(staked.is_staked());
        assert_eq!(staked.tokens(), Tokens::new(1_000));
        assert_eq!(keeper.balance(&app.address()), Tokens::ZERO);
    }

    #[test]
    fn test_genesis_stake_below_minimum_fails() {
        let keeper = InMemoryAppKeeper::new(AppParams::default());
        let handler = AppMsgHandler::new(keeper.clone());

        let genesis = GenesisParams {
            accounts: Vec::new(),
            applications: vec![GenesisApplication {
                public_key: generate_public_key(),
                chains: BTreeSet::from([Blockchain::new("0001")]),
                stake: Tokens::new(1),
            }],
        };

        assert!(seed_genesis(&handler, &genesis).is_err());
    }
}
