//! Bootstraps an RPC server for the relay node.

use std::{fmt, sync::Arc, time::Instant};

use anyhow::Context;
use async_trait::async_trait;
use jsonrpsee::{core::RpcResult, types::ErrorObjectOwned, RpcModule};
use relay_apps::{AppKeeper, InMemoryAppKeeper};
use relay_primitives::prelude::{Address, ErrorKind, Node, Relay, SessionHeader};
use relay_rpc::{
    traits::{RelayControlApiServer, RelayServiceApiServer},
    types::{RpcApplication, RpcRelayResponse, RpcSessionBatch},
};
use relay_service::prelude::{RelayService, ReqwestTransport};
use tracing::{debug, info, warn};

/// The relay service as run by the node.
pub(crate) type NodeService = RelayService<InMemoryAppKeeper, ReqwestTransport>;

/// Starts an RPC server for the relay node and serves until the process is interrupted.
pub(crate) async fn start_rpc<T>(rpc_impl: &T, rpc_addr: &str) -> anyhow::Result<()>
where
    T: RelayControlApiServer + RelayServiceApiServer + Clone + Sync + Send,
{
    let mut rpc_module = RpcModule::new(rpc_impl.clone());

    let control_api = RelayControlApiServer::into_rpc(rpc_impl.clone());
    let service_api = RelayServiceApiServer::into_rpc(rpc_impl.clone());

    rpc_module.merge(control_api).context("merge control api")?;
    rpc_module.merge(service_api).context("merge service api")?;

    info!("starting relay rpc server at {rpc_addr}");
    let rpc_server = jsonrpsee::server::ServerBuilder::new()
        .build(&rpc_addr)
        .await
        .context("build relay rpc server")?;

    let rpc_handle = rpc_server.start(rpc_module);
    debug!("relay rpc server started");

    tokio::signal::ctrl_c()
        .await
        .context("listen for shutdown signal")?;
    info!("stopping rpc server");

    if rpc_handle.stop().is_err() {
        warn!("rpc server already stopped");
    }
    rpc_handle.stopped().await;

    Ok(())
}

/// RPC server for the relay node.
#[derive(Debug, Clone)]
pub(crate) struct RelayRpc {
    /// Node start time.
    start_time: Instant,

    service: Arc<NodeService>,

    /// The network's active node set relays are checked against.
    active_nodes: Arc<[Node]>,
}

impl RelayRpc {
    pub(crate) fn new(service: NodeService, active_nodes: Vec<Node>) -> Self {
        Self {
            start_time: Instant::now(),
            service: Arc::new(service),
            active_nodes: active_nodes.into(),
        }
    }
}

#[async_trait]
impl RelayControlApiServer for RelayRpc {
    async fn get_uptime(&self) -> RpcResult<u64> {
        Ok(self.start_time.elapsed().as_secs())
    }
}

#[async_trait]
impl RelayServiceApiServer for RelayRpc {
    async fn dispatch(
        &self,
        relay: Relay,
        session: SessionHeader,
    ) -> RpcResult<RpcRelayResponse> {
        self.service
            .serve(relay, session, &self.active_nodes)
            .await
            .map(|response| RpcRelayResponse { response })
            .map_err(|e| rpc_error(e.kind(), e))
    }

    async fn get_application(&self, address: Address) -> RpcResult<Option<RpcApplication>> {
        Ok(self
            .service
            .keeper()
            .application(&address)
            .map(RpcApplication::from))
    }

    async fn get_session_batches(&self) -> RpcResult<Vec<RpcSessionBatch>> {
        Ok(self
            .service
            .batches()
            .summary()
            .into_iter()
            .map(|summary| RpcSessionBatch {
                session_block_id: summary.key.session_block_id,
                session_block_height: summary.key.session_block_height,
                client: summary.key.client,
                blockchain: summary.key.blockchain,
                servicer: summary.key.servicer,
                proofs: summary.proofs,
                max_relays: summary.max_relays,
            })
            .collect())
    }
}

/// Builds an error object whose code is the stable code of `kind`.
fn rpc_error(kind: ErrorKind, err: impl fmt::Display) -> ErrorObjectOwned {
    ErrorObjectOwned::owned::<()>(kind.code(), err.to_string(), None)
}

#[cfg(test)]
mod tests {
    use std::{collections::BTreeSet, time::Duration};

    use relay_params::prelude::{AppParams, RelayParams};
    use relay_primitives::prelude::{Blockchain, PublicKey};
    use relay_service::prelude::{
        ActiveSetOracle, HostedChain, HostedChains, ProofBatches, RelayExecutor, RelayValidator,
    };
    use relay_test_utils::{
        generate_keypair, generate_public_key, generate_session_header, http_relay,
    };

    use super::*;

    fn rpc() -> (RelayRpc, PublicKey) {
        let node = generate_public_key();
        let params = RelayParams::default();
        let validator = RelayValidator::new(
            Arc::new(ActiveSetOracle::new(node)),
            params.default_http_method.clone(),
        );
        let executor = RelayExecutor::new(
            validator,
            ReqwestTransport::new(Duration::from_secs(1)).unwrap(),
            Duration::from_secs(1),
        );
        let service = RelayService::new(
            InMemoryAppKeeper::new(AppParams::default()),
            executor,
            HostedChains::new([HostedChain {
                id: Blockchain::new("0001"),
                url: "http://127.0.0.1:1".to_string(),
            }]),
            ProofBatches::new(),
            params,
        );
        let nodes = vec![Node {
            public_key: node,
            chains: BTreeSet::from([Blockchain::new("0001")]),
        }];

        (RelayRpc::new(service, nodes), node)
    }

    #[tokio::test]
    async fn test_dispatch_error_carries_kind_code() {
        let (rpc, node) = rpc();
        let relay = http_relay(&generate_keypair(), node, "0001", 1, b"{}");

        let err = RelayServiceApiServer::dispatch(&rpc, relay, generate_session_header(1))
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorKind::NotFound.code());
    }

    #[tokio::test]
    async fn test_queries_on_empty_node() {
        let (rpc, _) = rpc();

        assert_eq!(
            rpc.get_application(generate_public_key().address())
                .await
                .unwrap(),
            None
        );
        assert!(rpc.get_session_batches().await.unwrap().is_empty());
        assert!(rpc.get_uptime().await.unwrap() < 60);
    }
}
