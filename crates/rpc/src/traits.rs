//! Traits for the RPC server.

use jsonrpsee::{core::RpcResult, proc_macros::rpc};
use relay_primitives::prelude::{Address, Relay, SessionHeader};

use crate::types::{RpcApplication, RpcRelayResponse, RpcSessionBatch};

/// RPCs related to information about the node itself.
#[cfg_attr(not(feature = "client"), rpc(server, namespace = "relay"))]
#[cfg_attr(feature = "client", rpc(server, client, namespace = "relay"))]
pub trait RelayControlApi {
    /// Get the uptime of the node in seconds assuming the clock is strictly monotonically
    /// increasing.
    #[method(name = "uptime")]
    async fn get_uptime(&self) -> RpcResult<u64>;
}

/// RPCs that serve relays and report on the work accrued for them.
#[cfg_attr(not(feature = "client"), rpc(server, namespace = "relay"))]
#[cfg_attr(feature = "client", rpc(server, client, namespace = "relay"))]
pub trait RelayServiceApi {
    /// Serve a relay in `session`.
    ///
    /// Errors carry the stable code of their kind.
    #[method(name = "dispatch")]
    async fn dispatch(
        &self,
        relay: Relay,
        session: SessionHeader,
    ) -> RpcResult<RpcRelayResponse>;

    /// Get the staking record of an application.
    #[method(name = "application")]
    async fn get_application(&self, address: Address) -> RpcResult<Option<RpcApplication>>;

    /// Get the proof batches of every session this node has served.
    #[method(name = "sessionBatches")]
    async fn get_session_batches(&self) -> RpcResult<Vec<RpcSessionBatch>>;
}
