//! Serving relays end to end: registry checks, validation, execution and proof accrual.

use relay_apps::AppKeeper;
use relay_params::prelude::RelayParams;
use relay_primitives::prelude::{Node, Relay, SessionHeader};
use tracing::{info, instrument, warn};

use crate::{
    batch::ProofBatches,
    errors::{RelayError, RelayResult},
    executor::RelayExecutor,
    hosted::HostedChains,
    transport::HttpTransport,
    validator::ValidationContext,
};

/// Serves relays on behalf of staked applications.
///
/// A relay is served in four steps, each of which aborts the relay on failure:
///
/// 1. the client of the proof must be a staked, unjailed application,
/// 2. the proof must fit in its session's batch,
/// 3. the relay is validated and executed; its proof must name this node and the session served,
/// 4. the proof is accrued.
///
/// Nothing is accrued for a relay that fails before its response is obtained.
#[derive(Debug)]
pub struct RelayService<K, T> {
    keeper: K,
    executor: RelayExecutor<T>,
    hosted: HostedChains,
    batches: ProofBatches,
    params: RelayParams,
}

impl<K: AppKeeper, T: HttpTransport> RelayService<K, T> {
    /// Creates a new service.
    pub const fn new(
        keeper: K,
        executor: RelayExecutor<T>,
        hosted: HostedChains,
        batches: ProofBatches,
        params: RelayParams,
    ) -> Self {
        Self {
            keeper,
            executor,
            hosted,
            batches,
            params,
        }
    }

    /// Returns the application registry.
    pub const fn keeper(&self) -> &K {
        &self.keeper
    }

    /// Returns the proof batches.
    pub const fn batches(&self) -> &ProofBatches {
        &self.batches
    }

    /// Returns the hosted chains.
    pub const fn hosted(&self) -> &HostedChains {
        &self.hosted
    }

    /// Returns the relay parameters.
    pub const fn params(&self) -> &RelayParams {
        &self.params
    }

    /// Serves `relay` in `session` and returns the hosted chain's response.
    #[instrument(skip_all, fields(client = %relay.proof.client, chain = %relay.blockchain))]
    pub async fn serve(
        &self,
        mut relay: Relay,
        session: SessionHeader,
        active_nodes: &[Node],
    ) -> RelayResult<String> {
        let application = self
            .keeper
            .application_by_key(&relay.proof.client)
            .ok_or(RelayError::ApplicationNotFound(relay.proof.client))?;

        if !application.can_be_served() {
            return Err(if application.is_jailed() {
                RelayError::ApplicationJailed(application.address)
            } else {
                RelayError::ApplicationNotStaked(application.address)
            });
        }

        let max_relays = self.params.max_relays(application.tokens().to_u64());
        self.batches
            .precheck(&relay.proof, session.block_id, max_relays)?;

        let ctx = ValidationContext {
            hosted: &self.hosted,
            session: &session,
            active_nodes,
            application: &application,
        };
        let response = self.executor.execute(&mut relay, &ctx).await?;

        let accrued = self
            .batches
            .add_proof(relay.proof, session.block_id, max_relays)
            .inspect_err(|err| warn!(%err, "relay executed but its proof was not accrued"))?;

        info!(%accrued, %max_relays, "relay served");
        Ok(response)
    }
}
