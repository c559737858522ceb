//! Execution of admitted relays against the hosted blockchains.

use std::time::Duration;

use relay_primitives::prelude::{Payload, PayloadKind, Relay};
use tracing::{debug, instrument};

use crate::{
    errors::{RelayError, RelayResult},
    transport::{HttpTransport, TransportError},
    validator::{RelayValidator, ValidationContext},
};

/// Forwards relays to the endpoint of their hosted blockchain.
///
/// The executor never touches the application registry or the proof batches. Accruing the proof of
/// an executed relay is up to the caller.
#[derive(Debug)]
pub struct RelayExecutor<T> {
    validator: RelayValidator,
    transport: T,
    timeout: Duration,
}

impl<T: HttpTransport> RelayExecutor<T> {
    /// Creates an executor that gives up on the hosted chain after `timeout`.
    pub const fn new(validator: RelayValidator, transport: T, timeout: Duration) -> Self {
        Self {
            validator,
            transport,
            timeout,
        }
    }

    /// Returns the validator relays are checked with.
    pub const fn validator(&self) -> &RelayValidator {
        &self.validator
    }

    /// Returns the transport relays are forwarded with.
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Validates `relay` and forwards it to its hosted chain, returning the raw response.
    #[instrument(skip_all, fields(chain = %relay.blockchain, index = relay.proof.index))]
    pub async fn execute(
        &self,
        relay: &mut Relay,
        ctx: &ValidationContext<'_>,
    ) -> RelayResult<String> {
        self.validator.validate(relay, ctx)?;

        match &relay.payload {
            Payload::Http { data, method, path } => {
                let base = ctx.hosted.url_for(&relay.blockchain)?;
                let url = join_path(base, path.as_deref());
                let method = method
                    .as_deref()
                    .unwrap_or_else(|| self.validator.default_http_method());

                let response =
                    tokio::time::timeout(self.timeout, self.transport.execute(data, &url, method))
                        .await
                        .map_err(|_| TransportError::Timeout(self.timeout))??;

                debug!(len = response.len(), "relay executed");
                Ok(response)
            }
            Payload::WebSocket { .. } => Err(RelayError::UnsupportedPayloadType(
                PayloadKind::WebSocket,
            )),
        }
    }
}

fn join_path(base: &str, path: Option<&str>) -> String {
    match path.map(|p| p.trim_start_matches('/')) {
        Some(path) if !path.is_empty() => format!("{}/{path}", base.trim_end_matches('/')),
        _ => base.to_string(),
    }
}
