//! Re-exports of the relay service types.

pub use crate::{
    batch::{BatchError, BatchResult, BatchSummary, ProofBatches, RelayBatch, SessionKey},
    errors::{RelayError, RelayResult},
    executor::RelayExecutor,
    hosted::{HostedChain, HostedChains},
    service::RelayService,
    session::{ActiveSetOracle, SessionError, SessionOracle},
    transport::{HttpTransport, ReqwestTransport, TransportError},
    validator::{RelayValidator, ValidationContext, ValidationStage},
};
