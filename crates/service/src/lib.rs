//! # Relay Service
//!
//! The per-request pipeline that turns an inbound relay into served work:
//!
//! 1. the [`RelayValidator`](validator::RelayValidator) admits or rejects the relay in a fixed
//!    order of checks,
//! 2. the [`RelayExecutor`](executor::RelayExecutor) forwards it to the hosted blockchain,
//! 3. the proof of the served relay is accrued in the capped
//!    [`ProofBatches`](batch::ProofBatches) of its session.
//!
//! [`RelayService`](service::RelayService) ties the three together with the application registry.

pub mod batch;
pub mod errors;
pub mod executor;
pub mod hosted;
pub mod service;
pub mod session;
pub mod transport;
pub mod validator;

pub mod prelude;

#[cfg(test)]
mod test_transport;
