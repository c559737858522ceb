//! # Application Staking
//!
//! Applications stake tokens to earn the right to have relays served on their behalf. This crate
//! holds the application registry ([`AppKeeper`]) and the message handler that drives the staking
//! lifecycle:
//!
//! ```text
//! Unstaked ──stake──▶ Staked ──begin unstake──▶ Unstaking ──period elapsed──▶ (removed)
//!                      │  ▲
//!                 jail │  │ unjail
//!                      ▼  │
//!                     Jailed
//! ```
//!
//! Staking messages are serialized by the enclosing transaction pipeline. The registry guards its
//! state so that relay-serving tasks reading it concurrently never observe a half-applied stake.

pub mod errors;
pub mod events;
pub mod handler;
pub mod inmemory;
pub mod keeper;
pub mod msgs;

pub use errors::{AppError, AppResult};
pub use handler::{AppMsgHandler, MsgCtx};
pub use inmemory::InMemoryAppKeeper;
pub use keeper::AppKeeper;
pub use msgs::AppMsg;
