//! This crate contains the consensus-critical parameters that dictate how applications stake and
//! how much relay work a node may accrue per session, so that every node agrees on admission and
//! capping decisions.

pub mod apps;
mod default;
pub mod errors;
pub mod prelude;
pub mod relay;
