//! Re-exports of the parameter types.

pub use crate::{apps::AppParams, errors::ParamsError, relay::RelayParams};
