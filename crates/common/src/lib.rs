//! Reusable utilities shared by the relay node binary and its services, such as initializing the
//! tracing framework.

pub mod logging;

// Re-export tracing crate for convenience.
pub use tracing;
