pub(crate) const DEFAULT_THREAD_COUNT: u8 = 4;

/// Used when the config does not set a timeout for requests to hosted chains.
pub(crate) const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;
