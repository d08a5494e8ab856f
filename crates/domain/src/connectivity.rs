use async_trait::async_trait;

/// Network-availability predicate used to pick the first-attempt source.
///
/// The answer can change between calls, so callers must re-query it on
/// every routing decision rather than caching the result.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConnectivityProbe: Send + Sync {
    /// True iff the network is reachable right now.
    async fn is_connected(&self) -> bool;
}
