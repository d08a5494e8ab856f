use crate::{DataError, Tag};
use async_trait::async_trait;

/// Data-source contract shared by the remote API and the local store
///
/// Implementations are provided in the infrastructure layer. Every
/// operation resolves exactly once: one `Ok` or one `Err`, never neither.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TagStore: Send + Sync {
    /// Fetch the complete tag collection.
    ///
    /// An empty collection is a valid success, not an error; interpreting
    /// "no data" is the caller's policy.
    async fn get_tags(&self) -> Result<Vec<Tag>, DataError>;

    /// Persist the full collection. Pre-existing ids are left untouched
    /// (ignore-on-conflict). Read-only sources implement this as a no-op.
    async fn save_tags(&self, tags: &[Tag]) -> Result<(), DataError>;

    /// Release the source's underlying resources. Idempotent; reads and
    /// writes after shutdown are undefined.
    async fn shutdown(&self);
}
