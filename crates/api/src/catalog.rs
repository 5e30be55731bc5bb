use crate::error::CatalogResult;
use crate::models::ResourceRecord;
use async_trait::async_trait;

/// Read interface onto the store that owns resource metadata.
///
/// Implementations may be remote or slow; callers bound calls with a timeout.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// The entry at `index` in the namespace's current ordering, or `None` when
    /// the namespace has fewer entries.
    async fn entry_at(&self, namespace: &str, index: usize)
    -> CatalogResult<Option<ResourceRecord>>;

    /// All entries of the namespace, layers first, in current order.
    async fn entries(&self, namespace: &str) -> CatalogResult<Vec<ResourceRecord>>;
}
