//! Seam between the search pipeline and a remote scene catalog.
use crate::error::CatalogError;
use crate::query::CatalogQuery;
use crate::scene::SceneRecord;

pub trait CatalogOps {
    /// Runs one search request. A single attempt; failures are not retried.
    async fn search(self: &Self, query: &CatalogQuery) -> Result<Vec<SceneRecord>, CatalogError>;
}
