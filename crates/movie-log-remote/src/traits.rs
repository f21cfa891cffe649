use async_trait::async_trait;
use movie_log_models::{ListCollections, MovieSummary, WatchedMovie};

use crate::error::RemoteError;

/// The external movie metadata provider (search + per-title detail lookup).
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Free-text search. No matches is an empty list, not an error.
    async fn search(&self, query: &str) -> Result<Vec<MovieSummary>, RemoteError>;

    /// Full detail record for one title. `None` when the catalog does not
    /// know the id; callers render nothing rather than failing.
    async fn details(&self, imdb_id: &str) -> Result<Option<WatchedMovie>, RemoteError>;

    /// Hydrate several titles concurrently. Ids the catalog does not know
    /// (or that fail to fetch) are dropped from the result.
    async fn lookup_many(&self, imdb_ids: &[String]) -> Result<Vec<WatchedMovie>, RemoteError>;
}

/// Per-account persistence of the three lists in the cloud document store.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Load the profile document. `None` means no record exists yet; the
    /// caller is expected to initialize and persist empty collections.
    async fn load(&self, account_id: &str) -> Result<Option<ListCollections>, RemoteError>;

    /// Overwrite the three list fields as a unit. Unrelated fields on the
    /// account document must be left untouched.
    async fn save(
        &self,
        account_id: &str,
        collections: &ListCollections,
    ) -> Result<(), RemoteError>;
}
