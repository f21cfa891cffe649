use async_trait::async_trait;
use futures::future::join_all;
use movie_log_models::{MovieSummary, WatchedMovie};
use reqwest::Client;
use std::sync::Arc;
use tracing::warn;

use crate::error::RemoteError;
use crate::omdb::api;
use crate::traits::Catalog;

/// Create a reqwest Client for OMDb requests
pub fn create_omdb_client() -> Client {
    Client::builder()
        .user_agent(concat!("screenlog/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|_| Client::new())
}

#[derive(Clone)]
pub struct OmdbClient {
    client: Arc<Client>,
    api_key: String,
}

impl OmdbClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Arc::new(create_omdb_client()),
            api_key,
        }
    }
}

#[async_trait]
impl Catalog for OmdbClient {
    async fn search(&self, query: &str) -> Result<Vec<MovieSummary>, RemoteError> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }
        api::search(&self.client, &self.api_key, query).await
    }

    async fn details(&self, imdb_id: &str) -> Result<Option<WatchedMovie>, RemoteError> {
        api::title_by_id(&self.client, &self.api_key, imdb_id).await
    }

    async fn lookup_many(&self, imdb_ids: &[String]) -> Result<Vec<WatchedMovie>, RemoteError> {
        let lookups = imdb_ids
            .iter()
            .map(|id| api::title_by_id(&self.client, &self.api_key, id));

        let mut movies = Vec::with_capacity(imdb_ids.len());
        for (id, result) in imdb_ids.iter().zip(join_all(lookups).await) {
            match result {
                Ok(Some(movie)) => movies.push(movie),
                Ok(None) => warn!("Catalog does not know title {}", id),
                Err(e) => warn!("Failed to fetch title {}: {}", id, e),
            }
        }
        Ok(movies)
    }
}
