use serde::{Deserialize, Serialize};

/// A title as returned by catalog search. Immutable once fetched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MovieSummary {
    pub imdb_id: String,
    pub title: String,
    pub year: String, // Kept as a string: catalog years can be ranges like "2010–2013"
    #[serde(default)]
    pub poster_url: String,
}

/// A title with the detail fields needed by the watched and plan-to-watch
/// lists. `user_rating` is the only field that changes after creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WatchedMovie {
    pub imdb_id: String,
    pub title: String,
    pub year: String,
    #[serde(default)]
    pub poster_url: String,
    #[serde(default)]
    pub runtime_minutes: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_rating: Option<f64>, // 0-10 scale, absent when the catalog has none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_rating: Option<u8>, // 1-10, unset until the user rates
    #[serde(default)]
    pub plot: String,
}

impl WatchedMovie {
    /// Project the summary fields, e.g. for the favorites list.
    pub fn summary(&self) -> MovieSummary {
        MovieSummary {
            imdb_id: self.imdb_id.clone(),
            title: self.title.clone(),
            year: self.year.clone(),
            poster_url: self.poster_url.clone(),
        }
    }
}
