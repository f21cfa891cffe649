use serde::{Deserialize, Serialize};
use std::fmt;

use crate::movie::{MovieSummary, WatchedMovie};

/// The three per-account membership lists.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ListKind {
    Favorites,
    Watched,
    PlanToWatch,
}

impl ListKind {
    pub const ALL: [ListKind; 3] = [ListKind::Favorites, ListKind::Watched, ListKind::PlanToWatch];

    /// Field name in the persisted profile document.
    pub fn field_name(&self) -> &'static str {
        match self {
            ListKind::Favorites => "favorites",
            ListKind::Watched => "watched",
            ListKind::PlanToWatch => "planToWatch",
        }
    }
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ListKind::Favorites => "favorites",
            ListKind::Watched => "watched",
            ListKind::PlanToWatch => "plan-to-watch",
        };
        write!(f, "{}", label)
    }
}

/// The full persisted state of one account: three independent lists, each
/// keyed by `imdb_id` (membership, not multiplicity). A title may appear in
/// any subset of them simultaneously.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ListCollections {
    #[serde(default)]
    pub favorites: Vec<MovieSummary>,
    #[serde(default)]
    pub watched: Vec<WatchedMovie>,
    #[serde(default)]
    pub plan_to_watch: Vec<WatchedMovie>,
}

impl ListCollections {
    pub fn is_empty(&self) -> bool {
        self.favorites.is_empty() && self.watched.is_empty() && self.plan_to_watch.is_empty()
    }

    pub fn len(&self, kind: ListKind) -> usize {
        match kind {
            ListKind::Favorites => self.favorites.len(),
            ListKind::Watched => self.watched.len(),
            ListKind::PlanToWatch => self.plan_to_watch.len(),
        }
    }
}
