// Membership bookkeeping for the three per-account lists

use movie_log_models::{ListCollections, ListKind, MovieSummary, WatchedMovie};
use std::collections::HashSet;

/// Id-based identity shared by both record shapes.
pub trait MovieId {
    fn movie_id(&self) -> &str;
}

impl MovieId for MovieSummary {
    fn movie_id(&self) -> &str {
        &self.imdb_id
    }
}

impl MovieId for WatchedMovie {
    fn movie_id(&self) -> &str {
        &self.imdb_id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
    /// Malformed input (empty id); the collections are unchanged.
    Rejected,
}

/// Holds the three collections and the only invariant-bearing operations on
/// them. Pure state transformation; no network access. Lookups are by id
/// (O(collection size)), never by object identity.
#[derive(Debug, Clone, Default)]
pub struct ListStore {
    collections: ListCollections,
}

impl ListStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopt persisted collections. Entries with duplicate or empty ids are
    /// dropped (first occurrence wins) so the membership invariant holds
    /// even over a damaged document.
    pub fn from_collections(collections: ListCollections) -> Self {
        Self {
            collections: ListCollections {
                favorites: dedupe_by_id(collections.favorites),
                watched: dedupe_by_id(collections.watched),
                plan_to_watch: dedupe_by_id(collections.plan_to_watch),
            },
        }
    }

    pub fn collections(&self) -> &ListCollections {
        &self.collections
    }

    pub fn into_collections(self) -> ListCollections {
        self.collections
    }

    pub fn contains(&self, kind: ListKind, imdb_id: &str) -> bool {
        match kind {
            ListKind::Favorites => self.collections.favorites.iter().any(|m| m.imdb_id == imdb_id),
            ListKind::Watched => self.collections.watched.iter().any(|m| m.imdb_id == imdb_id),
            ListKind::PlanToWatch => self
                .collections
                .plan_to_watch
                .iter()
                .any(|m| m.imdb_id == imdb_id),
        }
    }

    pub fn watched_entry(&self, imdb_id: &str) -> Option<&WatchedMovie> {
        self.collections.watched.iter().find(|m| m.imdb_id == imdb_id)
    }

    /// Remove the movie from the named list if an entry with the same id is
    /// present, append it otherwise. Toggling twice with the same movie
    /// returns the list to its original membership.
    pub fn toggle(&mut self, kind: ListKind, movie: WatchedMovie) -> ToggleOutcome {
        if movie.imdb_id.is_empty() {
            return ToggleOutcome::Rejected;
        }
        match kind {
            ListKind::Favorites => toggle_membership(&mut self.collections.favorites, movie.summary()),
            ListKind::Watched => toggle_membership(&mut self.collections.watched, movie),
            ListKind::PlanToWatch => toggle_membership(&mut self.collections.plan_to_watch, movie),
        }
    }

    /// Unconditional removal; absent ids are a no-op, not an error.
    /// Returns whether anything was removed.
    pub fn remove(&mut self, kind: ListKind, imdb_id: &str) -> bool {
        match kind {
            ListKind::Favorites => remove_by_id(&mut self.collections.favorites, imdb_id),
            ListKind::Watched => remove_by_id(&mut self.collections.watched, imdb_id),
            ListKind::PlanToWatch => remove_by_id(&mut self.collections.plan_to_watch, imdb_id),
        }
    }

    /// Update the user rating on a watched entry. Out-of-range ratings
    /// (valid range 1-10) and ids not in the watched list are silent no-ops;
    /// returns whether a mutation happened.
    pub fn set_user_rating(&mut self, imdb_id: &str, rating: u8) -> bool {
        if !(1..=10).contains(&rating) {
            return false;
        }
        match self
            .collections
            .watched
            .iter_mut()
            .find(|m| m.imdb_id == imdb_id)
        {
            Some(movie) => {
                movie.user_rating = Some(rating);
                true
            }
            None => false,
        }
    }
}

fn toggle_membership<T: MovieId>(items: &mut Vec<T>, item: T) -> ToggleOutcome {
    if items.iter().any(|existing| existing.movie_id() == item.movie_id()) {
        let id = item.movie_id().to_string();
        items.retain(|existing| existing.movie_id() != id);
        ToggleOutcome::Removed
    } else {
        items.push(item);
        ToggleOutcome::Added
    }
}

fn remove_by_id<T: MovieId>(items: &mut Vec<T>, imdb_id: &str) -> bool {
    let before = items.len();
    items.retain(|existing| existing.movie_id() != imdb_id);
    items.len() != before
}

fn dedupe_by_id<T: MovieId>(items: Vec<T>) -> Vec<T> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| !item.movie_id().is_empty() && seen.insert(item.movie_id().to_string()))
        .collect()
}
