use movie_log_models::{ListKind, WatchedMovie};
use movie_log_remote::ProfileStore;
use tracing::{info, warn};

use crate::profile_cache::ProfileCache;
use crate::store::{ListStore, ToggleOutcome};

/// Identity of the signed-in account for the lifetime of a session.
#[derive(Debug, Clone)]
pub struct AccountContext {
    pub uid: String,
    pub email: String,
}

/// Explicit per-account context object: owns the in-memory collections
/// between open and teardown, and mirrors every mutation to the profile
/// store. Mutations are serialized through `&mut self`, so the most recent
/// completed write to the persisted document always wins and no update is
/// lost within a session.
pub struct Session {
    account: AccountContext,
    store: ListStore,
    remote: Box<dyn ProfileStore>,
    cache: ProfileCache,
}

impl Session {
    /// Load the account's collections. A missing remote record initializes
    /// (and persists) empty collections; a remote failure degrades to the
    /// cached copy, or empty collections, so the caller keeps working.
    pub async fn open(
        account: AccountContext,
        remote: Box<dyn ProfileStore>,
        cache: ProfileCache,
    ) -> Self {
        let store = match remote.load(&account.uid).await {
            Ok(Some(collections)) => {
                info!(account = %account.uid, "Loaded profile document");
                if let Err(e) = cache.save(&account.uid, &collections) {
                    warn!("Failed to update profile cache: {}", e);
                }
                ListStore::from_collections(collections)
            }
            Ok(None) => {
                info!(account = %account.uid, "No profile document yet, initializing empty collections");
                let store = ListStore::new();
                if let Err(e) = remote.save(&account.uid, store.collections()).await {
                    warn!("Failed to initialize remote profile: {}", e);
                }
                if let Err(e) = cache.save(&account.uid, store.collections()) {
                    warn!("Failed to update profile cache: {}", e);
                }
                store
            }
            Err(e) => {
                warn!("Profile load failed, falling back to cached copy: {}", e);
                match cache.load(&account.uid) {
                    Ok(Some(collections)) => ListStore::from_collections(collections),
                    _ => ListStore::new(),
                }
            }
        };

        Self {
            account,
            store,
            remote,
            cache,
        }
    }

    pub fn account(&self) -> &AccountContext {
        &self.account
    }

    pub fn store(&self) -> &ListStore {
        &self.store
    }

    pub async fn toggle(&mut self, kind: ListKind, movie: WatchedMovie) -> ToggleOutcome {
        let outcome = self.store.toggle(kind, movie);
        if outcome != ToggleOutcome::Rejected {
            self.persist().await;
        }
        outcome
    }

    pub async fn remove(&mut self, kind: ListKind, imdb_id: &str) -> bool {
        let removed = self.store.remove(kind, imdb_id);
        if removed {
            self.persist().await;
        }
        removed
    }

    pub async fn rate(&mut self, imdb_id: &str, rating: u8) -> bool {
        let changed = self.store.set_user_rating(imdb_id, rating);
        if changed {
            self.persist().await;
        }
        changed
    }

    /// Write-through after each mutation: local cache, then the remote
    /// document. The full three-collection document is overwritten every
    /// time (last write wins). A remote failure is not fatal — the worst
    /// outcome is a stale remote copy until the next successful save.
    async fn persist(&mut self) {
        let collections = self.store.collections();
        if let Err(e) = self.cache.save(&self.account.uid, collections) {
            warn!("Failed to write profile cache: {}", e);
        }
        if let Err(e) = self.remote.save(&self.account.uid, collections).await {
            warn!("Profile save failed, local copy retained until next sync: {}", e);
        }
    }

    /// Teardown. In-memory state is dropped; the persisted copy remains
    /// authoritative.
    pub fn close(self) {
        info!(account = %self.account.uid, "Session closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use movie_log_models::ListCollections;
    use movie_log_remote::RemoteError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    #[derive(Clone, Default)]
    struct FakeProfileStore {
        doc: Arc<Mutex<Option<ListCollections>>>,
        saves: Arc<AtomicUsize>,
        fail_load: bool,
        fail_save: bool,
    }

    #[async_trait]
    impl ProfileStore for FakeProfileStore {
        async fn load(&self, _account_id: &str) -> Result<Option<ListCollections>, RemoteError> {
            if self.fail_load {
                return Err(RemoteError::Auth("simulated outage".to_string()));
            }
            Ok(self.doc.lock().unwrap().clone())
        }

        async fn save(
            &self,
            _account_id: &str,
            collections: &ListCollections,
        ) -> Result<(), RemoteError> {
            if self.fail_save {
                return Err(RemoteError::Auth("simulated outage".to_string()));
            }
            *self.doc.lock().unwrap() = Some(collections.clone());
            self.saves.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn account() -> AccountContext {
        AccountContext {
            uid: "uid-1".to_string(),
            email: "user@example.com".to_string(),
        }
    }

    fn movie(imdb_id: &str) -> WatchedMovie {
        WatchedMovie {
            imdb_id: imdb_id.to_string(),
            title: "Test".to_string(),
            year: "2000".to_string(),
            poster_url: String::new(),
            runtime_minutes: 100,
            catalog_rating: None,
            user_rating: None,
            plot: String::new(),
        }
    }

    fn cache(dir: &TempDir) -> ProfileCache {
        ProfileCache::at(dir.path().join("profiles")).unwrap()
    }

    #[tokio::test]
    async fn test_open_initializes_missing_record() {
        let dir = TempDir::new().unwrap();
        let remote = FakeProfileStore::default();

        let session = Session::open(account(), Box::new(remote.clone()), cache(&dir)).await;

        assert!(session.store().collections().is_empty());
        // the empty document was persisted so the record now exists
        assert!(remote.doc.lock().unwrap().is_some());
    }

    #[tokio::test]
    async fn test_open_loads_existing_record() {
        let dir = TempDir::new().unwrap();
        let remote = FakeProfileStore::default();
        let mut existing = ListCollections::default();
        existing.watched.push(movie("tt001"));
        *remote.doc.lock().unwrap() = Some(existing);

        let session = Session::open(account(), Box::new(remote), cache(&dir)).await;
        assert!(session.store().contains(ListKind::Watched, "tt001"));
    }

    #[tokio::test]
    async fn test_open_falls_back_to_cache_on_remote_failure() {
        let dir = TempDir::new().unwrap();
        let profile_cache = cache(&dir);
        let mut cached = ListCollections::default();
        cached.favorites.push(movie("tt002").summary());
        profile_cache.save("uid-1", &cached).unwrap();

        let remote = FakeProfileStore {
            fail_load: true,
            ..Default::default()
        };

        let session = Session::open(account(), Box::new(remote), profile_cache).await;
        assert!(session.store().contains(ListKind::Favorites, "tt002"));
    }

    #[tokio::test]
    async fn test_mutations_write_through() {
        let dir = TempDir::new().unwrap();
        let remote = FakeProfileStore::default();
        let profile_cache = cache(&dir);

        let mut session =
            Session::open(account(), Box::new(remote.clone()), profile_cache.clone()).await;
        let saves_after_open = remote.saves.load(Ordering::SeqCst);

        let outcome = session.toggle(ListKind::Watched, movie("tt001")).await;
        assert_eq!(outcome, ToggleOutcome::Added);

        // remote document and local cache both carry the mutation
        let doc = remote.doc.lock().unwrap().clone().unwrap();
        assert_eq!(doc.watched.len(), 1);
        let cached = profile_cache.load("uid-1").unwrap().unwrap();
        assert_eq!(cached.watched.len(), 1);
        assert_eq!(remote.saves.load(Ordering::SeqCst), saves_after_open + 1);
    }

    #[tokio::test]
    async fn test_rejected_mutations_do_not_persist() {
        let dir = TempDir::new().unwrap();
        let remote = FakeProfileStore::default();

        let mut session = Session::open(account(), Box::new(remote.clone()), cache(&dir)).await;
        let saves_after_open = remote.saves.load(Ordering::SeqCst);

        assert_eq!(
            session.toggle(ListKind::Watched, movie("")).await,
            ToggleOutcome::Rejected
        );
        assert!(!session.remove(ListKind::Watched, "tt999").await);
        assert!(!session.rate("tt999", 8).await);

        assert_eq!(remote.saves.load(Ordering::SeqCst), saves_after_open);
    }

    #[tokio::test]
    async fn test_remote_save_failure_keeps_local_state() {
        let dir = TempDir::new().unwrap();
        let profile_cache = cache(&dir);
        let remote = FakeProfileStore {
            fail_save: true,
            ..Default::default()
        };

        let mut session =
            Session::open(account(), Box::new(remote), profile_cache.clone()).await;
        session.toggle(ListKind::Watched, movie("tt001")).await;

        // mutation survives in memory and in the local cache
        assert!(session.store().contains(ListKind::Watched, "tt001"));
        let cached = profile_cache.load("uid-1").unwrap().unwrap();
        assert_eq!(cached.watched.len(), 1);
    }

    #[tokio::test]
    async fn test_rate_persists_rating() {
        let dir = TempDir::new().unwrap();
        let remote = FakeProfileStore::default();

        let mut session = Session::open(account(), Box::new(remote.clone()), cache(&dir)).await;
        session.toggle(ListKind::Watched, movie("tt001")).await;
        assert!(session.rate("tt001", 9).await);

        let doc = remote.doc.lock().unwrap().clone().unwrap();
        assert_eq!(doc.watched[0].user_rating, Some(9));
    }
}
