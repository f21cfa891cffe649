use anyhow::{anyhow, Result};
use movie_log_config::PathManager;
use movie_log_models::ListCollections;
use std::path::PathBuf;
use tracing::{debug, warn};

/// On-disk copy of the persisted profile document, one JSON file per
/// account. Serves as the offline fallback when the remote load fails and
/// as the write-through target on every mutation.
#[derive(Clone)]
pub struct ProfileCache {
    dir: PathBuf,
}

impl ProfileCache {
    pub fn new(path_manager: &PathManager) -> Result<Self> {
        Self::at(path_manager.profile_cache_dir())
    }

    pub fn at(dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn profile_path(&self, account_id: &str) -> PathBuf {
        self.dir.join(format!("{}.json", account_id))
    }

    pub fn load(&self, account_id: &str) -> Result<Option<ListCollections>> {
        let path = self.profile_path(account_id);
        if !path.exists() {
            debug!("Profile cache miss for account {}", account_id);
            return Ok(None);
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<ListCollections>(&content) {
                Ok(collections) => {
                    debug!("Profile cache hit for account {}", account_id);
                    Ok(Some(collections))
                }
                Err(e) => {
                    warn!(
                        "Profile cache corruption for account {}: {}. Deleting corrupted file.",
                        account_id, e
                    );
                    if let Err(rm_err) = std::fs::remove_file(&path) {
                        warn!("Failed to delete corrupted cache file: {}", rm_err);
                    }
                    Ok(None)
                }
            },
            Err(e) => {
                warn!("Failed to read profile cache for account {}: {}", account_id, e);
                Ok(None)
            }
        }
    }

    pub fn save(&self, account_id: &str, collections: &ListCollections) -> Result<()> {
        let path = self.profile_path(account_id);
        let json = serde_json::to_string_pretty(collections)
            .map_err(|e| anyhow!("Failed to serialize profile cache: {}", e))?;
        std::fs::write(&path, json)
            .map_err(|e| anyhow!("Failed to write profile cache: {}", e))?;
        debug!("Profile cache saved for account {}", account_id);
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        if self.dir.exists() {
            std::fs::remove_dir_all(&self.dir)?;
            std::fs::create_dir_all(&self.dir)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use movie_log_models::MovieSummary;
    use tempfile::TempDir;

    fn sample_collections() -> ListCollections {
        ListCollections {
            favorites: vec![MovieSummary {
                imdb_id: "tt0111161".to_string(),
                title: "The Shawshank Redemption".to_string(),
                year: "1994".to_string(),
                poster_url: String::new(),
            }],
            watched: Vec::new(),
            plan_to_watch: Vec::new(),
        }
    }

    #[test]
    fn test_cache_roundtrip() {
        let dir = TempDir::new().unwrap();
        let cache = ProfileCache::at(dir.path().join("profiles")).unwrap();

        cache.save("uid-1", &sample_collections()).unwrap();
        let loaded = cache.load("uid-1").unwrap().unwrap();
        assert_eq!(loaded, sample_collections());
    }

    #[test]
    fn test_missing_cache_is_none() {
        let dir = TempDir::new().unwrap();
        let cache = ProfileCache::at(dir.path().join("profiles")).unwrap();
        assert!(cache.load("uid-1").unwrap().is_none());
    }

    #[test]
    fn test_corrupted_cache_is_deleted() {
        let dir = TempDir::new().unwrap();
        let cache = ProfileCache::at(dir.path().join("profiles")).unwrap();

        let path = dir.path().join("profiles").join("uid-1.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(cache.load("uid-1").unwrap().is_none());
        assert!(!path.exists());
    }

    #[test]
    fn test_cache_is_per_account() {
        let dir = TempDir::new().unwrap();
        let cache = ProfileCache::at(dir.path().join("profiles")).unwrap();

        cache.save("uid-1", &sample_collections()).unwrap();
        assert!(cache.load("uid-2").unwrap().is_none());
    }
}
