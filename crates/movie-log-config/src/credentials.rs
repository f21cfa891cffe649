use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use toml;

#[derive(Debug, Serialize, Deserialize, Default)]
struct CredentialsData {
    #[serde(flatten)]
    data: HashMap<String, String>,
}

pub struct CredentialStore {
    path: PathBuf,
    credentials: HashMap<String, String>,
}

impl CredentialStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            credentials: HashMap::new(),
        }
    }

    pub fn load(&mut self) -> Result<()> {
        if self.path.exists() {
            let content = std::fs::read_to_string(&self.path)?;
            let creds_data: CredentialsData = toml::from_str(&content)?;
            self.credentials = creds_data.data;
        }
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let creds_data = CredentialsData {
            data: self.credentials.clone(),
        };
        let content = toml::to_string_pretty(&creds_data)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&String> {
        self.credentials.get(key)
    }

    pub fn set(&mut self, key: String, value: String) {
        self.credentials.insert(key, value);
    }

    pub fn remove(&mut self, key: &str) {
        self.credentials.remove(key);
    }

    // Convenience methods for the signed-in account
    pub fn get_account_uid(&self) -> Option<&String> {
        self.get("account_uid")
    }

    pub fn set_account_uid(&mut self, uid: String) {
        self.set("account_uid".to_string(), uid);
    }

    pub fn get_account_email(&self) -> Option<&String> {
        self.get("account_email")
    }

    pub fn set_account_email(&mut self, email: String) {
        self.set("account_email".to_string(), email);
    }

    pub fn get_id_token(&self) -> Option<&String> {
        self.get("firebase_id_token")
    }

    pub fn set_id_token(&mut self, token: String) {
        self.set("firebase_id_token".to_string(), token);
    }

    pub fn get_refresh_token(&self) -> Option<&String> {
        self.get("firebase_refresh_token")
    }

    pub fn set_refresh_token(&mut self, token: String) {
        self.set("firebase_refresh_token".to_string(), token);
    }

    pub fn get_token_expires(&self) -> Option<DateTime<Utc>> {
        self.get("firebase_token_expires")
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }

    pub fn set_token_expires(&mut self, expires: DateTime<Utc>) {
        self.set("firebase_token_expires".to_string(), expires.to_rfc3339());
    }

    /// Drop everything tied to the signed-in account (logout).
    pub fn clear_session(&mut self) {
        self.remove("account_uid");
        self.remove("account_email");
        self.remove("firebase_id_token");
        self.remove("firebase_refresh_token");
        self.remove("firebase_token_expires");
    }

    pub fn is_signed_in(&self) -> bool {
        self.get_account_uid().is_some() && self.get_refresh_token().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_credentials_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("credentials.toml");

        let mut store = CredentialStore::new(path.clone());
        store.set_account_uid("uid-1".to_string());
        store.set_account_email("user@example.com".to_string());
        store.set_id_token("id-token".to_string());
        store.set_refresh_token("refresh-token".to_string());
        let expires = Utc::now();
        store.set_token_expires(expires);
        store.save().unwrap();

        let mut loaded = CredentialStore::new(path);
        loaded.load().unwrap();
        assert_eq!(loaded.get_account_uid().unwrap(), "uid-1");
        assert_eq!(loaded.get_account_email().unwrap(), "user@example.com");
        assert!(loaded.is_signed_in());
        // RFC 3339 round trip keeps sub-second precision
        assert_eq!(loaded.get_token_expires().unwrap(), expires);
    }

    #[test]
    fn test_clear_session() {
        let dir = TempDir::new().unwrap();
        let mut store = CredentialStore::new(dir.path().join("credentials.toml"));
        store.set_account_uid("uid-1".to_string());
        store.set_refresh_token("refresh".to_string());
        assert!(store.is_signed_in());

        store.clear_session();
        assert!(!store.is_signed_in());
        assert!(store.get_account_uid().is_none());
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let mut store = CredentialStore::new(dir.path().join("nope.toml"));
        store.load().unwrap();
        assert!(!store.is_signed_in());
    }
}
