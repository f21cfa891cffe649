pub mod account;
pub mod clear;
pub mod config;
pub mod lists;
pub mod prompts;
pub mod search;

use color_eyre::eyre::eyre;
use color_eyre::Result;
use movie_log_config::{Config, CredentialStore, PathManager};
use movie_log_core::{AccountContext, ProfileCache, Session};
use movie_log_remote::{FirestoreProfileStore, OmdbClient};

/// Load and validate config.toml, with a setup hint when missing or broken.
pub(crate) fn load_config() -> Result<Config> {
    let path_manager = PathManager::default();
    let config_file = path_manager.config_file();
    if !config_file.exists() {
        return Err(eyre!(
            "No configuration found at {}. Run `screenlog config` first.",
            config_file.display()
        ));
    }
    let config = Config::load_from_file(&config_file)
        .map_err(|e| eyre!("Failed to load configuration: {}", e))?;
    config
        .validate()
        .map_err(|e| eyre!("Configuration invalid: {}. Run `screenlog config` to fix it.", e))?;
    Ok(config)
}

pub(crate) fn catalog_client(config: &Config) -> OmdbClient {
    OmdbClient::new(config.omdb.api_key.clone())
}

/// Open a session for the signed-in account: refresh the stored token if
/// needed, then load the profile (remote, falling back to the local cache).
pub(crate) async fn open_session(config: &Config) -> Result<Session> {
    let path_manager = PathManager::default();
    let mut credentials = CredentialStore::new(path_manager.credentials_file());
    credentials
        .load()
        .map_err(|e| eyre!("Failed to load credentials: {}", e))?;

    if !credentials.is_signed_in() {
        return Err(eyre!("Not signed in. Run `screenlog login` first."));
    }
    let uid = credentials.get_account_uid().cloned().unwrap_or_default();
    let email = credentials.get_account_email().cloned().unwrap_or_default();

    let mut remote = FirestoreProfileStore::new(
        config.firebase.project_id.clone(),
        config.firebase.api_key.clone(),
    );
    remote
        .authenticate(&mut credentials)
        .await
        .map_err(|e| eyre!("Session expired or invalid ({}). Run `screenlog login` again.", e))?;

    let cache =
        ProfileCache::new(&path_manager).map_err(|e| eyre!("Failed to open profile cache: {}", e))?;

    Ok(Session::open(AccountContext { uid, email }, Box::new(remote), cache).await)
}

/// Like `open_session`, but a missing or broken session is `None` rather
/// than an error — search and browse work signed-out, the membership
/// markers just disappear.
pub(crate) async fn try_open_session(config: &Config) -> Option<Session> {
    let path_manager = PathManager::default();
    let mut credentials = CredentialStore::new(path_manager.credentials_file());
    if credentials.load().is_err() || !credentials.is_signed_in() {
        return None;
    }
    match open_session(config).await {
        Ok(session) => Some(session),
        Err(e) => {
            tracing::warn!("Continuing without a session: {}", e);
            None
        }
    }
}
