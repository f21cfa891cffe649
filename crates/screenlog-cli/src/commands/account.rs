use crate::commands::prompts;
use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use movie_log_config::{CredentialStore, PathManager};
use movie_log_core::{AccountContext, ProfileCache, Session};
use movie_log_models::ListCollections;
use movie_log_remote::{FirestoreProfileStore, ProfileStore};

pub async fn run_signup(email: Option<String>, output: &Output) -> Result<()> {
    let config = super::load_config()?;
    let path_manager = PathManager::default();
    path_manager
        .ensure_directories()
        .map_err(|e| eyre!("Failed to prepare directories: {}", e))?;

    let mut credentials = CredentialStore::new(path_manager.credentials_file());
    credentials
        .load()
        .map_err(|e| eyre!("Failed to load credentials: {}", e))?;

    let email = match email {
        Some(email) => email,
        None => prompts::prompt_string("Email", None)?,
    };
    let password = prompts::prompt_new_password("Password")?;

    let mut remote = FirestoreProfileStore::new(
        config.firebase.project_id.clone(),
        config.firebase.api_key.clone(),
    );
    let token_info = remote
        .sign_up(&mut credentials, &email, &password)
        .await
        .map_err(|e| eyre!("Signup failed: {}", e))?;

    // A fresh account starts from an empty persisted document
    let collections = ListCollections::default();
    if let Err(e) = remote.save(&token_info.local_id, &collections).await {
        tracing::warn!("Failed to initialize the profile document: {}", e);
    }
    let cache = ProfileCache::new(&path_manager).map_err(|e| eyre!("Failed to open cache: {}", e))?;
    if let Err(e) = cache.save(&token_info.local_id, &collections) {
        tracing::warn!("Failed to write the profile cache: {}", e);
    }

    output.success(format!("Account created, signed in as {}", email));
    Ok(())
}

pub async fn run_login(email: Option<String>, output: &Output) -> Result<()> {
    let config = super::load_config()?;
    let path_manager = PathManager::default();
    path_manager
        .ensure_directories()
        .map_err(|e| eyre!("Failed to prepare directories: {}", e))?;

    let mut credentials = CredentialStore::new(path_manager.credentials_file());
    credentials
        .load()
        .map_err(|e| eyre!("Failed to load credentials: {}", e))?;

    let email = match email {
        Some(email) => email,
        None => prompts::prompt_string("Email", credentials.get_account_email().map(|s| s.as_str()))?,
    };
    let password = prompts::prompt_password("Password")?;

    let mut remote = FirestoreProfileStore::new(
        config.firebase.project_id.clone(),
        config.firebase.api_key.clone(),
    );
    let token_info = remote
        .sign_in(&mut credentials, &email, &password)
        .await
        .map_err(|e| eyre!("Login failed: {}", e))?;

    // Load the account's lists now (initializing an empty document for
    // accounts that have none) so the first list command starts warm.
    let cache = ProfileCache::new(&path_manager).map_err(|e| eyre!("Failed to open cache: {}", e))?;
    let account = AccountContext {
        uid: token_info.local_id.clone(),
        email: email.clone(),
    };
    let session = Session::open(account, Box::new(remote), cache).await;
    let collections = session.store().collections();

    output.success(format!("Signed in as {}", email));
    output.info(format!(
        "{} favorites, {} watched, {} plan-to-watch",
        collections.favorites.len(),
        collections.watched.len(),
        collections.plan_to_watch.len()
    ));
    session.close();
    Ok(())
}

pub async fn run_logout(output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    let mut credentials = CredentialStore::new(path_manager.credentials_file());
    credentials
        .load()
        .map_err(|e| eyre!("Failed to load credentials: {}", e))?;

    if !credentials.is_signed_in() {
        output.info("Not signed in");
        return Ok(());
    }

    credentials.clear_session();
    credentials
        .save()
        .map_err(|e| eyre!("Failed to update credentials: {}", e))?;

    // In-memory and token state are gone; the account document stays authoritative
    output.success("Signed out. Your lists remain in your account.");
    Ok(())
}
