use async_trait::async_trait;
use chrono::{Duration, Utc};
use movie_log_config::CredentialStore;
use movie_log_models::ListCollections;
use reqwest::Client;
use std::sync::Arc;
use tracing::info;

use crate::error::RemoteError;
use crate::firestore::auth::{self, TokenInfo};
use crate::firestore::{api, value};
use crate::traits::ProfileStore;

/// Create a reqwest Client for Firebase requests
pub fn create_firebase_client() -> Client {
    Client::builder()
        .user_agent(concat!("screenlog/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|_| Client::new())
}

#[derive(Clone)]
pub struct FirestoreProfileStore {
    client: Arc<Client>,
    project_id: String,
    api_key: String,
    id_token: Option<String>,
}

impl FirestoreProfileStore {
    pub fn new(project_id: String, api_key: String) -> Self {
        Self {
            client: Arc::new(create_firebase_client()),
            project_id,
            api_key,
            id_token: None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.id_token.is_some()
    }

    fn id_token(&self) -> Result<&str, RemoteError> {
        self.id_token
            .as_deref()
            .ok_or_else(|| RemoteError::Auth("not signed in".to_string()))
    }

    /// Ensure a usable id token, refreshing through the stored refresh token
    /// when the saved one is missing or within 5 minutes of expiry.
    pub async fn authenticate(
        &mut self,
        credentials: &mut CredentialStore,
    ) -> Result<(), RemoteError> {
        if let (Some(token), Some(expires)) =
            (credentials.get_id_token(), credentials.get_token_expires())
        {
            if !token.is_empty() && expires > Utc::now() + Duration::minutes(5) {
                self.id_token = Some(token.clone());
                return Ok(());
            }
        }

        let refresh_token = credentials
            .get_refresh_token()
            .cloned()
            .ok_or_else(|| RemoteError::Auth("no stored session; sign in first".to_string()))?;

        let token_info =
            auth::refresh_id_token(&self.client, &self.api_key, &refresh_token).await?;
        self.id_token = Some(token_info.id_token.clone());

        credentials.set_id_token(token_info.id_token);
        credentials.set_refresh_token(token_info.refresh_token);
        credentials.set_token_expires(token_info.expires_at);
        credentials
            .save()
            .map_err(|e| RemoteError::Auth(format!("failed to persist refreshed session: {}", e)))?;

        info!("Refreshed account session token");
        Ok(())
    }

    /// Email/password sign-in; stores the session in the credential store.
    pub async fn sign_in(
        &mut self,
        credentials: &mut CredentialStore,
        email: &str,
        password: &str,
    ) -> Result<TokenInfo, RemoteError> {
        let token_info =
            auth::sign_in_with_password(&self.client, &self.api_key, email, password).await?;
        self.store_session(credentials, &token_info)?;
        info!("Signed in as {}", token_info.email);
        Ok(token_info)
    }

    /// Create a new email/password account and sign in.
    pub async fn sign_up(
        &mut self,
        credentials: &mut CredentialStore,
        email: &str,
        password: &str,
    ) -> Result<TokenInfo, RemoteError> {
        let token_info = auth::sign_up(&self.client, &self.api_key, email, password).await?;
        self.store_session(credentials, &token_info)?;
        info!("Created account {}", token_info.email);
        Ok(token_info)
    }

    fn store_session(
        &mut self,
        credentials: &mut CredentialStore,
        token_info: &TokenInfo,
    ) -> Result<(), RemoteError> {
        self.id_token = Some(token_info.id_token.clone());

        credentials.set_account_uid(token_info.local_id.clone());
        if !token_info.email.is_empty() {
            credentials.set_account_email(token_info.email.clone());
        }
        credentials.set_id_token(token_info.id_token.clone());
        credentials.set_refresh_token(token_info.refresh_token.clone());
        credentials.set_token_expires(token_info.expires_at);
        credentials
            .save()
            .map_err(|e| RemoteError::Auth(format!("failed to persist session: {}", e)))
    }
}

#[async_trait]
impl ProfileStore for FirestoreProfileStore {
    async fn load(&self, account_id: &str) -> Result<Option<ListCollections>, RemoteError> {
        let fields =
            api::get_document(&self.client, self.id_token()?, &self.project_id, account_id)
                .await?;
        Ok(fields.map(|fields| value::decode_collections(&fields)))
    }

    async fn save(
        &self,
        account_id: &str,
        collections: &ListCollections,
    ) -> Result<(), RemoteError> {
        let fields = value::encode_collections(collections);
        api::patch_document(
            &self.client,
            self.id_token()?,
            &self.project_id,
            account_id,
            fields,
            &["favorites", "watched", "planToWatch"],
        )
        .await
    }
}
