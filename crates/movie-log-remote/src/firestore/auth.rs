use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use crate::error::RemoteError;

// Firebase Auth REST endpoints (email/password provider)
const IDENTITY_BASE: &str = "https://identitytoolkit.googleapis.com/v1";
const SECURE_TOKEN_BASE: &str = "https://securetoken.googleapis.com/v1";

#[derive(Debug, Clone)]
pub struct TokenInfo {
    pub id_token: String,
    pub refresh_token: String,
    pub local_id: String,
    pub email: String,
    pub expires_at: DateTime<Utc>,
}

// signUp / signInWithPassword respond in camelCase
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IdentityResponse {
    id_token: String,
    refresh_token: String,
    local_id: String,
    #[serde(default)]
    email: String,
    expires_in: String,
}

// The secure-token endpoint responds in snake_case
#[derive(Debug, Deserialize)]
struct RefreshResponse {
    id_token: String,
    refresh_token: String,
    user_id: String,
    expires_in: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: Option<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: Option<String>,
}

fn expires_at(expires_in: &str) -> DateTime<Utc> {
    let seconds = expires_in.parse::<i64>().unwrap_or(3600);
    Utc::now() + Duration::seconds(seconds)
}

/// The auth endpoints report failures as 400 with a machine-readable
/// message ("EMAIL_NOT_FOUND", "INVALID_PASSWORD", "EMAIL_EXISTS", ...).
async fn error_from_response(response: reqwest::Response) -> RemoteError {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    if let Ok(body) = serde_json::from_str::<ApiErrorBody>(&text) {
        if let Some(message) = body.error.and_then(|e| e.message) {
            return RemoteError::Auth(message);
        }
    }
    RemoteError::api("firebase-auth", status.as_u16(), text)
}

pub async fn sign_in_with_password(
    client: &Client,
    api_key: &str,
    email: &str,
    password: &str,
) -> Result<TokenInfo, RemoteError> {
    let url = format!("{}/accounts:signInWithPassword?key={}", IDENTITY_BASE, api_key);
    exchange(client, &url, email, password).await
}

pub async fn sign_up(
    client: &Client,
    api_key: &str,
    email: &str,
    password: &str,
) -> Result<TokenInfo, RemoteError> {
    let url = format!("{}/accounts:signUp?key={}", IDENTITY_BASE, api_key);
    exchange(client, &url, email, password).await
}

async fn exchange(
    client: &Client,
    url: &str,
    email: &str,
    password: &str,
) -> Result<TokenInfo, RemoteError> {
    let response = client
        .post(url)
        .json(&json!({
            "email": email,
            "password": password,
            "returnSecureToken": true,
        }))
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(error_from_response(response).await);
    }

    let body: IdentityResponse = response.json().await?;
    Ok(TokenInfo {
        expires_at: expires_at(&body.expires_in),
        id_token: body.id_token,
        refresh_token: body.refresh_token,
        local_id: body.local_id,
        email: body.email,
    })
}

/// Trade a refresh token for a fresh id token.
pub async fn refresh_id_token(
    client: &Client,
    api_key: &str,
    refresh_token: &str,
) -> Result<TokenInfo, RemoteError> {
    let url = format!("{}/token?key={}", SECURE_TOKEN_BASE, api_key);
    let response = client
        .post(&url)
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ])
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(error_from_response(response).await);
    }

    let body: RefreshResponse = response.json().await?;
    Ok(TokenInfo {
        expires_at: expires_at(&body.expires_in),
        id_token: body.id_token,
        refresh_token: body.refresh_token,
        local_id: body.user_id,
        email: String::new(), // not returned by the refresh endpoint
    })
}
