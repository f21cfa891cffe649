use reqwest::{Client, StatusCode};
use serde_json::{json, Map, Value};
use tracing::debug;

use crate::error::RemoteError;

// Firestore REST base URL
const API_BASE: &str = "https://firestore.googleapis.com/v1";

fn document_url(project_id: &str, account_id: &str) -> String {
    format!(
        "{}/projects/{}/databases/(default)/documents/users/{}",
        API_BASE,
        project_id,
        urlencoding::encode(account_id)
    )
}

/// Fetch the account document. `None` when it does not exist yet.
pub async fn get_document(
    client: &Client,
    id_token: &str,
    project_id: &str,
    account_id: &str,
) -> Result<Option<Map<String, Value>>, RemoteError> {
    let url = document_url(project_id, account_id);

    let response = client.get(&url).bearer_auth(id_token).send().await?;
    match response.status() {
        StatusCode::NOT_FOUND => {
            debug!("No profile document for account {}", account_id);
            return Ok(None);
        }
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            return Err(RemoteError::Auth(
                "session token rejected by the document store".to_string(),
            ));
        }
        status if !status.is_success() => {
            let error_text = response.text().await.unwrap_or_default();
            return Err(RemoteError::api("firestore", status.as_u16(), error_text));
        }
        _ => {}
    }

    let body: Value = response.json().await?;
    let fields = body
        .get("fields")
        .and_then(|f| f.as_object())
        .cloned()
        .unwrap_or_default();
    Ok(Some(fields))
}

/// Patch the account document, restricted to `field_paths` so unrelated
/// fields on the document survive (merge at field granularity).
pub async fn patch_document(
    client: &Client,
    id_token: &str,
    project_id: &str,
    account_id: &str,
    fields: Map<String, Value>,
    field_paths: &[&str],
) -> Result<(), RemoteError> {
    let mask = field_paths
        .iter()
        .map(|path| format!("updateMask.fieldPaths={}", path))
        .collect::<Vec<_>>()
        .join("&");
    let url = format!("{}?{}", document_url(project_id, account_id), mask);

    let response = client
        .patch(&url)
        .bearer_auth(id_token)
        .json(&json!({ "fields": fields }))
        .send()
        .await?;

    match response.status() {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(RemoteError::Auth(
            "session token rejected by the document store".to_string(),
        )),
        status if !status.is_success() => {
            let error_text = response.text().await.unwrap_or_default();
            Err(RemoteError::api("firestore", status.as_u16(), error_text))
        }
        _ => Ok(()),
    }
}
