use crate::error::{ConfigureAuthError, CredentialError};
use crate::http_client::{endpoint_url, get_json};
use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use tokio::fs;
use url::Url;

pub const USER_INFO_PATH: &str = "/apis/user.openshift.io/v1/users/~";

#[derive(Deserialize, Debug)]
struct UserMetadata {
    name: String,
}

/// `user.openshift.io/v1` User, as returned for `~` (the caller itself).
#[derive(Deserialize, Debug)]
struct User {
    metadata: UserMetadata,
}

/// OAuth client credentials of the service account the generator runs as.
#[derive(Clone, PartialEq, Eq)]
pub struct ServiceIdentity {
    pub client_id: String,

    /// The service account token itself
    pub client_secret: String,
}

impl fmt::Debug for ServiceIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceIdentity")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

pub async fn read_token(token_path: &Path) -> Result<String> {
    log::debug!("Reading service account token from {}", token_path.display());
    let content = fs::read_to_string(token_path)
        .await
        .with_context(|| format!("Failed to read token file {}", token_path.display()))?;

    let token = content.trim();
    if token.is_empty() {
        return Err(CredentialError::EmptyToken(token_path.to_owned()).into());
    }

    Ok(token.to_owned())
}

pub async fn fetch_client_id(client: &Client, server_url: &Url, token: &str) -> Result<String> {
    let url = endpoint_url(server_url, USER_INFO_PATH);
    log::debug!("Looking up the token owner at {}", url);

    let user = get_json::<User>(client.get(&url).bearer_auth(token))
        .await
        .with_context(|| format!("Failed to look up the token owner at {}", url))?;

    Ok(user.metadata.name)
}

pub async fn resolve_service_identity(
    client: &Client,
    server_url: &Url,
    token_path: &Path,
) -> Result<ServiceIdentity, ConfigureAuthError> {
    let resolve = async {
        let token = read_token(token_path).await?;
        let client_id = fetch_client_id(client, server_url, &token).await?;

        Ok::<_, anyhow::Error>(ServiceIdentity {
            client_id,
            client_secret: token,
        })
    };

    let identity = resolve
        .await
        .map_err(|source| ConfigureAuthError::Credential { source })?;
    log::debug!("Resolved client_id={}", identity.client_id);

    Ok(identity)
}
