use crate::error::ConfigureAuthError;
use crate::http_client::{endpoint_url, get_json};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

pub const DISCOVERY_PATH: &str = "/.well-known/oauth-authorization-server";

/// Subset of the OAuth 2.0 Authorization Server Metadata <https://www.rfc-editor.org/rfc/rfc8414>.
/// Other fields of the document are ignored.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct AuthorizationServerMetadata {
    pub authorization_endpoint: String,

    pub token_endpoint: String,
}

pub async fn discover_endpoints(
    client: &Client,
    server_url: &Url,
) -> Result<AuthorizationServerMetadata, ConfigureAuthError> {
    let url = endpoint_url(server_url, DISCOVERY_PATH);
    log::debug!("Discovering OAuth endpoints at {}", url);

    let metadata = get_json::<AuthorizationServerMetadata>(client.get(&url))
        .await
        .map_err(|source| ConfigureAuthError::Discovery {
            url: url.to_owned(),
            source,
        })?;

    log::debug!(
        "Resolved authorization_endpoint={} and token_endpoint={}",
        metadata.authorization_endpoint,
        metadata.token_endpoint
    );

    Ok(metadata)
}
