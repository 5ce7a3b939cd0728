use crate::args::Arguments;
use crate::error::{ConfigureAuthError, ResponseError};
use anyhow::{Context, Result};
use reqwest::{Certificate, Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tokio::fs;
use url::Url;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// One client serves both calls to the identity provider.
pub async fn build_http_client(args: &Arguments) -> Result<Client> {
    log::debug!("Creating http client...");
    let mut builder = Client::builder().user_agent(USER_AGENT);

    if let Some(timeout) = args.timeout {
        log::debug!("Using a {}s timeout for http calls", timeout);
        builder = builder.timeout(Duration::from_secs(timeout));
    }

    if let Some(ca_cert) = &args.ca_cert {
        log::debug!("Trusting root certificate {}", ca_cert.display());
        let pem = fs::read(ca_cert)
            .await
            .map_err(|e| ConfigureAuthError::Filesystem {
                path: ca_cert.to_owned(),
                source: e.into(),
            })?;
        let certificate = Certificate::from_pem(&pem).with_context(|| {
            format!("`--ca-cert` is not a PEM certificate: {}", ca_cert.display())
        })?;
        builder = builder.add_root_certificate(certificate);
    }

    let client = builder.build().context("Failed to create a http client")?;
    log::debug!("Http client created");

    Ok(client)
}

/// `server_url` without the trailing slash `Url` always adds to a bare host.
pub fn server_base(server_url: &Url) -> &str {
    server_url.as_str().trim_end_matches('/')
}

pub fn endpoint_url(server_url: &Url, path: &str) -> String {
    format!("{}{}", server_base(server_url), path)
}

/// Sends the request and decodes a `200 OK` json body. Any other status is an error.
pub async fn get_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T> {
    let response = request
        .send()
        .await
        .context("Couldn't reach out to the server")?;

    let status = response.status();
    if status != StatusCode::OK {
        return Err(ResponseError::UnexpectedStatus(status).into());
    }

    response
        .json::<T>()
        .await
        .context("Couldn't process the json response")
}
