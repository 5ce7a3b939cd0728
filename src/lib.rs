#![deny(warnings)]

use crate::args::Arguments;
use crate::assembler::{assemble, output_path};
use crate::credentials::resolve_service_identity;
use crate::default_config::DefaultConfigLocator;
use crate::discovery::discover_endpoints;
use crate::error::ConfigureAuthError;
use crate::http_client::build_http_client;
use crate::webserver_config::ConfigValues;
use anyhow::{Context, Result};
use std::path::PathBuf;

pub mod args;
pub mod assembler;
pub mod auth_mode;
pub mod credentials;
pub mod default_config;
pub mod discovery;
pub mod error;
pub mod http_client;
pub mod template;
pub mod webserver_config;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// `AUTH_TYPE` didn't ask for OpenShift authentication
    Skipped,
    Written(PathBuf),
}

pub async fn write_webserver_config(
    args: &Arguments,
    default_config: &(dyn DefaultConfigLocator + Send + Sync),
) -> Result<Outcome> {
    if !args.is_openshift_auth() {
        log::info!(
            "AUTH_TYPE={:?} doesn't enable OpenShift authentication. Nothing to do",
            args.auth_type
        );
        return Ok(Outcome::Skipped);
    }

    let client = build_http_client(args).await?;

    let endpoints = discover_endpoints(&client, &args.server_url).await?;
    let identity = resolve_service_identity(&client, &args.server_url, &args.token_path).await?;

    let values = ConfigValues::new(
        &args.server_url,
        endpoints,
        identity,
        args.registration_role.as_deref(),
    );
    let fragment = values.render().map_err(ConfigureAuthError::from)?;

    let default_config_path = default_config.locate().await?;
    let output = output_path(args.airflow_home.as_deref(), &args.output_file_name)?;

    assemble(&default_config_path, &fragment, &output)
        .await
        .context("Failed to write the webserver configuration")?;
    log::info!("Webserver configuration written to {}", output.display());

    Ok(Outcome::Written(output))
}
