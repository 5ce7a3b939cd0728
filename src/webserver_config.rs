use crate::credentials::ServiceIdentity;
use crate::discovery::AuthorizationServerMetadata;
use crate::error::TemplateError;
use crate::http_client::server_base;
use crate::template::Template;
use std::collections::HashMap;
use url::Url;

/// Flask-AppBuilder OAuth setup for Airflow, appended to the default `webserver_config.py`.
pub const OPENSHIFT_OAUTH_TEMPLATE: &str = include_str!("templates/openshift_oauth.py.tmpl");

pub const SERVER_URL: &str = "server_url";
pub const AUTHORIZATION_ENDPOINT: &str = "authorization_endpoint";
pub const TOKEN_ENDPOINT: &str = "token_endpoint";
pub const CLIENT_ID: &str = "client_id";
pub const CLIENT_SECRET: &str = "client_secret";
pub const AUTH_USER_REGISTRATION_ROLE: &str = "auth_user_registration_role";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigValues {
    pub server_url: String,
    pub authorization_endpoint: String,
    pub token_endpoint: String,
    pub client_id: String,
    pub client_secret: String,
    pub auth_user_registration_role: String,
}

/// Empty when no role is configured, so the template line stays blank.
/// The role isn't escaped, a `"` in it breaks the generated file.
pub fn registration_role_line(role: Option<&str>) -> String {
    match role {
        Some(role) => format!("AUTH_USER_REGISTRATION_ROLE = \"{}\"", role),
        None => String::new(),
    }
}

impl ConfigValues {
    pub fn new(
        server_url: &Url,
        endpoints: AuthorizationServerMetadata,
        identity: ServiceIdentity,
        registration_role: Option<&str>,
    ) -> ConfigValues {
        ConfigValues {
            server_url: server_base(server_url).to_owned(),
            authorization_endpoint: endpoints.authorization_endpoint,
            token_endpoint: endpoints.token_endpoint,
            client_id: identity.client_id,
            client_secret: identity.client_secret,
            auth_user_registration_role: registration_role_line(registration_role),
        }
    }

    pub fn to_substitutions(&self) -> HashMap<String, String> {
        [
            (SERVER_URL, &self.server_url),
            (AUTHORIZATION_ENDPOINT, &self.authorization_endpoint),
            (TOKEN_ENDPOINT, &self.token_endpoint),
            (CLIENT_ID, &self.client_id),
            (CLIENT_SECRET, &self.client_secret),
            (AUTH_USER_REGISTRATION_ROLE, &self.auth_user_registration_role),
        ]
        .into_iter()
        .map(|(key, value)| (key.to_owned(), value.to_owned()))
        .collect()
    }

    pub fn render(&self) -> Result<String, TemplateError> {
        render(&self.to_substitutions())
    }
}

pub fn render(values: &HashMap<String, String>) -> Result<String, TemplateError> {
    log::debug!("Rendering the OpenShift OAuth configuration");
    Template::new(OPENSHIFT_OAUTH_TEMPLATE).substitute(values)
}
