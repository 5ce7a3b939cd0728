use configure_auth::args::Arguments;
use configure_auth::credentials::USER_INFO_PATH;
use configure_auth::discovery::DISCOVERY_PATH;
use httpmock::prelude::*;
use httpmock::Mock;
use serde_json::json;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use url::Url;

pub const TOKEN: &str = "abc123";
pub const CLIENT_ID: &str = "svc-acct";
pub const DEFAULT_CONFIG: &str = r#"import os
from flask_appbuilder.security.manager import AUTH_DB

basedir = os.path.abspath(os.path.dirname(__file__))
WTF_CSRF_ENABLED = True
AUTH_TYPE = AUTH_DB
"#;

/// A fake cluster: identity provider, service account token, Airflow install and home.
pub struct Cluster {
    pub server: MockServer,
    pub dir: TempDir,
}

impl Cluster {
    pub fn new() -> Cluster {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("token"), format!("{}\n", TOKEN)).unwrap();
        fs::write(dir.path().join("default_webserver_config.py"), DEFAULT_CONFIG).unwrap();
        fs::create_dir(dir.path().join("airflow")).unwrap();

        Cluster {
            server: MockServer::start(),
            dir,
        }
    }

    pub fn mock_discovery(&self, body: &str) -> Mock<'_> {
        let body = body.to_owned();
        self.server.mock(|when, then| {
            when.method(GET).path(DISCOVERY_PATH);
            then.status(200)
                .header("content-type", "application/json")
                .body(body);
        })
    }

    pub fn mock_user_info(&self) -> Mock<'_> {
        self.server.mock(|when, then| {
            when.method(GET)
                .path(USER_INFO_PATH)
                .header("authorization", format!("Bearer {}", TOKEN));
            then.status(200).json_body(json!({
                "kind": "User",
                "apiVersion": "user.openshift.io/v1",
                "metadata": { "name": CLIENT_ID },
                "identities": ["LDAP:dWlkPXN2Yw=="],
            }));
        })
    }

    pub fn default_config_path(&self) -> PathBuf {
        self.dir.path().join("default_webserver_config.py")
    }

    pub fn token_path(&self) -> PathBuf {
        self.dir.path().join("token")
    }

    pub fn airflow_home(&self) -> PathBuf {
        self.dir.path().join("airflow")
    }

    pub fn output_path(&self) -> PathBuf {
        self.dir.path().join("airflow").join("webserver_config.py")
    }

    pub fn args(&self) -> Arguments {
        Arguments {
            auth_type: Some("openshift".to_owned()),
            airflow_home: Some(self.airflow_home()),
            server_url: Url::parse(&self.server.base_url()).unwrap(),
            token_path: self.token_path(),
            default_config: Some(self.default_config_path()),
            ..Default::default()
        }
    }
}

pub const DISCOVERY: &str =
    r#"{"issuer":"https://idp","authorization_endpoint":"https://idp/auth","token_endpoint":"https://idp/token"}"#;
