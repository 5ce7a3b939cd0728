use std::path::PathBuf;
use thiserror::Error;

/// Failures that end a run, one variant per pipeline stage.
#[derive(Error, Debug)]
pub enum ConfigureAuthError {
    #[error("Couldn't discover the OAuth endpoints at {url}")]
    Discovery {
        url: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Couldn't resolve the service account identity")]
    Credential {
        #[source]
        source: anyhow::Error,
    },

    #[error("Couldn't render the webserver configuration")]
    Template {
        #[from]
        source: TemplateError,
    },

    #[error("Couldn't access {}", .path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TemplateError {
    #[error("No value for placeholder `{0}`")]
    MissingKey(String),

    #[error("Invalid placeholder at line {line}, column {column}")]
    InvalidPlaceholder { line: usize, column: usize },
}

#[derive(Error, Debug)]
pub enum ResponseError {
    #[error("Unexpected status {0}, expected 200 OK")]
    UnexpectedStatus(reqwest::StatusCode),
}

#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("Token file {} is empty", .0.display())]
    EmptyToken(PathBuf),
}

#[derive(Error, Debug)]
pub enum FilesystemError {
    #[error("AIRFLOW_HOME is not set")]
    AirflowHomeNotSet,

    #[error("`{interpreter}` exited with {status}: {stderr}")]
    InterpreterFailed {
        interpreter: String,
        status: std::process::ExitStatus,
        stderr: String,
    },

    #[error("`{0}` didn't report a site-packages directory")]
    NoSitePackages(String),
}
