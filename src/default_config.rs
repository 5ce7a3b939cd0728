use crate::args::Arguments;
use crate::error::{ConfigureAuthError, FilesystemError};
use anyhow::Result;
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::process::Command;

/// Location of Airflow's own default, relative to the python `purelib` directory.
pub const DEFAULT_WEBSERVER_CONFIG: &str = "airflow/config_templates/default_webserver_config.py";

const PURELIB_SCRIPT: &str = "import sysconfig; print(sysconfig.get_paths()['purelib'])";

/// Finds the default webserver configuration the generated file starts with.
#[async_trait]
pub trait DefaultConfigLocator {
    async fn locate(&self) -> Result<PathBuf, ConfigureAuthError>;
}

pub struct StaticDefaultConfig(pub PathBuf);

#[async_trait]
impl DefaultConfigLocator for StaticDefaultConfig {
    async fn locate(&self) -> Result<PathBuf, ConfigureAuthError> {
        Ok(self.0.to_owned())
    }
}

/// Asks the active python installation where its packages live.
pub struct PythonSitePackages {
    interpreter: String,
}

impl PythonSitePackages {
    pub fn new(interpreter: &str) -> PythonSitePackages {
        PythonSitePackages {
            interpreter: interpreter.to_owned(),
        }
    }

    async fn purelib(&self) -> Result<PathBuf> {
        log::debug!("Asking `{}` for the site-packages directory", self.interpreter);
        let output = Command::new(&self.interpreter)
            .args(["-c", PURELIB_SCRIPT])
            .output()
            .await?;

        if !output.status.success() {
            return Err(FilesystemError::InterpreterFailed {
                interpreter: self.interpreter.to_owned(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            }
            .into());
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let purelib = stdout.trim();
        if purelib.is_empty() {
            return Err(FilesystemError::NoSitePackages(self.interpreter.to_owned()).into());
        }

        Ok(PathBuf::from(purelib))
    }
}

#[async_trait]
impl DefaultConfigLocator for PythonSitePackages {
    async fn locate(&self) -> Result<PathBuf, ConfigureAuthError> {
        let purelib = self
            .purelib()
            .await
            .map_err(|source| ConfigureAuthError::Filesystem {
                path: PathBuf::from(&self.interpreter),
                source,
            })?;

        Ok(purelib.join(DEFAULT_WEBSERVER_CONFIG))
    }
}

pub fn locator_from_args(args: &Arguments) -> Box<dyn DefaultConfigLocator + Send + Sync> {
    match &args.default_config {
        Some(path) => Box::new(StaticDefaultConfig(path.to_owned())),
        None => Box::new(PythonSitePackages::new(&args.python)),
    }
}
