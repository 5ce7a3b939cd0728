use crate::error::{ConfigureAuthError, FilesystemError};
use std::path::{Path, PathBuf};
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;

pub fn output_path(
    airflow_home: Option<&Path>,
    file_name: &str,
) -> Result<PathBuf, ConfigureAuthError> {
    match airflow_home {
        Some(home) if !home.as_os_str().is_empty() => Ok(home.join(file_name)),
        _ => Err(ConfigureAuthError::Filesystem {
            path: PathBuf::from(file_name),
            source: FilesystemError::AirflowHomeNotSet.into(),
        }),
    }
}

fn filesystem_error(path: &Path) -> impl FnOnce(std::io::Error) -> ConfigureAuthError + '_ {
    move |e| ConfigureAuthError::Filesystem {
        path: path.to_owned(),
        source: e.into(),
    }
}

/// Writes `default_config` followed by `fragment` to `output`, replacing
/// whatever was there. The default file is read before `output` is opened.
pub async fn assemble(
    default_config: &Path,
    fragment: &str,
    output: &Path,
) -> Result<(), ConfigureAuthError> {
    log::debug!("Reading the default configuration {}", default_config.display());
    let default = fs::read_to_string(default_config)
        .await
        .map_err(filesystem_error(default_config))?;

    log::debug!("Writing {}", output.display());
    let mut file = File::create(output).await.map_err(filesystem_error(output))?;
    file.write_all(default.as_bytes())
        .await
        .map_err(filesystem_error(output))?;
    file.write_all(fragment.as_bytes())
        .await
        .map_err(filesystem_error(output))?;
    file.flush().await.map_err(filesystem_error(output))?;

    Ok(())
}
