use log::debug;
use serde::Deserialize;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

const CONFIG_DIR: &str = ".pr-checker";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no user home directory")]
    NoHomeDir,
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Contents of `$HOME/.pr-checker/config.json`. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FileConfig {
    #[serde(alias = "accessToken", alias = "access_token")]
    pub access_token: Option<String>,
    #[serde(alias = "orgName", alias = "org_name")]
    pub org_name: Option<String>,
    #[serde(alias = "ugly")]
    pub ugly: Option<bool>,
    #[serde(alias = "concurrency")]
    pub concurrency: Option<usize>,
    #[serde(alias = "keepGoing", alias = "keep_going")]
    pub keep_going: Option<bool>,
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    dirs::home_dir()
        .map(|home| home.join(CONFIG_DIR).join(CONFIG_FILE))
        .ok_or(ConfigError::NoHomeDir)
}

/// Load the user config file. A missing file is not an error.
pub fn load_config() -> Result<Option<FileConfig>, ConfigError> {
    load_config_from(&get_config_path()?)
}

pub fn load_config_from(path: &Path) -> Result<Option<FileConfig>, ConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!("No config file at {}", path.display());
            return Ok(None);
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let config = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    debug!("Loaded config from {}", path.display());
    Ok(Some(config))
}
