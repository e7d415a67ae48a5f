//! TOML configuration discovery for the CLI.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use trigscope::{TrigscopeError, config::AppConfig};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {}", .0.display())]
    MissingFile(PathBuf),
}

impl From<ConfigError> for TrigscopeError {
    fn from(err: ConfigError) -> Self {
        TrigscopeError::Io(io::Error::other(err.to_string()))
    }
}

/// Relative path checked in the working directory.
const LOCAL_CONFIG: &str = "trigscope/config.toml";

/// Load the CLI configuration.
///
/// An explicit path must exist. Otherwise the first existing file among
/// `trigscope/config.toml` and the platform config directory is used, and
/// the defaults apply when neither exists.
///
/// # Errors
///
/// Returns error if the explicit file is missing or a found file does not
/// parse.
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, TrigscopeError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::MissingFile(path.to_path_buf()).into());
        }
        return read_config(path);
    }

    match candidate_paths().into_iter().find(|path| path.exists()) {
        Some(path) => read_config(&path),
        None => {
            debug!("No configuration file found, using defaults");
            Ok(AppConfig::default())
        }
    }
}

/// Implicit configuration locations, in lookup order.
fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(LOCAL_CONFIG)];
    match ProjectDirs::from("com", "trigscope", "trigscope") {
        Some(dirs) => paths.push(dirs.config_dir().join("config.toml")),
        None => debug!("Could not determine platform-specific config directory"),
    }
    paths
}

fn read_config(path: &Path) -> Result<AppConfig, TrigscopeError> {
    info!(path = path.display().to_string(); "Loading configuration");
    let content = fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()).into())
}
