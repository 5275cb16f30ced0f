use std::{
    env, fs,
    net::{IpAddr, SocketAddr},
    path::{Path, PathBuf},
};

use axum::http::HeaderValue;
use serde::Deserialize;
use tracing::info;

use crate::error::{ConfigError, Error};

pub const CONFIG_PATH_VARIABLE: &str = "NEW_USERS_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "new_users.toml";

fn default_bind_address() -> String {
    "::1".to_owned()
}

fn default_port() -> u16 {
    8886
}

fn default_cookie_name() -> String {
    "auth_user".to_owned()
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_bind_address")]
    bind_address: String,
    #[serde(default = "default_port")]
    port: u16,
    /// Cookie carrying the authenticated user name, set by the host platform.
    #[serde(default = "default_cookie_name")]
    cookie_name: String,
    #[serde(default)]
    allowed_origins: Vec<String>,
    #[serde(default)]
    public_directory: Option<PathBuf>,
    #[serde(default)]
    log_directory: Option<PathBuf>,
    #[serde(default)]
    seed: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
            cookie_name: default_cookie_name(),
            allowed_origins: Vec::new(),
            public_directory: None,
            log_directory: None,
            seed: None,
        }
    }
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self, Error> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) => return Err(ConfigError::Read(path.to_owned(), err).into()),
        };
        Self::from_toml(path, &contents)
    }

    fn from_toml(path: &Path, contents: &str) -> Result<Self, Error> {
        let config: Config = match toml::from_str(contents) {
            Ok(config) => config,
            Err(err) => return Err(ConfigError::Parse(path.to_owned(), err).into()),
        };
        let _ = config.get_socket_addr()?;
        let _ = config.get_allowed_origins()?;
        Ok(config)
    }

    /// Reads the file named by `NEW_USERS_CONFIG`, or `new_users.toml` when unset.
    /// A missing default file falls back to built-in defaults; a missing explicit file is an error.
    pub fn load() -> Result<Self, Error> {
        match env::var(CONFIG_PATH_VARIABLE) {
            Ok(path) => Self::from_file(Path::new(&path)),
            Err(_) => {
                let path = Path::new(DEFAULT_CONFIG_PATH);
                if path.exists() {
                    Self::from_file(path)
                } else {
                    info!("No {} found, using default configuration", DEFAULT_CONFIG_PATH);
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, Error> {
        match self.bind_address.parse::<IpAddr>() {
            Ok(ip) => Ok(SocketAddr::new(ip, self.port)),
            Err(err) => Err(ConfigError::InvalidBindAddress(err, self.bind_address.to_owned()).into()),
        }
    }

    pub fn get_allowed_origins(&self) -> Result<Vec<HeaderValue>, Error> {
        let mut allowed_origins: Vec<HeaderValue> = Vec::new();
        for allowed_origin in self.allowed_origins.iter() {
            match allowed_origin.parse::<HeaderValue>() {
                Ok(header_value) => allowed_origins.push(header_value),
                Err(err) => {
                    return Err(
                        ConfigError::InvalidOrigin(err, allowed_origin.to_owned()).into(),
                    )
                }
            }
        }
        Ok(allowed_origins)
    }

    pub fn get_cookie_name(&self) -> &str {
        &self.cookie_name
    }
    pub fn get_public_directory(&self) -> Option<&PathBuf> {
        self.public_directory.as_ref()
    }
    pub fn get_log_directory(&self) -> Option<&PathBuf> {
        self.log_directory.as_ref()
    }
    pub fn get_seed(&self) -> Option<&PathBuf> {
        self.seed.as_ref()
    }
}
