use std::env;
use std::path::PathBuf;

use crate::crm::LinkMatching;

/// Errors raised while reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {name}: {message}")]
    Invalid { name: &'static str, message: String },
}

#[derive(Clone, Debug)]
pub struct Config {
    pub server_address: String,
    pub link_matching: LinkMatching,
    pub fixtures: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_address: "0.0.0.0:8000".to_string(),
            link_matching: LinkMatching::default(),
            fixtures: None,
        }
    }
}

impl Config {
    /// Read configuration from the environment, loading `.env` first if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from any variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let link_matching = match lookup("NCRM_LINK_MATCHING") {
            Some(value) => value.parse::<LinkMatching>().map_err(|message| ConfigError::Invalid {
                name: "NCRM_LINK_MATCHING",
                message,
            })?,
            None => defaults.link_matching,
        };

        Ok(Config {
            server_address: lookup("NCRM_SERVER_ADDRESS").unwrap_or(defaults.server_address),
            link_matching,
            fixtures: lookup("NCRM_FIXTURES")
                .filter(|path| !path.is_empty())
                .map(PathBuf::from),
        })
    }
}
