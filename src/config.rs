use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// Client configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Origin serving both the backend API and the shop page
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Drop recommendation responses superseded by a newer selection.
    /// Off by default: the last response to resolve wins the render.
    #[serde(default)]
    pub discard_stale_responses: bool,
}

fn default_api_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            discard_stale_responses: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Load configuration from an explicit set of key/value pairs
    pub fn from_vars<I>(vars: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter::<_, Config>(vars)
            .map_err(|e| AppError::Config(format!("Failed to load config: {}", e)))
    }
}
