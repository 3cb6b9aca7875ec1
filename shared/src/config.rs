use std::env;
use thiserror::Error;

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_IMAGEN_MODEL: &str = "imagen-4.0-generate-001";
pub const DEFAULT_EDIT_MODEL: &str = "gemini-2.5-flash-image";
pub const DEFAULT_CORS_ORIGIN: &str = "*";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Kunci API Gemini tidak dikonfigurasi di server.")]
    MissingApiKey,
}

/// Provider settings, read per invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    pub api_key: String,
    pub api_base: String,
    pub imagen_model: String,
    pub edit_model: String,
}

impl RelayConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// `API_KEY` is required and never defaulted; everything else falls back.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_key = non_empty("API_KEY").ok_or(ConfigError::MissingApiKey)?;

        Ok(Self {
            api_key,
            api_base: non_empty("GEMINI_API_BASE")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            imagen_model: non_empty("IMAGEN_MODEL").unwrap_or_else(|| DEFAULT_IMAGEN_MODEL.to_string()),
            edit_model: non_empty("IMAGE_EDIT_MODEL").unwrap_or_else(|| DEFAULT_EDIT_MODEL.to_string()),
        })
    }
}

/// Value for `Access-Control-Allow-Origin`.
pub fn cors_allow_origin() -> String {
    env::var("CORS_ALLOW_ORIGIN")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string())
}
