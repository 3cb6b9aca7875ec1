pub mod config;
pub mod gemini;

pub use config::{ConfigError, RelayConfig};
pub use gemini::GeminiProvider;

use std::time::Duration;

/// Clients shared across invocations of a warm Lambda.
pub struct AppState {
    pub http_client: reqwest::Client,
}

impl AppState {
    pub fn new() -> Result<Self, reqwest::Error> {
        // Image generation is slow; this only guards against a hung connection.
        let http_client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self { http_client })
    }

    /// Provider bound to this invocation's configuration.
    pub fn provider(&self, config: &RelayConfig) -> GeminiProvider {
        GeminiProvider::new(self.http_client.clone(), config)
    }
}
