use serde::Deserialize;
use std::future::Future;
use thiserror::Error;
use ubah_atoms::generation::GenerateRequestBody;

pub const GENERATE_PATH: &str = "/api/generate";

pub const SERVER_ERROR_FALLBACK: &str = "Terjadi kesalahan pada server.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Non-2xx answer from the relay.
    #[error("{0}")]
    Server(String),
    #[error("Tidak ada gambar yang dihasilkan. Respons dari server tidak valid.")]
    EmptyResult,
    /// The call failed or the body was not JSON.
    #[error("{0}")]
    Network(String),
}

/// Seam between the editor session and the relay.
pub trait GenerateTransport {
    fn generate(
        &self,
        body: &GenerateRequestBody,
    ) -> impl Future<Output = Result<Vec<String>, TransportError>> + Send;
}

#[derive(Debug, Deserialize)]
struct RelayReply {
    #[serde(default)]
    images: Option<Vec<String>>,
    #[serde(default)]
    error: Option<String>,
}

/// HTTP client for `POST /api/generate`.
#[derive(Debug, Clone)]
pub struct RelayClient {
    http: reqwest::Client,
    endpoint: String,
}

impl RelayClient {
    pub fn new(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), GENERATE_PATH),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl GenerateTransport for RelayClient {
    async fn generate(&self, body: &GenerateRequestBody) -> Result<Vec<String>, TransportError> {
        tracing::info!("📤 POST {} menuKey={}", self.endpoint, body.menu_key);

        let response = self
            .http
            .post(&self.endpoint)
            .json(body)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        interpret_reply(status.is_success(), &text)
    }
}

fn interpret_reply(success: bool, text: &str) -> Result<Vec<String>, TransportError> {
    let reply: RelayReply =
        serde_json::from_str(text).map_err(|e| TransportError::Network(e.to_string()))?;

    if !success {
        let message = reply
            .error
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| SERVER_ERROR_FALLBACK.to_string());
        tracing::warn!("❌ relay error: {}", message);
        return Err(TransportError::Server(message));
    }

    match reply.images {
        Some(images) if !images.is_empty() => Ok(images),
        _ => Err(TransportError::EmptyResult),
    }
}
