use lambda_http::{http::StatusCode, Body, Error as LambdaError, Response};
use serde::Serialize;

use super::model::{ErrorBody, GenerateRequestBody, GenerateResponseBody};
use super::provider::ImageProvider;
use super::service::{build_request, dispatch};

fn json_response<T: Serialize>(status: StatusCode, payload: &T) -> Result<Response<Body>, LambdaError> {
    Ok(Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(serde_json::to_string(payload)?.into())
        .map_err(Box::new)?)
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Result<Response<Body>, LambdaError> {
    json_response(status, &ErrorBody { error: message.into() })
}

/// HTTP Handler: POST /api/generate
///
/// The provider is passed in; configuration checks happen before this is called.
pub async fn generate_handler<P: ImageProvider + Sync>(
    provider: &P,
    body: &[u8],
) -> Result<Response<Body>, LambdaError> {
    // Step A: Convert Raw Bytes -> Rust Struct
    let req: GenerateRequestBody = match serde_json::from_slice(body) {
        Ok(req) => req,
        Err(e) => {
            tracing::warn!("⚠️ generate_handler: unreadable body ({} bytes): {}", body.len(), e);
            return error_response(StatusCode::BAD_REQUEST, format!("Permintaan tidak valid: {}", e));
        }
    };

    let menu_key = req.menu_key;
    tracing::info!(
        "📥 generate_handler: menu_key={}, has_image={}",
        menu_key,
        req.image.is_some()
    );

    // Step B: validate and compose the provider request
    let request = match build_request(menu_key, &req.settings, req.image) {
        Ok(request) => request,
        Err(e) => {
            tracing::info!("🚫 generate_handler rejected: menu_key={}, reason={}", menu_key, e);
            return error_response(StatusCode::BAD_REQUEST, e.message());
        }
    };

    // Step C: one call to the provider
    match dispatch(provider, &request).await {
        Ok(images) => {
            tracing::info!(
                "✅ generate_handler success: menu_key={}, images={}",
                menu_key,
                images.len()
            );
            json_response(StatusCode::OK, &GenerateResponseBody { images })
        }
        Err(e) => {
            tracing::error!("❌ generate_handler failed: menu_key={}, error={}", menu_key, e);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Gagal menghasilkan gambar: {}", e),
            )
        }
    }
}
