use lambda_http::{
    http::{Method, StatusCode},
    Body, Error, Request, Response,
};
use std::sync::Arc;
use ubah_atoms::generation;
use ubah_shared::{config, AppState, ConfigError, RelayConfig};

use lambda_http::http::header::{HeaderValue, VARY};

pub(crate) const GENERATE_PATH: &str = "/api/generate";

fn with_cors_headers(mut resp: Response<Body>, allow_origin: &str) -> Response<Body> {
    let headers = resp.headers_mut();
    headers.insert(
        "Access-Control-Allow-Origin",
        HeaderValue::from_str(allow_origin).unwrap_or_else(|_| HeaderValue::from_static("*")),
    );
    headers.insert(
        "Access-Control-Allow-Methods",
        HeaderValue::from_static("POST,OPTIONS"),
    );
    headers.insert(
        "Access-Control-Allow-Headers",
        HeaderValue::from_static("Content-Type"),
    );
    headers.append(VARY, HeaderValue::from_static("Origin"));

    resp
}

fn finalize_response(
    resp: Result<Response<Body>, Error>,
    allow_origin: &str,
) -> Result<Response<Body>, Error> {
    resp.map(|r| with_cors_headers(r, allow_origin))
}

/// Main Lambda handler - reads configuration for this invocation and routes.
pub(crate) async fn function_handler(
    event: Request,
    state: Arc<AppState>,
) -> Result<Response<Body>, Error> {
    route(event, &state, RelayConfig::from_env(), &config::cors_allow_origin()).await
}

/// Routing with configuration passed in, so every branch is reachable from tests.
pub(crate) async fn route(
    event: Request,
    state: &AppState,
    relay_config: Result<RelayConfig, ConfigError>,
    allow_origin: &str,
) -> Result<Response<Body>, Error> {
    let method = event.method();
    let path = event.uri().path();
    let request_id = uuid::Uuid::new_v4();
    tracing::info!(
        "🚀 Relay invoked - request_id: {} Method: {} Path: {}",
        request_id,
        method,
        path
    );

    // Handle CORS preflight
    if method == Method::OPTIONS {
        let resp = Response::builder()
            .status(StatusCode::OK)
            .body(Body::Empty)
            .map_err(Box::new)?;
        return Ok(with_cors_headers(resp, allow_origin));
    }

    if path != GENERATE_PATH {
        return finalize_response(not_found(), allow_origin);
    }

    if method != Method::POST {
        let resp = Response::builder()
            .status(StatusCode::METHOD_NOT_ALLOWED)
            .header("Content-Type", "application/json")
            .header("Allow", "POST")
            .body(
                serde_json::json!({"message": "Method Not Allowed"})
                    .to_string()
                    .into(),
            )
            .map_err(Box::new)?;
        return finalize_response(Ok(resp), allow_origin);
    }

    let relay_config = match relay_config {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("❌ request_id: {} configuration error: {}", request_id, e);
            let resp = Response::builder()
                .status(StatusCode::INTERNAL_SERVER_ERROR)
                .header("Content-Type", "application/json")
                .body(serde_json::json!({"error": e.to_string()}).to_string().into())
                .map_err(Box::new)?;
            return finalize_response(Ok(resp), allow_origin);
        }
    };

    let provider = state.provider(&relay_config);
    let resp = generation::generate_handler(&provider, event.body()).await;
    if let Ok(r) = &resp {
        tracing::info!("📤 request_id: {} status: {}", request_id, r.status());
    }
    finalize_response(resp, allow_origin)
}

fn not_found() -> Result<Response<Body>, Error> {
    Ok(Response::builder()
        .status(StatusCode::NOT_FOUND)
        .header("Content-Type", "application/json")
        .body(serde_json::json!({"error": "Not found"}).to_string().into())
        .map_err(Box::new)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn state() -> AppState {
        AppState::new().unwrap()
    }

    fn request(method: Method, path: &str, body: Body) -> Request {
        lambda_http::http::Request::builder()
            .method(method)
            .uri(path)
            .body(body)
            .unwrap()
    }

    fn body_of(resp: &Response<Body>) -> Value {
        serde_json::from_slice(resp.body()).unwrap()
    }

    fn configured() -> Result<RelayConfig, ConfigError> {
        RelayConfig::from_lookup(|key| (key == "API_KEY").then(|| "test-key".to_string()))
    }

    #[tokio::test]
    async fn preflight_gets_cors_headers() {
        let resp = route(request(Method::OPTIONS, GENERATE_PATH, Body::Empty), &state(), configured(), "*")
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()["Access-Control-Allow-Origin"], "*");
        assert_eq!(resp.headers()["Access-Control-Allow-Methods"], "POST,OPTIONS");
    }

    #[tokio::test]
    async fn non_post_is_method_not_allowed() {
        let resp = route(request(Method::GET, GENERATE_PATH, Body::Empty), &state(), configured(), "*")
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body_of(&resp), json!({ "message": "Method Not Allowed" }));
    }

    #[tokio::test]
    async fn unknown_path_is_not_found() {
        let resp = route(request(Method::POST, "/api/other", Body::Empty), &state(), configured(), "*")
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn missing_api_key_is_a_server_error() {
        let body = Body::from(
            json!({ "image": null, "settings": { "prompt": "x" }, "menuKey": "generate-image" })
                .to_string(),
        );
        let resp = route(
            request(Method::POST, GENERATE_PATH, body),
            &state(),
            Err(ConfigError::MissingApiKey),
            "https://ubah-foto.example",
        )
        .await
        .unwrap();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_of(&resp),
            json!({ "error": "Kunci API Gemini tidak dikonfigurasi di server." })
        );
        assert_eq!(
            resp.headers()["Access-Control-Allow-Origin"],
            "https://ubah-foto.example"
        );
    }

    #[tokio::test]
    async fn validation_errors_are_answered_without_calling_the_provider() {
        // The provider points at the real API; a 400 here proves no call was made.
        let body = Body::from(
            json!({ "image": null, "settings": {}, "menuKey": "generate-image" }).to_string(),
        );
        let resp = route(request(Method::POST, GENERATE_PATH, body), &state(), configured(), "*")
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_of(&resp),
            json!({ "error": "Silakan masukkan prompt untuk membuat gambar." })
        );
    }
}
