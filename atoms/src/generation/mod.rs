// Re-export model types and service functions
pub mod model;
pub mod provider;
pub mod service;
pub mod http;

pub use model::{
    ErrorBody, GenerateError, GenerateRequestBody, GenerateResponseBody, GenerationRequest,
    TextToImageRequest, TransformRequest,
};
pub use provider::ImageProvider;
pub use service::*;
pub use http::*;
