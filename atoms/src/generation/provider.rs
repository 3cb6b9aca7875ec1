use super::model::{GenerateError, TextToImageRequest, TransformRequest};
use std::future::Future;

/// Seam to the external generative-image service.
///
/// Both calls return base64 image payloads in provider order. An empty vector is
/// allowed here; the dispatcher decides that it is a failure.
pub trait ImageProvider {
    fn generate_images(
        &self,
        request: &TextToImageRequest,
    ) -> impl Future<Output = Result<Vec<String>, GenerateError>> + Send;

    fn transform_image(
        &self,
        request: &TransformRequest,
    ) -> impl Future<Output = Result<Vec<String>, GenerateError>> + Send;
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Canned provider that counts how often it is called.
    pub(crate) struct FakeProvider {
        pub outcome: Result<Vec<String>, GenerateError>,
        pub calls: AtomicUsize,
    }

    impl FakeProvider {
        pub(crate) fn returning(images: &[&str]) -> Self {
            Self {
                outcome: Ok(images.iter().map(|s| s.to_string()).collect()),
                calls: AtomicUsize::new(0),
            }
        }

        pub(crate) fn failing(err: GenerateError) -> Self {
            Self {
                outcome: Err(err),
                calls: AtomicUsize::new(0),
            }
        }

        pub(crate) fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl ImageProvider for FakeProvider {
        async fn generate_images(
            &self,
            _request: &TextToImageRequest,
        ) -> Result<Vec<String>, GenerateError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outcome.clone()
        }

        async fn transform_image(
            &self,
            _request: &TransformRequest,
        ) -> Result<Vec<String>, GenerateError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outcome.clone()
        }
    }
}
