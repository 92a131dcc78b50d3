use super::*;

/// One call to the text-generation service.
#[derive(Debug, Clone, Copy)]
pub struct GenerationRequest<'a> {
    pub model: &'a str,
    pub system_instruction: &'a str,
    pub prompt: &'a str,
}

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("rate limited by generation service: {message}")]
    RateLimited { message: String },

    #[error("maximum number of retries ({max_retries}) exceeded; last error: {last_error}")]
    RetriesExhausted { max_retries: u32, last_error: String },

    #[error("generation service returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("request to generation service failed: {message}")]
    Transport { message: String },

    #[error("invalid response from generation service: {message}")]
    ResponseParse { message: String },

    #[error("generation service returned no text")]
    EmptyResponse,
}

impl GenerationError {
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }
}

/// Capability the classifier depends on; the production implementation is
/// [`GeminiClient`], tests substitute in-process stubs.
pub trait TextGenerator {
    fn generate(&self, request: &GenerationRequest<'_>) -> Result<String, GenerationError>;
}

impl<T: TextGenerator + ?Sized> TextGenerator for &T {
    fn generate(&self, request: &GenerationRequest<'_>) -> Result<String, GenerationError> {
        (**self).generate(request)
    }
}
