pub type LanguageCode = String;

/// Single-text translation provider
#[async_trait::async_trait]
pub trait Translator: Send + Sync {
    /// Translate text from source to target language
    async fn translate(
        &self,
        text: &str,
        from: LanguageCode,
        to: LanguageCode,
    ) -> Result<Translation, TranslateError>;

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

/// Provider that translates many texts in one request
#[async_trait::async_trait]
pub trait BatchTranslator: Send + Sync {
    /// Translate `texts`; the result is aligned by index and may be shorter
    /// than the input when the service drops trailing lines.
    async fn translate_batch(
        &self,
        texts: &[String],
        from: LanguageCode,
        to: LanguageCode,
    ) -> Result<Vec<String>, TranslateError>;

    fn metadata(&self) -> ProviderMetadata;
}

#[derive(Debug, Clone)]
pub struct Translation {
    pub text: String,
    pub provider: String,
    pub alternatives: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
}

#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("No translation in response")]
    EmptyResponse,
}

impl TranslateError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, TranslateError::NetworkError(e) if e.is_timeout())
    }
}
