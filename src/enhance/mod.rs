//! Text enhancement — rewriting a message into a short vintage phrase before
//! printing.
//!
//! One polymorphic capability with swappable backing providers: the
//! [`Enhancer`] trait is the provider surface (mockable in tests), the
//! [`EnhanceClient`] enum dispatches to Gemini or OpenAI based on
//! environment configuration, and [`enhance`] is the only entry point the
//! rest of the crate uses. `enhance` never fails: every provider error is
//! absorbed into the fallback policy, so callers always get printable text.
//!
//! The fallback is deliberately asymmetric. When the user submitted text and
//! the rewrite failed, the original text prints unchanged; only when the user
//! asked for a surprise on an empty input does the fixed default phrase
//! appear.


pub mod gemini;
pub mod openai;

use std::time::Duration;

/// Default phrase printed when generation fails for an empty input.
pub const DEFAULT_QUOTE: &str = "见花欢喜，见你更甚。";

/// Shared persona instruction sent to every provider.
pub(crate) const SYSTEM_PROMPT: &str = "You are a vintage typewriter spirit dwelling in an antique shop. \
Your task is to produce short, warm, positive, and poetic phrases (max 25 words).\n\
\n\
Guidelines:\n\
1. Tone: Nostalgic, elegant, uplifting, gentle, literary.\n\
2. Style: Like a line from a classic poem, a warm greeting, or a gentle observation of nature.\n\
3. Language Rules:\n\
   - IF INPUT IS PROVIDED: Rewrite it in the SAME language (e.g., input Chinese -> output Chinese).\n\
   - IF INPUT IS EMPTY: Generate a quote in CHINESE (Simplified).\n\
4. Content: Focus on themes like sunshine, flowers, slow living, serendipity, and love.\n\
5. Key Examples (Chinese): \"见花欢喜，见你更甚\", \"满怀热忱，奔赴山海\", \"生活明朗，万物可爱\", \"且把岁月温柔以此\".\n\
\n\
Output ONLY the final text string. No quotes around the output unless part of the style.";

const GENERATE_PROMPT: &str = "Generate a short, beautiful, positive vintage quote in Chinese.";

/// Sampling temperature; high for creative variety.
pub(crate) const TEMPERATURE: f64 = 1.1;

const REQUEST_TIMEOUT_SECS: u64 = 30;
const CONNECT_TIMEOUT_SECS: u64 = 10;

const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_OPENAI_MODEL: &str = "gpt-4o";

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced inside the enhancement boundary. Never escape [`enhance`].
#[derive(Debug, thiserror::Error)]
pub enum EnhanceError {
    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    ConfigParse(String),

    /// The required API key environment variable is not set.
    #[error("missing API key: env var {var} not set")]
    MissingApiKey { var: String },

    /// The HTTP request to the provider failed.
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// The provider returned a non-success HTTP status.
    #[error("API response error: status {status}")]
    ApiResponse { status: u16, body: String },

    /// The provider response body could not be deserialized.
    #[error("API response parse failed: {0}")]
    ApiParse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

// =============================================================================
// PROVIDER SURFACE
// =============================================================================

/// Provider-neutral async trait for text rewriting. Enables mocking in tests.
#[async_trait::async_trait]
pub trait Enhancer: Send + Sync {
    /// Ask the provider for a vintage rewrite of `input` (or a fresh quote
    /// when `input` is blank).
    ///
    /// # Errors
    ///
    /// Returns an [`EnhanceError`] if the request fails or the response is
    /// malformed. Callers go through [`enhance`], which absorbs these.
    async fn rewrite(&self, input: &str) -> Result<String, EnhanceError>;
}

/// Configured enhancement provider.
pub enum EnhanceClient {
    Gemini(gemini::GeminiClient),
    OpenAi(openai::OpenAiClient),
}

impl EnhanceClient {
    /// Build an enhancement client from environment variables.
    ///
    /// - `ENHANCE_PROVIDER`: `gemini` (default) or `openai`
    /// - `GEMINI_API_KEY` / `OPENAI_API_KEY`: provider API key
    /// - `ENHANCE_MODEL`: provider default when absent
    ///
    /// # Errors
    ///
    /// Returns an error if the provider is unknown, the API key is missing,
    /// or the HTTP client fails to build.
    pub fn from_env() -> Result<Self, EnhanceError> {
        let provider = std::env::var("ENHANCE_PROVIDER").unwrap_or_else(|_| "gemini".into());
        match provider.as_str() {
            "gemini" => {
                let api_key = require_env("GEMINI_API_KEY")?;
                let model = std::env::var("ENHANCE_MODEL").unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.into());
                Ok(Self::Gemini(gemini::GeminiClient::new(api_key, model)?))
            }
            "openai" => {
                let api_key = require_env("OPENAI_API_KEY")?;
                let model = std::env::var("ENHANCE_MODEL").unwrap_or_else(|_| DEFAULT_OPENAI_MODEL.into());
                Ok(Self::OpenAi(openai::OpenAiClient::new(api_key, model)?))
            }
            other => Err(EnhanceError::ConfigParse(format!("unknown ENHANCE_PROVIDER: {other}"))),
        }
    }
}

#[async_trait::async_trait]
impl Enhancer for EnhanceClient {
    async fn rewrite(&self, input: &str) -> Result<String, EnhanceError> {
        match self {
            Self::Gemini(c) => c.rewrite(input).await,
            Self::OpenAi(c) => c.rewrite(input).await,
        }
    }
}

// =============================================================================
// ABSORBING ENTRY POINT
// =============================================================================

/// Rewrite `input` through `enhancer`, absorbing every failure.
///
/// Always resolves to non-empty printable text: a successful rewrite is
/// returned trimmed; a failed or blank rewrite falls back to the raw input
/// text, or to [`DEFAULT_QUOTE`] when the input itself was blank.
pub async fn enhance(enhancer: &dyn Enhancer, input: &str) -> String {
    match enhancer.rewrite(input).await {
        Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
        Ok(_) => {
            tracing::warn!("enhancement returned blank text, using fallback");
            fallback(input)
        }
        Err(e) => {
            tracing::warn!(error = %e, "enhancement failed, using fallback");
            fallback(input)
        }
    }
}

fn fallback(input: &str) -> String {
    if input.trim().is_empty() {
        DEFAULT_QUOTE.to_string()
    } else {
        input.to_string()
    }
}

// =============================================================================
// SHARED HELPERS
// =============================================================================

/// Build the user-turn prompt for `input`: a rewrite request, or a
/// generate-from-nothing request when the input is blank.
pub(crate) fn user_prompt(input: &str) -> String {
    if input.trim().is_empty() {
        GENERATE_PROMPT.to_string()
    } else {
        format!(
            "Rewrite the following text to be more poetic, vintage, and positive, \
             while keeping the original meaning: \"{input}\""
        )
    }
}

pub(crate) fn http_client() -> Result<reqwest::Client, EnhanceError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .build()
        .map_err(|e| EnhanceError::HttpClientBuild(e.to_string()))
}

fn require_env(var: &str) -> Result<String, EnhanceError> {
    std::env::var(var).map_err(|_| EnhanceError::MissingApiKey { var: var.into() })
}
