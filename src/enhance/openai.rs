//! OpenAI `chat/completions` client. Thin HTTP wrapper; pure parsing in
//! `parse_response` for testability.

#[cfg(test)]
#[path = "openai_test.rs"]
mod openai_test;

use super::{EnhanceError, SYSTEM_PROMPT, TEMPERATURE, http_client, user_prompt};

const API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Plenty for a 25-word phrase.
const MAX_TOKENS: u32 = 100;

// =============================================================================
// CLIENT
// =============================================================================

pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

impl OpenAiClient {
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(api_key: String, model: String) -> Result<Self, EnhanceError> {
        Ok(Self { http: http_client()?, api_key, model })
    }

    /// # Errors
    ///
    /// Returns an [`EnhanceError`] if the request fails, the provider
    /// returns a non-success status, or the response carries no text.
    pub async fn rewrite(&self, input: &str) -> Result<String, EnhanceError> {
        let prompt = user_prompt(input);
        let body = ApiRequest {
            model: &self.model,
            messages: vec![
                RequestMessage { role: "system", content: SYSTEM_PROMPT },
                RequestMessage { role: "user", content: &prompt },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let response = self
            .http
            .post(API_URL)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| EnhanceError::ApiRequest(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| EnhanceError::ApiRequest(e.to_string()))?;

        if status != 200 {
            return Err(EnhanceError::ApiResponse { status, body: text });
        }

        parse_response(&text)
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(serde::Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    messages: Vec<RequestMessage<'a>>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(serde::Serialize)]
struct RequestMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(serde::Deserialize)]
struct ApiResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(serde::Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(serde::Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

// =============================================================================
// PARSING
// =============================================================================

pub(crate) fn parse_response(json: &str) -> Result<String, EnhanceError> {
    let api: ApiResponse = serde_json::from_str(json).map_err(|e| EnhanceError::ApiParse(e.to_string()))?;

    let text = api
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(EnhanceError::ApiParse("no text in first choice".into()));
    }
    Ok(text)
}
