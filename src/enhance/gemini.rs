//! Gemini `generateContent` client. Thin HTTP wrapper; pure parsing in
//! `parse_response` for testability.

#[cfg(test)]
#[path = "gemini_test.rs"]
mod gemini_test;

use super::{EnhanceError, SYSTEM_PROMPT, TEMPERATURE, http_client, user_prompt};

const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

// =============================================================================
// CLIENT
// =============================================================================

pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
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
            system_instruction: RequestContent { parts: vec![RequestPart { text: SYSTEM_PROMPT }] },
            contents: vec![RequestContent { parts: vec![RequestPart { text: &prompt }] }],
            generation_config: GenerationConfig { temperature: TEMPERATURE },
        };

        let url = format!("{API_BASE_URL}/{}:generateContent", self.model);
        let response = self
            .http
            .post(url)
            .header("x-goog-api-key", &self.api_key)
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
    #[serde(rename = "systemInstruction")]
    system_instruction: RequestContent<'a>,
    contents: Vec<RequestContent<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(serde::Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(serde::Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(serde::Serialize)]
struct GenerationConfig {
    temperature: f64,
}

#[derive(serde::Deserialize)]
struct ApiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(serde::Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(serde::Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(serde::Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

// =============================================================================
// PARSING
// =============================================================================

pub(crate) fn parse_response(json: &str) -> Result<String, EnhanceError> {
    let api: ApiResponse = serde_json::from_str(json).map_err(|e| EnhanceError::ApiParse(e.to_string()))?;

    let text: String = api
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .map(|p| p.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(EnhanceError::ApiParse("no text in first candidate".into()));
    }
    Ok(text)
}
