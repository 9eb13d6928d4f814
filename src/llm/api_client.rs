use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{Completion, GenerationConfig};
use crate::config::Config;

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Client for the Gemini `generateContent` REST endpoint.
#[derive(Clone)]
pub struct APIClient {
    client: Client,
    model: String,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: RequestGenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct RequestGenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(rename = "promptFeedback")]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PromptFeedback {
    #[serde(rename = "blockReason")]
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
    status: Option<String>,
    code: Option<i64>,
}

impl APIClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("llm-qa/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to build HTTP client")?;

        Ok(APIClient {
            client,
            model: config.model.clone(),
            base_url: config.base_url.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        let model_path = if self.model.starts_with("models/") {
            self.model.clone()
        } else {
            format!("models/{}", self.model)
        };
        format!(
            "{}/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            model_path
        )
    }
}

#[async_trait]
impl Completion for APIClient {
    async fn complete(
        &self,
        prompt: &str,
        credential: &str,
        generation: &GenerationConfig,
    ) -> Result<String> {
        let request = GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: RequestGenerationConfig {
                temperature: generation.temperature,
                max_output_tokens: generation.max_output_tokens,
            },
        };

        let endpoint = self.endpoint();
        debug!("POST {} (prompt {} chars)", endpoint, prompt.len());

        let response = self
            .client
            .post(endpoint.as_str())
            .header(API_KEY_HEADER, credential)
            .json(&request)
            .send()
            .await
            .context("request to Gemini failed")?;

        let status = response.status();
        let payload = response
            .text()
            .await
            .context("failed to read Gemini response body")?;
        if !status.is_success() {
            return Err(anyhow!(
                "Gemini API error ({}): {}",
                status,
                extract_api_error(&payload)
            ));
        }

        parse_answer(&payload)
    }
}

fn parse_answer(payload: &str) -> Result<String> {
    let parsed: GenerateResponse =
        serde_json::from_str(payload).context("failed to parse Gemini response JSON")?;

    let text: String = parsed
        .candidates
        .first()
        .and_then(|candidate| candidate.content.as_ref())
        .map(|content| {
            content
                .parts
                .iter()
                .filter_map(|part| part.text.as_deref())
                .collect()
        })
        .unwrap_or_default();

    if text.is_empty() {
        let reason = parsed
            .prompt_feedback
            .and_then(|feedback| feedback.block_reason)
            .map(|reason| format!(" (blocked: {})", reason))
            .unwrap_or_default();
        return Err(anyhow!("no text candidate returned from Gemini{}", reason));
    }

    Ok(text)
}

fn extract_api_error(body: &str) -> String {
    if let Ok(ErrorEnvelope { error: Some(err) }) = serde_json::from_str::<ErrorEnvelope>(body) {
        let message = err.message.unwrap_or_else(|| "unknown error".to_string());
        let status = err.status.unwrap_or_else(|| "unknown".to_string());
        let code = err
            .code
            .map(|value| value.to_string())
            .unwrap_or_else(|| "none".to_string());
        return format!("{} (status={}, code={})", message, status, code);
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        "empty response body".to_string()
    } else {
        trimmed.to_string()
    }
}
