use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::GenAiConfig;

/// Anything that can turn a prompt into a text completion.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}

// ==================================================
// WIRE TYPES (generateContent)
// ==================================================

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
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
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PromptFeedback {
    #[serde(rename = "blockReason")]
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

// ==================================================
// CLIENT
// ==================================================

/// Gemini `generateContent` client, built once from config and reused.
#[derive(Clone)]
pub struct GenAiClient {
    client: Client,
    pub api_url: String,
    pub model: String,
    api_key: String,
}

impl GenAiClient {
    pub fn new(config: &GenAiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key(),
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_url, self.model)
    }
}

#[async_trait]
impl CompletionProvider for GenAiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let body = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        info!("🧠 Asking {} ({} prompt chars)", self.model, prompt.len());

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            bail!("{}", api_error_message(status.as_u16(), &text));
        }

        parse_completion(&text)
    }
}

/// Concatenated text of the first candidate.
fn parse_completion(body: &str) -> Result<String> {
    let parsed: GenerateResponse =
        serde_json::from_str(body).context("Malformed completion response")?;

    let candidate = match parsed.candidates.into_iter().next() {
        Some(c) => c,
        None => {
            let reason = parsed
                .prompt_feedback
                .and_then(|f| f.block_reason)
                .unwrap_or_else(|| "no candidates returned".to_string());
            bail!("Completion blocked: {}", reason);
        }
    };

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.is_empty() {
        return Err(anyhow!(
            "Completion has no text (finish reason: {})",
            candidate.finish_reason.as_deref().unwrap_or("unknown")
        ));
    }

    debug!("🧠 Completion: {} chars", text.len());
    Ok(text)
}

fn api_error_message(status: u16, body: &str) -> String {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(e) => format!("[{}] {}", status, e.error.message),
        Err(_) if body.trim().is_empty() => format!("[{}] completion request failed", status),
        Err(_) => format!("[{}] {}", status, body.trim()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_all_parts_of_first_candidate() {
        let body = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "Here:\n"}, {"text": "done"}], "role": "model"},
                 "finishReason": "STOP"},
                {"content": {"parts": [{"text": "ignored"}]}}
            ]
        }"#;
        assert_eq!(parse_completion(body).unwrap(), "Here:\ndone");
    }

    #[test]
    fn blocked_prompt_is_an_error() {
        let body = r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#;
        let err = parse_completion(body).unwrap_err();
        assert!(err.to_string().contains("SAFETY"));
    }

    #[test]
    fn empty_candidate_is_an_error() {
        let body = r#"{"candidates": [{"finishReason": "MAX_TOKENS"}]}"#;
        let err = parse_completion(body).unwrap_err();
        assert!(err.to_string().contains("MAX_TOKENS"));
    }

    #[test]
    fn garbage_is_malformed() {
        assert!(parse_completion("<html>").is_err());
    }

    #[test]
    fn api_errors_surface_their_message() {
        let body = r#"{"error": {"code": 400, "message": "API key not valid.", "status": "INVALID_ARGUMENT"}}"#;
        assert_eq!(api_error_message(400, body), "[400] API key not valid.");
        assert_eq!(api_error_message(502, ""), "[502] completion request failed");
        assert_eq!(api_error_message(503, "busy\n"), "[503] busy");
    }

    #[test]
    fn endpoint_uses_model_path() {
        let mut cfg = crate::config::Config::default().genai;
        cfg.api_url = "https://example.test/v1beta/".into();
        cfg.api_key = Some("k".into());
        let client = GenAiClient::new(&cfg).unwrap();
        assert_eq!(
            client.endpoint(),
            "https://example.test/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }
}
