//! Gemini `generateContent` client.

use std::time::Instant;

use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::config::StudioConfig;
use crate::error::{BrandError, ErrorCode, Result};
use crate::media::DataUri;

use super::backend::{ModelBackend, ModelRequest, ModelResponse, OutputKind, Part};

/// Longest slice of an error body quoted in an error message.
const MAX_ERROR_BODY: usize = 512;

/// REST client for the Gemini API.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: Client,
    api_base: String,
    api_key: String,
}

impl GeminiClient {
    /// Creates a client from the studio configuration.
    ///
    /// Fails with `CONFIG_INVALID` when no API key is configured.
    pub fn new(config: &StudioConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| BrandError::config_invalid("No model API key configured"))?;
        Ok(Self::with_base_url(api_key, &config.api_base))
    }

    /// Creates a client against an explicit base URL.
    pub fn with_base_url(api_key: impl Into<String>, api_base: &str) -> Self {
        Self {
            http: Client::new(),
            api_base: api_base.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.api_base, model)
    }
}

impl ModelBackend for GeminiClient {
    async fn generate(&self, request: ModelRequest) -> Result<ModelResponse> {
        let start = Instant::now();
        let body = request_body(&request);

        tracing::debug!(
            flow = request.flow,
            model = %request.model,
            output = request.output.as_str(),
            "calling model"
        );

        let resp = self
            .http
            .post(self.endpoint(&request.model))
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                BrandError::with_source(
                    ErrorCode::RemoteCallFailed,
                    format!("Request to model {} failed", request.model),
                    e,
                )
            })?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            tracing::warn!(flow = request.flow, status = status.as_u16(), "model call rejected");
            return Err(BrandError::remote_call_failed(format!(
                "HTTP {} from model {}: {}",
                status.as_u16(),
                request.model,
                error_message(&text)
            )));
        }

        let api_resp: GenerateContentResponse = resp.json().await.map_err(|e| {
            BrandError::with_source(
                ErrorCode::RemoteCallFailed,
                format!("Undecodable response from model {}", request.model),
                e,
            )
        })?;

        let response = api_resp.into_model_response()?;
        tracing::info!(
            flow = request.flow,
            model = %request.model,
            elapsed_ms = start.elapsed().as_millis() as u64,
            has_text = response.text.is_some(),
            has_media = response.media.is_some(),
            "model call complete"
        );
        Ok(response)
    }
}

/// Builds the `generateContent` body for a request.
pub(crate) fn request_body(request: &ModelRequest) -> Value {
    let parts: Vec<Value> = request
        .parts
        .iter()
        .map(|part| match part {
            Part::Text(text) => json!({ "text": text }),
            Part::Media(uri) => json!({
                "inlineData": { "mimeType": uri.mime(), "data": uri.payload() }
            }),
        })
        .collect();

    let generation_config = match &request.output {
        OutputKind::Json(schema) => json!({
            "responseMimeType": "application/json",
            "responseSchema": schema.to_json(),
        }),
        OutputKind::Image => json!({ "responseModalities": ["TEXT", "IMAGE"] }),
        OutputKind::Speech { voice } => json!({
            "responseModalities": ["AUDIO"],
            "speechConfig": {
                "voiceConfig": { "prebuiltVoiceConfig": { "voiceName": voice } }
            },
        }),
    };

    json!({
        "contents": [{ "role": "user", "parts": parts }],
        "generationConfig": generation_config,
    })
}

fn error_message(body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorEnvelope {
        error: ErrorDetail,
    }
    #[derive(Deserialize)]
    struct ErrorDetail {
        message: String,
    }

    if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) {
        return envelope.error.message;
    }
    let mut end = body.len().min(MAX_ERROR_BODY);
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    body[..end].to_string()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponsePart {
    text: Option<String>,
    inline_data: Option<InlineData>,
    #[serde(default)]
    thought: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Joins the text parts of the first candidate and keeps its first
    /// inline media part.
    fn into_model_response(self) -> Result<ModelResponse> {
        let Some(candidate) = self.candidates.into_iter().next() else {
            let reason = self
                .prompt_feedback
                .and_then(|f| f.block_reason)
                .unwrap_or_else(|| "no candidates".to_string());
            return Err(BrandError::remote_call_failed(format!(
                "model returned no answer ({})",
                reason
            )));
        };

        let mut text = String::new();
        let mut media = None;
        for part in candidate.content.map(|c| c.parts).unwrap_or_default() {
            if part.thought {
                continue;
            }
            if let Some(t) = part.text {
                text.push_str(&t);
            }
            if media.is_none() {
                media = part
                    .inline_data
                    .map(|d| DataUri::from_base64(d.mime_type, d.data));
            }
        }

        Ok(ModelResponse {
            text: (!text.is_empty()).then_some(text),
            media,
        })
    }
}
