//! JSON-RPC method handlers.
//!
//! Implements the handlers for all supported JSON-RPC methods.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::audio::{header_len, pcm_duration, pcm_to_wav_data_uri};
use crate::brand::TEMPLATES;
use crate::error::{BrandError, Result as BrandResult};
use crate::flows::apply_brand_to_template;
use crate::model::ModelBackend;
use crate::studio::Studio;
use crate::theme::Theme;

use super::server::ServerState;
use super::types::{
    EncodeWavParams, EncodeWavResult, JsonRpcError, ListTemplatesResult, ThemeParams,
};

type MethodResult = Result<Value, JsonRpcError>;

/// Handles a JSON-RPC method call.
pub async fn handle_request<B: ModelBackend>(
    method: &str,
    params: Value,
    state: &ServerState<B>,
) -> MethodResult {
    match method {
        "ping" => handle_ping(),
        "shutdown" => handle_shutdown(state),
        "theme" => handle_theme(params),
        "encode_wav" => handle_encode_wav(params),
        "list_templates" => to_result(ListTemplatesResult {
            templates: &TEMPLATES,
        }),
        "apply_template" => {
            let input = parse_params(params)?;
            respond(apply_brand_to_template(&state.config, &input))
        }
        "extract_brand" => {
            let input = parse_params(params)?;
            respond(studio(state)?.extract_brand(&input).await)
        }
        "brand_kit" => {
            let input = parse_params(params)?;
            respond(studio(state)?.brand_kit(&input).await)
        }
        "social_posts" => {
            let input = parse_params(params)?;
            respond(studio(state)?.social_posts(&input).await)
        }
        "social_headers" => {
            let input = parse_params(params)?;
            respond(studio(state)?.social_headers(&input).await)
        }
        "generate_logo" => {
            let input = parse_params(params)?;
            respond(studio(state)?.generate_logo(&input).await)
        }
        "branded_asset" => {
            let input = parse_params(params)?;
            respond(studio(state)?.branded_asset(&input).await)
        }
        "mockup" => {
            let input = parse_params(params)?;
            respond(studio(state)?.mockup(&input).await)
        }
        "brand_guidelines" => {
            let input = parse_params(params)?;
            respond(studio(state)?.brand_guidelines(&input).await)
        }
        "jingle" => {
            let input = parse_params(params)?;
            respond(studio(state)?.jingle(&input).await)
        }
        "brand_chat" => {
            let input = parse_params(params)?;
            respond(studio(state)?.brand_chat(&input).await)
        }
        _ => Err(JsonRpcError::method_not_found(method)),
    }
}

/// Handles the ping method for health checks.
fn handle_ping() -> MethodResult {
    Ok(serde_json::json!({ "status": "ok" }))
}

/// Handles the shutdown method.
fn handle_shutdown<B: ModelBackend>(state: &ServerState<B>) -> MethodResult {
    state.shutdown();
    Ok(serde_json::json!({ "status": "shutting_down" }))
}

/// Derives theme variables from a brand profile. Never fails on colors;
/// unusable palette entries fall back to defaults.
fn handle_theme(params: Value) -> MethodResult {
    let params: ThemeParams = parse_params(params)?;
    to_result(Theme::from_profile(&params.brand_info).declaration())
}

/// Wraps base64 PCM in a WAV container.
fn handle_encode_wav(params: Value) -> MethodResult {
    let params: EncodeWavParams = parse_params(params)?;
    let spec = params.spec();
    let pcm = STANDARD
        .decode(params.pcm_base64.trim())
        .map_err(|e| BrandError::invalid_audio(format!("pcmBase64 is not valid base64: {}", e)))?;

    let wav_data_uri = pcm_to_wav_data_uri(&pcm, spec)?;
    to_result(EncodeWavResult {
        wav_data_uri,
        header_len: header_len(&spec),
        data_len: pcm.len(),
        duration_sec: pcm_duration(pcm.len(), &spec)?,
    })
}

/// Returns the studio, or a configuration error when model methods are disabled.
fn studio<B: ModelBackend>(state: &ServerState<B>) -> Result<&Studio<B>, JsonRpcError> {
    state.studio.as_ref().ok_or_else(|| {
        BrandError::config_invalid("no API key configured; model methods are unavailable").into()
    })
}

fn parse_params<T: DeserializeOwned>(params: Value) -> Result<T, JsonRpcError> {
    serde_json::from_value(params)
        .map_err(|e| JsonRpcError::invalid_params(format!("Invalid params: {}", e)))
}

fn respond<T: Serialize>(result: BrandResult<T>) -> MethodResult {
    to_result(result?)
}

fn to_result<T: Serialize>(value: T) -> MethodResult {
    serde_json::to_value(value)
        .map_err(|e| JsonRpcError::internal_error(format!("Failed to encode result: {}", e)))
}
