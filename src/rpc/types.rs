//! JSON-RPC types for the studio protocol.
//!
//! Flow methods take the flow's own input record as `params` and return its
//! output record as `result`; only the local methods have dedicated types
//! here.

use serde::{Deserialize, Serialize};

use crate::audio::PcmSpec;
use crate::brand::{BrandProfile, Template};
use crate::error::{BrandError, ErrorCode};
use crate::media::DataUri;
use crate::schema::Violation;

/// JSON-RPC version constant.
pub const JSONRPC_VERSION: &str = "2.0";

/// A JSON-RPC request ID.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RequestId {
    Integer(i64),
    String(String),
}

impl From<i64> for RequestId {
    fn from(id: i64) -> Self {
        RequestId::Integer(id)
    }
}

impl From<String> for RequestId {
    fn from(id: String) -> Self {
        RequestId::String(id)
    }
}

/// A JSON-RPC request wrapper.
#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub method: String,
    pub id: RequestId,
    #[serde(default)]
    pub params: serde_json::Value,
}

/// A JSON-RPC response wrapper.
#[derive(Debug, Serialize)]
pub struct JsonRpcResponse<T: Serialize> {
    pub jsonrpc: &'static str,
    pub id: RequestId,
    pub result: T,
}

impl<T: Serialize> JsonRpcResponse<T> {
    pub fn new(id: RequestId, result: T) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            result,
        }
    }
}

/// A JSON-RPC error response.
#[derive(Debug, Serialize)]
pub struct JsonRpcErrorResponse {
    pub jsonrpc: &'static str,
    pub id: Option<RequestId>,
    pub error: JsonRpcError,
}

impl JsonRpcErrorResponse {
    pub fn new(id: Option<RequestId>, error: JsonRpcError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            error,
        }
    }
}

/// A JSON-RPC error object.
#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<JsonRpcErrorData>,
}

/// Extended error data for application-specific errors.
#[derive(Debug, Serialize)]
pub struct JsonRpcErrorData {
    pub error_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Every rejected field, for input and schema errors.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub violations: Vec<Violation>,
    pub recovery_hint: &'static str,
}

impl JsonRpcError {
    /// Creates a parse error (-32700).
    pub fn parse_error(message: impl Into<String>) -> Self {
        Self {
            code: -32700,
            message: message.into(),
            data: None,
        }
    }

    /// Creates an invalid request error (-32600).
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            code: -32600,
            message: message.into(),
            data: None,
        }
    }

    /// Creates a method not found error (-32601).
    pub fn method_not_found(method: &str) -> Self {
        Self {
            code: -32601,
            message: format!("Method not found: {}", method),
            data: None,
        }
    }

    /// Creates an invalid params error (-32602).
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self {
            code: -32602,
            message: message.into(),
            data: None,
        }
    }

    /// Creates an internal error (-32603).
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self {
            code: -32603,
            message: message.into(),
            data: None,
        }
    }
}

/// Application error code for an [`ErrorCode`], in the -32000 range.
pub fn rpc_code(code: ErrorCode) -> i32 {
    match code {
        ErrorCode::InvalidColor => -32000,
        ErrorCode::InvalidInput => -32001,
        ErrorCode::SchemaMismatch => -32002,
        ErrorCode::MediaMissing => -32003,
        ErrorCode::RemoteCallFailed => -32004,
        ErrorCode::InvalidAudio => -32005,
        ErrorCode::ConfigInvalid => -32006,
    }
}

impl From<BrandError> for JsonRpcError {
    fn from(err: BrandError) -> Self {
        Self {
            code: rpc_code(err.code),
            message: err.code.description().to_string(),
            data: Some(JsonRpcErrorData {
                error_code: err.code.as_str().to_string(),
                details: Some(err.message),
                violations: err.violations,
                recovery_hint: err.code.recovery_hint(),
            }),
        }
    }
}

// ============================================================================
// Local methods
// ============================================================================

/// Parameters for `theme`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ThemeParams {
    pub brand_info: BrandProfile,
}

/// Parameters for `encode_wav`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EncodeWavParams {
    /// Raw little-endian PCM, base64-encoded.
    pub pcm_base64: String,
    pub channels: Option<u16>,
    pub sample_rate: Option<u32>,
    pub sample_width: Option<u16>,
}

impl EncodeWavParams {
    /// The PCM layout, with defaults for unspecified fields.
    pub fn spec(&self) -> PcmSpec {
        let defaults = PcmSpec::default();
        PcmSpec {
            channels: self.channels.unwrap_or(defaults.channels),
            sample_rate: self.sample_rate.unwrap_or(defaults.sample_rate),
            sample_width: self.sample_width.unwrap_or(defaults.sample_width),
        }
    }
}

/// Response for `encode_wav`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodeWavResult {
    pub wav_data_uri: DataUri,
    pub header_len: usize,
    pub data_len: usize,
    pub duration_sec: f32,
}

/// Response for `list_templates`.
#[derive(Debug, Serialize)]
pub struct ListTemplatesResult {
    pub templates: &'static [Template],
}
