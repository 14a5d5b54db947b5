//! Error types for autobrand.
//!
//! Every failure a flow, the encoder or the color code can produce carries an
//! [`ErrorCode`] so the RPC and CLI boundaries can turn it into a single
//! user-visible message without inspecting strings.

use std::fmt;

use crate::schema::Violation;

/// Error codes surfaced to clients in error responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// A color string is not a 6-digit hex value.
    /// Trigger: user-edited palette entry or malformed model output.
    InvalidColor,

    /// A flow was called with an input record that does not match its shape.
    /// Trigger: empty business type, malformed data URI, bad hex color.
    InvalidInput,

    /// The model answered but the answer does not match the declared schema.
    /// Trigger: missing field, wrong type, out-of-range enum value.
    SchemaMismatch,

    /// The model call succeeded but returned no media where media was required.
    /// Trigger: image or speech generation returning text only.
    MediaMissing,

    /// Network or transport failure talking to the model API.
    /// Trigger: DNS/TLS failure, non-2xx status, undecodable body.
    RemoteCallFailed,

    /// Raw PCM handed to the encoder cannot be packaged.
    /// Trigger: unsupported sample width or a partial trailing frame.
    InvalidAudio,

    /// Runtime configuration is incomplete or inconsistent.
    /// Trigger: no API key configured, unparsable base URL.
    ConfigInvalid,
}

impl ErrorCode {
    /// Returns the string representation of the error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidColor => "INVALID_COLOR",
            ErrorCode::InvalidInput => "INVALID_INPUT",
            ErrorCode::SchemaMismatch => "SCHEMA_MISMATCH",
            ErrorCode::MediaMissing => "MEDIA_MISSING",
            ErrorCode::RemoteCallFailed => "REMOTE_CALL_FAILED",
            ErrorCode::InvalidAudio => "INVALID_AUDIO",
            ErrorCode::ConfigInvalid => "CONFIG_INVALID",
        }
    }

    /// Returns a human-readable description of the error.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::InvalidColor => "Color must be a 6-digit hex code such as #1A2B3C",
            ErrorCode::InvalidInput => "Request input does not match the expected shape",
            ErrorCode::SchemaMismatch => "Model response does not match the expected schema",
            ErrorCode::MediaMissing => "Model response did not contain the requested media",
            ErrorCode::RemoteCallFailed => "Call to the generative model API failed",
            ErrorCode::InvalidAudio => "PCM audio cannot be packaged with the given parameters",
            ErrorCode::ConfigInvalid => "Configuration is incomplete or invalid",
        }
    }

    /// Returns a recovery hint suggesting how to resolve this error.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCode::InvalidColor => "Pick a color in #RRGGBB form (e.g., #FF5733)",
            ErrorCode::InvalidInput => {
                "Fix the listed fields and submit again. Logos must be data URIs \
                 of the form data:<mime>;base64,<payload>"
            }
            ErrorCode::SchemaMismatch | ErrorCode::MediaMissing => {
                "Generation output is not deterministic; trigger the generation again"
            }
            ErrorCode::RemoteCallFailed => {
                "Check network access and the API key, then trigger the generation again"
            }
            ErrorCode::InvalidAudio => {
                "Use a sample width of 1-4 bytes and a PCM length that is a whole number of frames"
            }
            ErrorCode::ConfigInvalid => {
                "Set AUTOBRAND_API_KEY (or GEMINI_API_KEY) and check AUTOBRAND_* settings"
            }
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Main error type for autobrand operations.
#[derive(Debug)]
pub struct BrandError {
    /// The error code identifying the type of error.
    pub code: ErrorCode,
    /// Human-readable error message with context.
    pub message: String,
    /// Every field that failed validation, for input and schema errors.
    pub violations: Vec<Violation>,
    /// Optional underlying cause of the error.
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl BrandError {
    /// Creates a new BrandError with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            violations: Vec::new(),
            source: None,
        }
    }

    /// Creates a new BrandError with an underlying cause.
    pub fn with_source(
        code: ErrorCode,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            violations: Vec::new(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates an INVALID_COLOR error.
    pub fn invalid_color(input: &str) -> Self {
        Self::new(
            ErrorCode::InvalidColor,
            format!("Invalid hex color: {:?}", input),
        )
    }

    /// Creates an INVALID_INPUT error listing every violated field.
    pub fn invalid_input(flow: &str, violations: Vec<Violation>) -> Self {
        Self {
            code: ErrorCode::InvalidInput,
            message: format!(
                "Invalid input for {}: {}",
                flow,
                join_violations(&violations)
            ),
            violations,
            source: None,
        }
    }

    /// Creates a SCHEMA_MISMATCH error listing every violated field.
    pub fn schema_mismatch(flow: &str, violations: Vec<Violation>) -> Self {
        Self {
            code: ErrorCode::SchemaMismatch,
            message: format!(
                "Response for {} does not match schema: {}",
                flow,
                join_violations(&violations)
            ),
            violations,
            source: None,
        }
    }

    /// Creates a MEDIA_MISSING error.
    pub fn media_missing(flow: &str) -> Self {
        Self::new(
            ErrorCode::MediaMissing,
            format!("{} returned no media", flow),
        )
    }

    /// Creates a REMOTE_CALL_FAILED error.
    pub fn remote_call_failed(reason: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::RemoteCallFailed,
            format!("Model call failed: {}", reason.into()),
        )
    }

    /// Creates an INVALID_AUDIO error.
    pub fn invalid_audio(reason: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidAudio, reason)
    }

    /// Creates a CONFIG_INVALID error.
    pub fn config_invalid(reason: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalid, reason)
    }
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl fmt::Display for BrandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}. Recovery: {}",
            self.code,
            self.message,
            self.code.recovery_hint()
        )
    }
}

impl std::error::Error for BrandError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Result type alias using BrandError.
pub type Result<T> = std::result::Result<T, BrandError>;

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [ErrorCode; 7] = [
        ErrorCode::InvalidColor,
        ErrorCode::InvalidInput,
        ErrorCode::SchemaMismatch,
        ErrorCode::MediaMissing,
        ErrorCode::RemoteCallFailed,
        ErrorCode::InvalidAudio,
        ErrorCode::ConfigInvalid,
    ];

    #[test]
    fn error_code_as_str() {
        assert_eq!(ErrorCode::InvalidColor.as_str(), "INVALID_COLOR");
        assert_eq!(ErrorCode::InvalidInput.as_str(), "INVALID_INPUT");
        assert_eq!(ErrorCode::SchemaMismatch.as_str(), "SCHEMA_MISMATCH");
        assert_eq!(ErrorCode::MediaMissing.as_str(), "MEDIA_MISSING");
        assert_eq!(ErrorCode::RemoteCallFailed.as_str(), "REMOTE_CALL_FAILED");
        assert_eq!(ErrorCode::InvalidAudio.as_str(), "INVALID_AUDIO");
        assert_eq!(ErrorCode::ConfigInvalid.as_str(), "CONFIG_INVALID");
    }

    #[test]
    fn error_code_hints_and_descriptions_not_empty() {
        for code in ALL {
            assert!(!code.recovery_hint().is_empty(), "{} has no hint", code);
            assert!(!code.description().is_empty(), "{} has no description", code);
        }
    }

    #[test]
    fn brand_error_display() {
        let err = BrandError::invalid_color("#12");
        let text = err.to_string();
        assert!(text.contains("INVALID_COLOR"));
        assert!(text.contains("#12"));
        assert!(text.contains("Recovery:"));
    }

    #[test]
    fn schema_mismatch_lists_every_field() {
        let err = BrandError::schema_mismatch(
            "extract_brand",
            vec![
                Violation::new("colorPalette", "missing required field"),
                Violation::new("brandTone", "missing required field"),
            ],
        );
        assert_eq!(err.code, ErrorCode::SchemaMismatch);
        assert_eq!(err.violations.len(), 2);
        assert!(err.message.contains("colorPalette"));
        assert!(err.message.contains("brandTone"));
    }
}
