//! Studio configuration module.
//!
//! Contains the runtime configuration for autobrand: model API credentials,
//! model selection per output kind, and where generated assets are written.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default Gemini REST endpoint.
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model for JSON text flows.
pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.0-flash";

/// Default model for image flows.
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.0-flash-preview-image-generation";

/// Default model for speech synthesis.
pub const DEFAULT_SPEECH_MODEL: &str = "gemini-2.5-flash-preview-tts";

/// Default prebuilt voice for jingles.
pub const DEFAULT_VOICE: &str = "Algenib";

/// Default base URL for customized template links.
pub const DEFAULT_TEMPLATE_BASE_URL: &str = "https://example.com/template/";

/// Runtime configuration for the studio.
///
/// Typically loaded from environment variables at startup, with CLI flags
/// layered on top.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudioConfig {
    /// API key for the model service. Required for any flow that calls the
    /// model; local operations (theme, encode_wav, templates) work without it.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Base URL of the model REST API, without a trailing slash.
    pub api_base: String,

    /// Model used for structured JSON answers.
    pub text_model: String,

    /// Model used for image generation.
    pub image_model: String,

    /// Model used for text-to-speech.
    pub speech_model: String,

    /// Prebuilt voice name for speech synthesis.
    pub voice: String,

    /// Base URL customized template links are built from.
    pub template_base_url: String,

    /// Directory for saved assets.
    /// If None, uses the platform-specific default data location.
    pub output_path: Option<PathBuf>,
}

impl StudioConfig {
    /// Creates a new StudioConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a StudioConfig from environment variables.
    ///
    /// Reads the following environment variables:
    /// - `AUTOBRAND_API_KEY` - Model API key (falls back to `GEMINI_API_KEY`)
    /// - `AUTOBRAND_API_BASE` - Model API base URL
    /// - `AUTOBRAND_TEXT_MODEL` - Model for JSON flows
    /// - `AUTOBRAND_IMAGE_MODEL` - Model for image flows
    /// - `AUTOBRAND_SPEECH_MODEL` - Model for speech synthesis
    /// - `AUTOBRAND_VOICE` - Prebuilt voice name
    /// - `AUTOBRAND_TEMPLATE_BASE_URL` - Base URL for template links
    /// - `AUTOBRAND_OUTPUT_PATH` - Directory for saved assets
    ///
    /// Falls back to defaults for unset or blank variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable source.
    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        config.api_key = var("AUTOBRAND_API_KEY").or_else(|| var("GEMINI_API_KEY"));

        if let Some(base) = var("AUTOBRAND_API_BASE") {
            config.api_base = base.trim_end_matches('/').to_string();
        }
        if let Some(model) = var("AUTOBRAND_TEXT_MODEL") {
            config.text_model = model;
        }
        if let Some(model) = var("AUTOBRAND_IMAGE_MODEL") {
            config.image_model = model;
        }
        if let Some(model) = var("AUTOBRAND_SPEECH_MODEL") {
            config.speech_model = model;
        }
        if let Some(voice) = var("AUTOBRAND_VOICE") {
            config.voice = voice;
        }
        if let Some(url) = var("AUTOBRAND_TEMPLATE_BASE_URL") {
            config.template_base_url = url;
        }
        if let Some(path) = var("AUTOBRAND_OUTPUT_PATH") {
            config.output_path = Some(PathBuf::from(path));
        }

        config
    }

    /// Returns the effective output path, using platform defaults if not specified.
    pub fn effective_output_path(&self) -> PathBuf {
        if let Some(ref path) = self.output_path {
            path.clone()
        } else {
            default_output_path()
        }
    }

    /// Returns true if an API key is configured.
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }

    /// Validates the configuration.
    ///
    /// Returns an error message if validation fails, None otherwise. A
    /// missing API key is not a validation failure; it is reported when a
    /// model call is attempted.
    pub fn validate(&self) -> Option<String> {
        if reqwest::Url::parse(&self.api_base).is_err() {
            return Some(format!("api_base is not a valid URL: {}", self.api_base));
        }
        if reqwest::Url::parse(&self.template_base_url).is_err() {
            return Some(format!(
                "template_base_url is not a valid URL: {}",
                self.template_base_url
            ));
        }

        for (name, value) in [
            ("text_model", &self.text_model),
            ("image_model", &self.image_model),
            ("speech_model", &self.speech_model),
            ("voice", &self.voice),
        ] {
            if value.trim().is_empty() {
                return Some(format!("{} must not be empty", name));
            }
        }

        None
    }
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: DEFAULT_API_BASE.to_string(),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            speech_model: DEFAULT_SPEECH_MODEL.to_string(),
            voice: DEFAULT_VOICE.to_string(),
            template_base_url: DEFAULT_TEMPLATE_BASE_URL.to_string(),
            output_path: None,
        }
    }
}

/// Returns the platform-specific default asset storage path.
///
/// Uses the `directories` crate to find appropriate locations:
/// - macOS: ~/Library/Application Support/autobrand/assets
/// - Linux: ~/.local/share/autobrand/assets
/// - Windows: C:\Users\<user>\AppData\Roaming\autobrand\data\assets
fn default_output_path() -> PathBuf {
    if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "autobrand") {
        proj_dirs.data_dir().join("assets")
    } else {
        PathBuf::from("./assets")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_are_valid() {
        let config = StudioConfig::new();
        assert!(config.validate().is_none());
        assert!(!config.has_api_key());
        assert_eq!(config.voice, "Algenib");
    }

    #[test]
    fn reads_every_variable() {
        let config = StudioConfig::from_lookup(lookup(&[
            ("AUTOBRAND_API_KEY", "k1"),
            ("AUTOBRAND_API_BASE", "http://localhost:9000/v1/"),
            ("AUTOBRAND_TEXT_MODEL", "t"),
            ("AUTOBRAND_IMAGE_MODEL", "i"),
            ("AUTOBRAND_SPEECH_MODEL", "s"),
            ("AUTOBRAND_VOICE", "Puck"),
            ("AUTOBRAND_TEMPLATE_BASE_URL", "https://templates.test/t/"),
            ("AUTOBRAND_OUTPUT_PATH", "/tmp/brand"),
        ]));
        assert_eq!(config.api_key.as_deref(), Some("k1"));
        assert_eq!(config.api_base, "http://localhost:9000/v1");
        assert_eq!(config.text_model, "t");
        assert_eq!(config.image_model, "i");
        assert_eq!(config.speech_model, "s");
        assert_eq!(config.voice, "Puck");
        assert_eq!(config.template_base_url, "https://templates.test/t/");
        assert_eq!(config.effective_output_path(), PathBuf::from("/tmp/brand"));
    }

    #[test]
    fn api_key_falls_back_to_gemini_variable() {
        let config = StudioConfig::from_lookup(lookup(&[("GEMINI_API_KEY", "g")]));
        assert_eq!(config.api_key.as_deref(), Some("g"));

        let config = StudioConfig::from_lookup(lookup(&[
            ("AUTOBRAND_API_KEY", "a"),
            ("GEMINI_API_KEY", "g"),
        ]));
        assert_eq!(config.api_key.as_deref(), Some("a"));
    }

    #[test]
    fn blank_variables_are_ignored() {
        let config = StudioConfig::from_lookup(lookup(&[
            ("AUTOBRAND_API_KEY", "  "),
            ("AUTOBRAND_VOICE", ""),
        ]));
        assert!(config.api_key.is_none());
        assert_eq!(config.voice, DEFAULT_VOICE);
    }

    #[test]
    fn config_validation() {
        let mut config = StudioConfig::new();
        config.api_base = "not a url".into();
        assert!(config.validate().unwrap().contains("api_base"));

        let mut config = StudioConfig::new();
        config.image_model = " ".into();
        assert!(config.validate().unwrap().contains("image_model"));
    }

    #[test]
    fn effective_output_path_has_default() {
        let config = StudioConfig::new();
        assert!(!config.effective_output_path().as_os_str().is_empty());
    }

    #[test]
    fn api_key_is_not_serialized() {
        let mut config = StudioConfig::new();
        config.api_key = Some("secret".into());
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("secret"));
    }
}
