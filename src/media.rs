//! Data URIs, the interchange format for every image and audio payload.
//!
//! Media crossing the model boundary is always `data:<mime>;base64,<payload>`.
//! [`DataUri`] keeps the payload base64-encoded and only decodes on demand,
//! since most media is passed straight back to the client.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{BrandError, ErrorCode, Result};

/// A parsed `data:<mime>;base64,<payload>` string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DataUri {
    mime: String,
    payload: String,
}

impl DataUri {
    /// Parses and validates a data URI, including its base64 payload.
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = |reason: &str| {
            BrandError::new(
                ErrorCode::InvalidInput,
                format!("not a base64 data URI ({})", reason),
            )
        };

        let rest = input
            .strip_prefix("data:")
            .ok_or_else(|| invalid("missing data: prefix"))?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| invalid("missing ',' separator"))?;
        let mime = header
            .strip_suffix(";base64")
            .ok_or_else(|| invalid("payload is not base64"))?;

        if !mime.split(';').next().unwrap_or_default().contains('/') {
            return Err(invalid("missing mime type"));
        }
        if payload.is_empty() {
            return Err(invalid("empty payload"));
        }
        STANDARD
            .decode(payload)
            .map_err(|e| invalid(&format!("bad base64: {}", e)))?;

        Ok(Self {
            mime: mime.to_string(),
            payload: payload.to_string(),
        })
    }

    /// Wraps raw bytes.
    pub fn from_bytes(mime: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            mime: mime.into(),
            payload: STANDARD.encode(bytes),
        }
    }

    /// Wraps an already base64-encoded payload without re-validating it.
    pub fn from_base64(mime: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            mime: mime.into(),
            payload: payload.into(),
        }
    }

    /// Full mime type, including parameters such as `rate=24000`.
    pub fn mime(&self) -> &str {
        &self.mime
    }

    /// Mime type without parameters, lowercased.
    pub fn essence(&self) -> String {
        self.mime
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase()
    }

    /// The base64 payload.
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Decodes the payload.
    pub fn decode(&self) -> Result<Vec<u8>> {
        STANDARD.decode(&self.payload).map_err(|e| {
            BrandError::with_source(ErrorCode::InvalidInput, "Data URI payload is not base64", e)
        })
    }

    pub fn is_image(&self) -> bool {
        self.essence().starts_with("image/")
    }

    pub fn is_audio(&self) -> bool {
        self.essence().starts_with("audio/")
    }

    /// File extension for the mime type.
    pub fn extension(&self) -> &'static str {
        match self.essence().as_str() {
            "image/png" => "png",
            "image/jpeg" | "image/jpg" => "jpg",
            "image/webp" => "webp",
            "image/gif" => "gif",
            "image/svg+xml" => "svg",
            "audio/wav" | "audio/x-wav" | "audio/wave" => "wav",
            "audio/mpeg" => "mp3",
            "text/html" => "html",
            _ => "bin",
        }
    }

    /// Content-derived identifier: first 16 hex chars of SHA256(mime + payload).
    pub fn asset_id(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.essence().as_bytes());
        hasher.update(b"|");
        hasher.update(self.payload.as_bytes());
        let hash = hasher.finalize();
        hex::encode(&hash[..8])
    }

    /// Writes the decoded payload to `dir/<prefix>-<asset_id>.<ext>`.
    ///
    /// Identical media maps to the same file, so saving twice is a no-op.
    pub fn save_to_dir(&self, dir: &Path, prefix: &str) -> std::io::Result<PathBuf> {
        let path = dir.join(format!("{}-{}.{}", prefix, self.asset_id(), self.extension()));
        if path.exists() {
            return Ok(path);
        }

        let bytes = STANDARD
            .decode(&self.payload)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        fs::create_dir_all(dir)?;
        fs::write(&path, bytes)?;
        Ok(path)
    }
}

impl fmt::Display for DataUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "data:{};base64,{}", self.mime, self.payload)
    }
}

impl FromStr for DataUri {
    type Err = BrandError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for DataUri {
    type Error = BrandError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<DataUri> for String {
    fn from(uri: DataUri) -> Self {
        uri.to_string()
    }
}
