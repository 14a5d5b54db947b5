//! Generative model access.
//!
//! - [`ModelBackend`]: the seam flows call through
//! - [`GeminiClient`]: REST implementation for the Gemini API

mod backend;
mod gemini;

#[cfg(test)]
pub(crate) mod scripted;

pub use backend::{ModelBackend, ModelRequest, ModelResponse, OutputKind, Part};
pub use gemini::GeminiClient;
