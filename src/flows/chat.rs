//! Branding expert chat.

use serde::{Deserialize, Serialize};

use crate::config::StudioConfig;
use crate::error::Result;
use crate::model::{ModelBackend, Part};
use crate::schema::{require_text, validate_input, Schema, Validate, Violation};

use super::ask_json;

const FLOW: &str = "brand_chat";

const PERSONA: &str = "You are BrandBot, a friendly branding expert inside the \
AutoBrand studio. You help with branding principles such as color theory, \
typography and brand voice, with using the studio itself, and with marketing \
and design ideas. Keep answers short, encouraging and easy to follow.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BrandChatInput {
    pub question: String,
}

impl Validate for BrandChatInput {
    fn violations(&self) -> Vec<Violation> {
        let mut out = Vec::new();
        require_text("question", &self.question, &mut out);
        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandChatAnswer {
    pub answer: String,
}

/// Answers a single branding question. No conversation state is kept.
pub async fn brand_chat<B: ModelBackend>(
    backend: &B,
    config: &StudioConfig,
    input: &BrandChatInput,
) -> Result<BrandChatAnswer> {
    validate_input(FLOW, input)?;

    let prompt = format!("{}\n\nUser's question: {}", PERSONA, input.question.trim());
    ask_json(
        backend,
        FLOW,
        &config.text_model,
        vec![Part::Text(prompt)],
        Schema::Object(vec![("answer", Schema::Text)]),
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::model::scripted::ScriptedBackend;
    use serde_json::json;

    #[tokio::test]
    async fn answers_question() {
        let backend = ScriptedBackend::new().json(
            FLOW,
            json!({ "answer": "Pick one bold accent and use it sparingly." }),
        );
        let input = BrandChatInput {
            question: "How many accent colors should I use?".into(),
        };

        let reply = brand_chat(&backend, &StudioConfig::default(), &input)
            .await
            .unwrap();
        assert!(reply.answer.starts_with("Pick one"));

        let prompt = backend.requests()[0].prompt_text();
        assert!(prompt.contains("BrandBot"));
        assert!(prompt.ends_with("How many accent colors should I use?"));
    }

    #[tokio::test]
    async fn extra_fields_in_answer_are_rejected() {
        let backend =
            ScriptedBackend::new().json(FLOW, json!({ "answer": "Yes.", "mood": "happy" }));
        let input = BrandChatInput {
            question: "Is teal trendy?".into(),
        };

        let err = brand_chat(&backend, &StudioConfig::default(), &input)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::SchemaMismatch);
        assert_eq!(err.violations[0].field, "mood");
    }
}
