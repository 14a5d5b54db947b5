//! Spoken audio jingles.
//!
//! Two model calls: a short script, then speech synthesis of that script.
//! Speech comes back as headerless PCM and is packaged as WAV before it is
//! returned.

use serde::{Deserialize, Serialize};

use crate::audio::{pcm_duration, pcm_to_wav_data_uri, PcmSpec};
use crate::config::StudioConfig;
use crate::error::{BrandError, ErrorCode, Result};
use crate::media::DataUri;
use crate::model::{ModelBackend, ModelRequest, Part};
use crate::schema::{require_text, validate_input, Schema, Validate, Violation};

use super::ask_json;

const FLOW: &str = "jingle";
const SCRIPT_FLOW: &str = "jingle_script";

/// Word budget the script prompt asks for.
const MAX_SCRIPT_WORDS: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JingleInput {
    pub brand_name: String,
    pub business_type: String,
}

impl Validate for JingleInput {
    fn violations(&self) -> Vec<Violation> {
        let mut out = Vec::new();
        require_text("brandName", &self.brand_name, &mut out);
        require_text("businessType", &self.business_type, &mut out);
        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Jingle {
    /// WAV audio as `data:audio/wav;base64,...`.
    pub jingle_url: DataUri,
    pub jingle_script: String,
}

#[derive(Debug, Deserialize)]
struct JingleScript {
    script: String,
}

fn script_schema() -> Schema {
    Schema::Object(vec![("script", Schema::Text)])
}

fn script_prompt(input: &JingleInput) -> String {
    format!(
        "You are a creative jingle writer. Write an upbeat, catchy advertising \
         jingle of fewer than {max} words.\n\n\
         Brand name: {brand}\n\
         Business type: {business}\n\n\
         For example, a coffee shop called \"WakeUp\" could use: \"Need a lift? \
         A better day? Get your WakeUp coffee, right away!\"",
        max = MAX_SCRIPT_WORDS,
        brand = input.brand_name.trim(),
        business = input.business_type.trim(),
    )
}

/// Writes and voices a short jingle.
pub async fn jingle<B: ModelBackend>(
    backend: &B,
    config: &StudioConfig,
    input: &JingleInput,
) -> Result<Jingle> {
    validate_input(FLOW, input)?;

    let script: JingleScript = ask_json(
        backend,
        SCRIPT_FLOW,
        &config.text_model,
        vec![Part::Text(script_prompt(input))],
        script_schema(),
    )
    .await?;
    let jingle_script = script.script.trim().to_string();

    let words = jingle_script.split_whitespace().count();
    if words > MAX_SCRIPT_WORDS {
        tracing::warn!(words, "jingle script is longer than requested");
    }

    let request = ModelRequest::speech(
        FLOW,
        &config.speech_model,
        jingle_script.as_str(),
        &config.voice,
    );
    let speech = backend.generate(request).await?.require_media(FLOW)?;
    let jingle_url = package_speech(&speech)?;

    Ok(Jingle {
        jingle_url,
        jingle_script,
    })
}

/// Turns a speech answer into a WAV data URI.
///
/// Raw PCM (`audio/L16`, `audio/pcm`) is wrapped using the rate and channel
/// parameters of its mime type; answers that are already WAV pass through.
fn package_speech(speech: &DataUri) -> Result<DataUri> {
    let essence = speech.essence();
    match essence.as_str() {
        "audio/wav" | "audio/x-wav" | "audio/wave" => Ok(speech.clone()),
        "audio/l16" | "audio/pcm" => {
            let spec = PcmSpec::from_mime(speech.mime());
            let pcm = speech.decode()?;
            let duration_sec = pcm_duration(pcm.len(), &spec)?;
            tracing::debug!(
                bytes = pcm.len(),
                sample_rate = spec.sample_rate,
                duration_sec,
                "packaging speech"
            );
            pcm_to_wav_data_uri(&pcm, spec)
        }
        other => Err(BrandError::new(
            ErrorCode::MediaMissing,
            format!("{} returned {} instead of PCM audio", FLOW, other),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::PCM_HEADER_LEN;
    use crate::model::scripted::ScriptedBackend;
    use crate::model::OutputKind;
    use serde_json::json;
    use std::io::Cursor;

    fn input() -> JingleInput {
        JingleInput {
            brand_name: "WakeUp".into(),
            business_type: "Coffee Shop".into(),
        }
    }

    fn pcm_answer(samples: &[i16]) -> DataUri {
        let bytes: Vec<u8> = samples.iter().flat_map(|s| s.to_le_bytes()).collect();
        DataUri::from_bytes("audio/L16;codec=pcm;rate=24000", &bytes)
    }

    #[tokio::test]
    async fn scripts_then_voices_the_jingle() {
        let backend = ScriptedBackend::new()
            .json(SCRIPT_FLOW, json!({ "script": " Wake up, WakeUp! " }))
            .media(FLOW, pcm_answer(&[0, 1000, -1000, 32767]));

        let result = jingle(&backend, &StudioConfig::default(), &input())
            .await
            .unwrap();
        assert_eq!(result.jingle_script, "Wake up, WakeUp!");
        assert_eq!(result.jingle_url.mime(), "audio/wav");

        let wav = result.jingle_url.decode().unwrap();
        assert_eq!(wav.len(), PCM_HEADER_LEN + 8);
        let reader = hound::WavReader::new(Cursor::new(wav)).unwrap();
        assert_eq!(reader.spec().sample_rate, 24000);
        let samples: Vec<i16> = reader.into_samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(samples, vec![0, 1000, -1000, 32767]);

        let speech = &backend.requests_for(FLOW)[0];
        assert_eq!(speech.prompt_text(), "Wake up, WakeUp!");
        assert_eq!(
            speech.output,
            OutputKind::Speech {
                voice: "Algenib".into()
            }
        );
    }

    #[tokio::test]
    async fn missing_audio_is_media_missing() {
        let backend = ScriptedBackend::new()
            .json(SCRIPT_FLOW, json!({ "script": "La la la" }))
            .text(FLOW, "cannot speak");

        let err = jingle(&backend, &StudioConfig::default(), &input())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::MediaMissing);
    }

    #[tokio::test]
    async fn empty_script_stops_before_speech() {
        let backend = ScriptedBackend::new().json(SCRIPT_FLOW, json!({ "script": "" }));

        let err = jingle(&backend, &StudioConfig::default(), &input())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::SchemaMismatch);
        assert!(backend.requests_for(FLOW).is_empty());
    }

    #[test]
    fn odd_length_pcm_is_invalid_audio() {
        let speech = DataUri::from_bytes("audio/L16;rate=24000", &[1, 2, 3]);
        assert_eq!(
            package_speech(&speech).unwrap_err().code,
            ErrorCode::InvalidAudio
        );
    }

    #[test]
    fn oversized_mime_rate_is_invalid_audio() {
        let speech = DataUri::from_bytes("audio/L16;rate=4294967295;channels=2", &[0; 4]);
        assert_eq!(
            package_speech(&speech).unwrap_err().code,
            ErrorCode::InvalidAudio
        );
    }

    #[test]
    fn wav_answers_pass_through() {
        let wav = DataUri::from_bytes("audio/wav", b"RIFF....WAVE");
        assert_eq!(package_speech(&wav).unwrap(), wav);
    }

    #[test]
    fn unknown_audio_format_is_rejected() {
        let mp3 = DataUri::from_bytes("audio/mpeg", &[0xFF, 0xFB]);
        assert_eq!(package_speech(&mp3).unwrap_err().code, ErrorCode::MediaMissing);
    }
}
