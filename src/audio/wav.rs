//! WAV container encoding for raw PCM.
//!
//! Speech synthesis returns headerless little-endian PCM. Browsers and media
//! players need a RIFF/WAVE header in front of it, so the encoder wraps the
//! samples unchanged using the hound writer over an in-memory buffer.

use std::io::Cursor;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use hound::{SampleFormat, WavSpec, WavWriter};
use serde::{Deserialize, Serialize};

use crate::error::{BrandError, Result};
use crate::media::DataUri;

/// Default channel count for synthesized speech (mono).
pub const DEFAULT_CHANNELS: u16 = 1;

/// Default sample rate for synthesized speech (24kHz).
pub const DEFAULT_SAMPLE_RATE: u32 = 24000;

/// Default sample width in bytes (16-bit).
pub const DEFAULT_SAMPLE_WIDTH: u16 = 2;

/// Header size with the classic PCMWAVEFORMAT fmt chunk.
pub const PCM_HEADER_LEN: usize = 44;

/// Header size with the WAVEFORMATEXTENSIBLE fmt chunk, used above two
/// channels or 16 bits per sample.
pub const EXTENSIBLE_HEADER_LEN: usize = 68;

/// Layout of a raw PCM buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PcmSpec {
    /// Interleaved channel count.
    pub channels: u16,
    /// Frames per second.
    pub sample_rate: u32,
    /// Bytes per sample: 1 (unsigned 8-bit), 2, 3 or 4 (signed).
    pub sample_width: u16,
}

impl Default for PcmSpec {
    fn default() -> Self {
        Self {
            channels: DEFAULT_CHANNELS,
            sample_rate: DEFAULT_SAMPLE_RATE,
            sample_width: DEFAULT_SAMPLE_WIDTH,
        }
    }
}

impl PcmSpec {
    pub fn bits_per_sample(&self) -> u16 {
        self.sample_width.saturating_mul(8)
    }

    /// Bytes per frame (one sample for every channel). Fails when the frame
    /// does not fit the header's 16-bit field.
    pub fn block_align(&self) -> Result<u16> {
        self.channels.checked_mul(self.sample_width).ok_or_else(|| {
            BrandError::invalid_audio(format!(
                "{} channels of {} bytes exceed the maximum frame size",
                self.channels, self.sample_width
            ))
        })
    }

    /// Bytes per second of audio. Fails when the rate does not fit the
    /// header's 32-bit field.
    pub fn byte_rate(&self) -> Result<u32> {
        let block_align = self.block_align()?;
        self.sample_rate
            .checked_mul(u32::from(block_align))
            .ok_or_else(|| {
                BrandError::invalid_audio(format!(
                    "sample_rate {} with {}-byte frames exceeds the maximum byte rate",
                    self.sample_rate, block_align
                ))
            })
    }

    /// Reads `rate=` and `channels=` parameters from a PCM mime type such as
    /// `audio/L16;codec=pcm;rate=24000`, falling back to the defaults.
    pub fn from_mime(mime: &str) -> Self {
        let mut spec = Self::default();
        let mut parts = mime.split(';').map(str::trim);

        match parts.next().map(|m| m.to_ascii_lowercase()).as_deref() {
            Some("audio/l8") => spec.sample_width = 1,
            Some("audio/l24") => spec.sample_width = 3,
            _ => {}
        }

        for param in parts {
            let Some((key, value)) = param.split_once('=') else {
                continue;
            };
            match key.trim().to_ascii_lowercase().as_str() {
                "rate" => {
                    if let Ok(rate) = value.trim().parse::<u32>() {
                        if rate > 0 {
                            spec.sample_rate = rate;
                        }
                    }
                }
                "channels" => {
                    if let Ok(channels) = value.trim().parse::<u16>() {
                        if channels > 0 {
                            spec.channels = channels;
                        }
                    }
                }
                _ => {}
            }
        }

        spec
    }

    /// Checks the layout is one the encoder can write.
    pub fn validate(&self) -> Result<()> {
        if self.channels == 0 {
            return Err(BrandError::invalid_audio("channels must be > 0"));
        }
        if self.sample_rate == 0 {
            return Err(BrandError::invalid_audio("sample_rate must be > 0"));
        }
        if !(1..=4).contains(&self.sample_width) {
            return Err(BrandError::invalid_audio(format!(
                "sample_width must be 1-4 bytes, got {}",
                self.sample_width
            )));
        }
        self.byte_rate()?;
        Ok(())
    }

    fn wav_spec(&self) -> WavSpec {
        WavSpec {
            channels: self.channels,
            sample_rate: self.sample_rate,
            bits_per_sample: self.bits_per_sample(),
            sample_format: SampleFormat::Int,
        }
    }
}

/// Size of the header the encoder writes for `spec`.
pub fn header_len(spec: &PcmSpec) -> usize {
    if spec.channels > 2 || spec.bits_per_sample() > 16 {
        EXTENSIBLE_HEADER_LEN
    } else {
        PCM_HEADER_LEN
    }
}

/// Wraps raw PCM in a WAV container.
///
/// Empty input yields a valid container with a zero-length data chunk.
/// Input that is not a whole number of frames is rejected.
pub fn pcm_to_wav(pcm: &[u8], spec: PcmSpec) -> Result<Vec<u8>> {
    spec.validate()?;

    let block_align = spec.block_align()? as usize;
    if pcm.len() % block_align != 0 {
        return Err(BrandError::invalid_audio(format!(
            "PCM length {} is not a multiple of the {}-byte frame size",
            pcm.len(),
            block_align
        )));
    }
    if pcm.len() + header_len(&spec) > u32::MAX as usize {
        return Err(BrandError::invalid_audio(format!(
            "PCM length {} exceeds the 4 GiB WAV limit",
            pcm.len()
        )));
    }

    let mut buffer = Vec::with_capacity(pcm.len() + header_len(&spec));
    {
        let mut writer = WavWriter::new(Cursor::new(&mut buffer), spec.wav_spec())
            .map_err(|e| wav_failed("Failed to create WAV writer", e))?;

        let width = spec.sample_width as usize;
        for sample in pcm.chunks_exact(width) {
            let written = match width {
                // 8-bit WAV is unsigned; hound takes signed and re-biases.
                1 => writer.write_sample((sample[0] ^ 0x80) as i8),
                2 => writer.write_sample(i16::from_le_bytes([sample[0], sample[1]])),
                3 => {
                    let sign = if sample[2] & 0x80 != 0 { 0xFF } else { 0x00 };
                    writer.write_sample(i32::from_le_bytes([sample[0], sample[1], sample[2], sign]))
                }
                _ => writer.write_sample(i32::from_le_bytes([
                    sample[0], sample[1], sample[2], sample[3],
                ])),
            };
            written.map_err(|e| wav_failed("Failed to write sample", e))?;
        }

        writer
            .finalize()
            .map_err(|e| wav_failed("Failed to finalize WAV data", e))?;
    }

    Ok(buffer)
}

/// Wraps raw PCM in a WAV container and base64-encodes the whole file.
pub fn pcm_to_wav_base64(pcm: &[u8], spec: PcmSpec) -> Result<String> {
    Ok(STANDARD.encode(pcm_to_wav(pcm, spec)?))
}

/// Wraps raw PCM in a WAV container as a `data:audio/wav;base64,...` URI.
pub fn pcm_to_wav_data_uri(pcm: &[u8], spec: PcmSpec) -> Result<DataUri> {
    Ok(DataUri::from_base64("audio/wav", pcm_to_wav_base64(pcm, spec)?))
}

/// Duration in seconds of `byte_len` bytes of PCM laid out as `spec`.
pub fn pcm_duration(byte_len: usize, spec: &PcmSpec) -> Result<f32> {
    spec.validate()?;
    Ok(byte_len as f32 / spec.byte_rate()? as f32)
}

fn wav_failed(context: &str, e: hound::Error) -> BrandError {
    BrandError::with_source(
        crate::error::ErrorCode::InvalidAudio,
        format!("{}: {}", context, e),
        e,
    )
}
