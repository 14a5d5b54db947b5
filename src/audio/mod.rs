//! Audio packaging.
//!
//! Provides WAV container encoding for synthesized speech.

pub mod wav;

// Re-export commonly used items
pub use wav::{
    header_len, pcm_duration, pcm_to_wav, pcm_to_wav_base64, pcm_to_wav_data_uri, PcmSpec,
    DEFAULT_CHANNELS, DEFAULT_SAMPLE_RATE, DEFAULT_SAMPLE_WIDTH, PCM_HEADER_LEN,
};
