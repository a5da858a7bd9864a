use tracing::info;

use crate::evaluation::{EvaluationError, Result};
use crate::types::AudioData;

use super::{decoder, encoder, resample};

/// Sample rate every recognizer and feature extractor expects.
pub const TARGET_SAMPLE_RATE: u32 = 16_000;

/// Converts arbitrary audio/video bytes into mono 16 kHz 16-bit PCM WAV bytes.
pub trait MediaNormalizer: Send + Sync {
    fn normalize(&self, media: Vec<u8>, extension: Option<&str>) -> Result<Vec<u8>>;
}

/// In-process normalizer backed by symphonia decoding and dasp resampling.
#[derive(Debug, Clone)]
pub struct SymphoniaNormalizer {
    target_rate: u32,
}

impl Default for SymphoniaNormalizer {
    fn default() -> Self {
        Self {
            target_rate: TARGET_SAMPLE_RATE,
        }
    }
}

impl SymphoniaNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes and resamples without re-encoding.
    pub fn normalize_to_audio(&self, media: Vec<u8>, extension: Option<&str>) -> Result<AudioData> {
        let decoded = decoder::decode_bytes(media, extension).map_err(EvaluationError::media)?;
        let samples =
            resample::resample_linear(&decoded.samples, decoded.sample_rate, self.target_rate)
                .map_err(EvaluationError::media)?;
        info!(
            source_rate = decoded.sample_rate,
            target_rate = self.target_rate,
            samples = samples.len(),
            "normalized media"
        );
        Ok(AudioData {
            samples,
            sample_rate: self.target_rate,
        })
    }
}

impl MediaNormalizer for SymphoniaNormalizer {
    fn normalize(&self, media: Vec<u8>, extension: Option<&str>) -> Result<Vec<u8>> {
        let audio = self.normalize_to_audio(media, extension)?;
        encoder::encode_wav_bytes(&audio).map_err(EvaluationError::media)
    }
}
