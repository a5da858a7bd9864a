mod contour;
mod timing;

use serde::Serialize;
use tracing::debug;

pub use contour::{energy_contour, pitch_contour, FrameLayout};
pub use timing::{count_syllables, detect_pause_regions, word_timings};

use crate::config::FeatureConfig;
use crate::evaluation::analysis::validate_words;
use crate::evaluation::{EvaluationError, Result};
use crate::types::{AudioData, WordHypothesis};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PitchPoint {
    pub time: f64,
    pub frequency: f64,
    pub voiced: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnergyPoint {
    pub time: f64,
    pub energy: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordTiming {
    pub word: String,
    pub start: f64,
    pub end: f64,
    pub syllables: u32,
    pub stressed: bool,
}

impl WordTiming {
    pub fn duration(&self) -> f64 {
        (self.end - self.start).max(0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PauseRegion {
    pub start: f64,
    pub end: f64,
    /// The gap precedes a disfluency marker rather than plain silence.
    pub filled: bool,
}

impl PauseRegion {
    pub fn duration(&self) -> f64 {
        (self.end - self.start).max(0.0)
    }
}

/// Acoustic and timing measurements for one utterance.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProsodyFeatures {
    pub pitch_contour: Vec<PitchPoint>,
    pub energy_contour: Vec<EnergyPoint>,
    pub word_timings: Vec<WordTiming>,
    pub pauses: Vec<PauseRegion>,
    /// Utterance length in seconds.
    pub duration: f64,
}

impl ProsodyFeatures {
    /// Utterance duration, or the spoken span when the audio length is unknown.
    pub fn speaking_duration(&self) -> f64 {
        if self.duration > 0.0 {
            return self.duration;
        }
        match (self.word_timings.first(), self.word_timings.last()) {
            (Some(first), Some(last)) => (last.end - first.start).max(0.0),
            _ => 0.0,
        }
    }
}

/// Extracts pitch, energy, syllable timing and pauses from mono PCM audio.
pub fn extract_features(
    audio: &AudioData,
    words: &[WordHypothesis],
    config: &FeatureConfig,
) -> Result<ProsodyFeatures> {
    if audio.sample_rate == 0 {
        return Err(EvaluationError::precondition(
            "audio sample rate must be positive",
        ));
    }
    if audio.samples.iter().any(|sample| !sample.is_finite()) {
        return Err(EvaluationError::precondition(
            "audio contains non-finite samples",
        ));
    }
    validate_words(words)?;

    let layout = FrameLayout::new(audio.sample_rate, config.frame_ms);
    let pitch_contour = pitch_contour(&audio.samples, &layout, config);
    let energy_contour = energy_contour(&audio.samples, &layout);
    let word_timings = word_timings(words);
    let pauses = detect_pause_regions(words, config.min_pause_secs, &config.disfluency_markers);
    debug!(
        frames = pitch_contour.len(),
        voiced = pitch_contour.iter().filter(|p| p.voiced).count(),
        words = word_timings.len(),
        pauses = pauses.len(),
        "prosody features extracted"
    );

    Ok(ProsodyFeatures {
        pitch_contour,
        energy_contour,
        word_timings,
        pauses,
        duration: audio.duration(),
    })
}
