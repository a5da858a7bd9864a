//! Core types shared by the evaluation pipeline

use dasp::Sample;
use serde::{Deserialize, Serialize};

/// Raw audio data representation (mono, f32 samples)
#[derive(Debug, Clone, Default)]
pub struct AudioData {
    /// Audio samples, normalized to [-1.0, 1.0]
    pub samples: Vec<f32>,
    /// Sample rate in Hz (e.g., 16000)
    pub sample_rate: u32,
}

impl AudioData {
    /// Build from signed 16-bit PCM samples.
    pub fn from_pcm16(samples: &[i16], sample_rate: u32) -> Self {
        Self {
            samples: samples.iter().map(|s| s.to_sample::<f32>()).collect(),
            sample_rate,
        }
    }

    /// Length of the buffer in seconds; zero when the sample rate is unknown.
    pub fn duration(&self) -> f64 {
        if self.sample_rate == 0 {
            0.0
        } else {
            self.samples.len() as f64 / self.sample_rate as f64
        }
    }
}

/// One word emitted by a speech recognizer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordHypothesis {
    #[serde(alias = "word")]
    pub text: String,
    pub start: f64, // seconds
    pub end: f64,   // seconds
    /// Recognizer confidence or evaluation value, usually within [0, 1]
    #[serde(default, alias = "confidence", alias = "score")]
    pub evaluation: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phonemes: Option<Vec<String>>,
}

impl WordHypothesis {
    pub fn new(text: impl Into<String>, start: f64, end: f64, evaluation: f64) -> Self {
        Self {
            text: text.into(),
            start,
            end,
            evaluation,
            phonemes: None,
        }
    }

    pub fn with_phonemes(mut self, phonemes: Vec<String>) -> Self {
        self.phonemes = Some(phonemes);
        self
    }

    /// Word length in seconds, never negative.
    pub fn duration(&self) -> f64 {
        (self.end - self.start).max(0.0)
    }
}

/// Recognizer output: full transcript plus time-stamped words in recognition order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recognition {
    #[serde(default, alias = "text")]
    pub transcript: String,
    #[serde(default)]
    pub words: Vec<WordHypothesis>,
}

impl Recognition {
    pub fn new(transcript: impl Into<String>, words: Vec<WordHypothesis>) -> Self {
        Self {
            transcript: transcript.into(),
            words,
        }
    }

    /// Builds a recognition whose transcript is the space-joined word list.
    pub fn from_words(words: Vec<WordHypothesis>) -> Self {
        let transcript = words
            .iter()
            .map(|word| word.text.trim())
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        Self { transcript, words }
    }
}

/// Lowercases and trims a word for comparison.
pub fn normalize_token(token: &str) -> String {
    token.trim().to_lowercase()
}

/// Splits free text into normalized tokens, dropping empties.
pub fn tokenize(text: &str) -> Vec<String> {
    text.trim()
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}
