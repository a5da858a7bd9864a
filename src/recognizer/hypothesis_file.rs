use std::fs;
use std::path::PathBuf;

use tracing::info;

use crate::evaluation::{EvaluationError, Result};
use crate::types::{AudioData, Recognition};

use super::SpeechRecognizer;

const SERVICE: &str = "speech recognizer";

/// Replays recognizer output captured ahead of time as JSON.
///
/// The file holds `{"transcript": "...", "words": [{"text", "start", "end",
/// "confidence", "phonemes"}]}`; `word`/`text` and `confidence`/`evaluation`
/// are accepted interchangeably. A missing transcript is rebuilt from the words.
#[derive(Debug, Clone)]
pub struct HypothesisFileRecognizer {
    path: PathBuf,
}

impl HypothesisFileRecognizer {
    pub const NAME: &'static str = "hypothesis-file";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> Result<Recognition> {
        let raw = fs::read_to_string(&self.path).map_err(|err| {
            EvaluationError::upstream(SERVICE, format!("reading {:?}: {err}", self.path))
        })?;
        let recognition: Recognition = serde_json::from_str(&raw).map_err(|err| {
            EvaluationError::upstream(SERVICE, format!("parsing {:?}: {err}", self.path))
        })?;
        if recognition.transcript.trim().is_empty() {
            return Ok(Recognition::from_words(recognition.words));
        }
        Ok(recognition)
    }
}

impl SpeechRecognizer for HypothesisFileRecognizer {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn recognize(&self, audio: &AudioData, language: &str) -> Result<Recognition> {
        let recognition = self.load()?;
        info!(
            path = %self.path.display(),
            language,
            words = recognition.words.len(),
            audio_secs = audio.duration(),
            "loaded recorded hypotheses"
        );
        Ok(recognition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_words_and_rebuilds_transcript() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"words": [
                {{"word": "good", "start": 0.0, "end": 0.3, "confidence": 0.9}},
                {{"text": "morning", "start": 0.35, "end": 0.8, "evaluation": 0.7,
                  "phonemes": ["m", "ao", "r", "n", "ih", "ng"]}}
            ]}}"#
        )
        .unwrap();
        let recognizer = HypothesisFileRecognizer::new(file.path());
        let recognition = recognizer.recognize(&AudioData::default(), "en").unwrap();
        assert_eq!(recognition.transcript, "good morning");
        assert_eq!(recognition.words.len(), 2);
        assert_eq!(recognition.words[1].phonemes.as_ref().map(Vec::len), Some(6));
    }

    #[test]
    fn unreadable_file_is_an_upstream_failure() {
        let recognizer = HypothesisFileRecognizer::new("/nonexistent/hypotheses.json");
        let err = recognizer
            .recognize(&AudioData::default(), "en")
            .unwrap_err();
        assert!(matches!(err, EvaluationError::Upstream { .. }));
        assert!(!err.is_configuration_issue());
    }
}
