//! Speech-recognition backends, resolved by name at startup.

mod hypothesis_file;

use std::collections::BTreeMap;

use tracing::debug;

use crate::evaluation::{EvaluationError, Result};
use crate::types::{AudioData, Recognition};

pub use hypothesis_file::HypothesisFileRecognizer;

/// A backend that turns normalized mono 16 kHz audio into time-stamped words.
pub trait SpeechRecognizer: Send + Sync {
    /// Backend name used for registry lookups and logging.
    fn name(&self) -> &str;

    fn recognize(&self, audio: &AudioData, language: &str) -> Result<Recognition>;
}

/// Name-to-backend mapping built once and shared read-only afterwards.
#[derive(Default)]
pub struct RecognizerRegistry {
    backends: BTreeMap<String, Box<dyn SpeechRecognizer>>,
}

impl RecognizerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `backend` under its own name, replacing any previous entry.
    pub fn register(mut self, backend: Box<dyn SpeechRecognizer>) -> Self {
        debug!(name = backend.name(), "registering recognizer");
        self.backends.insert(backend.name().to_string(), backend);
        self
    }

    pub fn get(&self, name: &str) -> Result<&dyn SpeechRecognizer> {
        self.backends
            .get(name)
            .map(|backend| backend.as_ref())
            .ok_or_else(|| EvaluationError::not_configured("speech recognizer", name))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.backends.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::WordHypothesis;

    struct FixedRecognizer;

    impl SpeechRecognizer for FixedRecognizer {
        fn name(&self) -> &str {
            "fixed"
        }

        fn recognize(&self, _audio: &AudioData, _language: &str) -> Result<Recognition> {
            Ok(Recognition::from_words(vec![WordHypothesis::new("hi", 0.0, 0.2, 1.0)]))
        }
    }

    #[test]
    fn resolves_registered_backend() {
        let registry = RecognizerRegistry::new().register(Box::new(FixedRecognizer));
        let backend = registry.get("fixed").unwrap();
        let recognition = backend.recognize(&AudioData::default(), "en").unwrap();
        assert_eq!(recognition.transcript, "hi");
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["fixed"]);
    }

    #[test]
    fn unknown_backend_is_not_configured() {
        let registry = RecognizerRegistry::new();
        let err = registry.get("whisper").err().unwrap();
        assert!(err.is_configuration_issue());
        assert_eq!(err.to_string(), "speech recognizer \"whisper\" is not configured");
    }
}
