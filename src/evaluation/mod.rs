pub mod alignment;
pub mod analysis;
pub mod features;
pub mod prosody;
pub mod similarity;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::EvaluationConfig;
use crate::recognizer::SpeechRecognizer;
use crate::types::{AudioData, Recognition};

use analysis::DetailedAnalysis;
use prosody::ProsodyScore;
use similarity::SimilarityScore;

/// Convenient alias for results returned by evaluation modules.
pub type Result<T> = std::result::Result<T, EvaluationError>;

#[derive(Debug, Error)]
pub enum EvaluationError {
    #[error("invalid input: {message}")]
    PreconditionViolation { message: String },
    #[error("{service} \"{name}\" is not configured")]
    NotConfigured {
        service: &'static str,
        name: String,
    },
    #[error("{service} failed: {message}")]
    Upstream {
        service: &'static str,
        message: String,
    },
    #[error("unable to decode media: {message}")]
    Media { message: String },
}

impl EvaluationError {
    pub(crate) fn precondition(message: impl Into<String>) -> Self {
        Self::PreconditionViolation {
            message: message.into(),
        }
    }

    pub(crate) fn not_configured(service: &'static str, name: impl Into<String>) -> Self {
        Self::NotConfigured {
            service,
            name: name.into(),
        }
    }

    pub(crate) fn upstream(service: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Upstream {
            service,
            message: err.to_string(),
        }
    }

    pub(crate) fn media(err: impl std::fmt::Display) -> Self {
        Self::Media {
            message: format!("{err:#}"),
        }
    }

    /// True when the caller can fix the failure by changing configuration.
    pub fn is_configuration_issue(&self) -> bool {
        matches!(self, Self::NotConfigured { .. })
    }
}

/// Everything produced for one evaluation request.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationReport {
    pub language: String,
    pub pronunciation: SimilarityScore,
    pub analysis: DetailedAnalysis,
    pub prosody: ProsodyScore,
}

/// Runs every scoring branch over one audio buffer and one reference text.
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    config: EvaluationConfig,
}

impl Evaluator {
    /// Uses `config` as given; see [`Evaluator::try_new`] for a validating constructor.
    pub fn new(config: EvaluationConfig) -> Self {
        Self { config }
    }

    /// Rejects configurations that [`EvaluationConfig::validate`] flags.
    pub fn try_new(config: EvaluationConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|err| EvaluationError::precondition(format!("{err:#}")))?;
        Ok(Self::new(config))
    }

    pub fn config(&self) -> &EvaluationConfig {
        &self.config
    }

    /// Obtains a recognition from `recognizer` and evaluates it.
    pub fn evaluate_with(
        &self,
        recognizer: &dyn SpeechRecognizer,
        audio: &AudioData,
        reference: &str,
        language: &str,
    ) -> Result<EvaluationReport> {
        info!(
            recognizer = recognizer.name(),
            language, "requesting recognition"
        );
        let recognition = recognizer.recognize(audio, language)?;
        self.evaluate(audio, reference, &recognition, language)
    }

    pub fn evaluate(
        &self,
        audio: &AudioData,
        reference: &str,
        recognition: &Recognition,
        language: &str,
    ) -> Result<EvaluationReport> {
        info!(
            samples = audio.samples.len(),
            sample_rate = audio.sample_rate,
            words = recognition.words.len(),
            "evaluating utterance"
        );
        let pronunciation = similarity::score_similarity(
            &recognition.transcript,
            reference,
            &recognition.words,
            &self.config.similarity,
        );
        let analysis = analysis::analyze_detailed(
            reference,
            &recognition.transcript,
            &recognition.words,
            &self.config.alignment,
            &self.config.analysis,
        )?;
        debug!(
            wer = analysis.word_error_rate,
            pauses = analysis.pauses.len(),
            "detailed analysis complete"
        );
        let features =
            features::extract_features(audio, &recognition.words, &self.config.features)?;
        let prosody = prosody::ProsodyScorer::new(self.config.prosody.clone())
            .score(features, language);
        info!(
            pronunciation = pronunciation.score,
            prosody = prosody.overall_score,
            wer = analysis.word_error_rate,
            "evaluation complete"
        );
        Ok(EvaluationReport {
            language: language.to_string(),
            pronunciation,
            analysis,
            prosody,
        })
    }
}
