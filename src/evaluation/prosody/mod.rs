//! Rule-based prosody scoring.
//!
//! Each dimension lives in its own module and is scored independently from the
//! shared [`ProsodyFeatures`]; the scorer only combines their results, so any
//! dimension can be recalibrated without touching the others.

pub mod feedback;
pub mod fluency;
pub mod intonation;
pub mod pacing;
pub mod rhythm;
pub mod stress;
mod stats;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::config::ProsodyConfig;
use crate::evaluation::features::ProsodyFeatures;

use feedback::{Feedback, FeedbackCategory};
use fluency::FluencyDiagnostics;
use intonation::IntonationDiagnostics;
use pacing::PacingDiagnostics;
use rhythm::RhythmDiagnostics;
use stress::StressDiagnostics;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SubScores {
    pub rhythm: f64,
    pub intonation: f64,
    pub stress: f64,
    pub pacing: f64,
    pub fluency: f64,
}

impl SubScores {
    fn by_category(&self) -> [(FeedbackCategory, f64); 5] {
        [
            (FeedbackCategory::Rhythm, self.rhythm),
            (FeedbackCategory::Intonation, self.intonation),
            (FeedbackCategory::Stress, self.stress),
            (FeedbackCategory::Pacing, self.pacing),
            (FeedbackCategory::Fluency, self.fluency),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostics {
    pub rhythm: RhythmDiagnostics,
    pub intonation: IntonationDiagnostics,
    pub stress: StressDiagnostics,
    pub pacing: PacingDiagnostics,
    pub fluency: FluencyDiagnostics,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ModelType {
    RuleBased,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreMetadata {
    pub scorer_version: String,
    pub model_type: ModelType,
    pub language: String,
    pub scored_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProsodyScore {
    pub overall_score: f64,
    pub sub_scores: SubScores,
    pub diagnostics: Diagnostics,
    pub feedback: Vec<Feedback>,
    /// Features the score was computed from, with stress flags filled in.
    pub features: ProsodyFeatures,
    pub metadata: ScoreMetadata,
}

#[derive(Debug, Clone, Default)]
pub struct ProsodyScorer {
    config: ProsodyConfig,
}

impl ProsodyScorer {
    pub fn new(config: ProsodyConfig) -> Self {
        Self { config }
    }

    /// Scores `features`. Never fails: sparse input yields low scores instead.
    pub fn score(&self, features: ProsodyFeatures, language: &str) -> ProsodyScore {
        let (rhythm, rhythm_diagnostics) = rhythm::score(&features);
        let (intonation, intonation_diagnostics) = intonation::score(&features);
        let stress = stress::score(&features, &self.config);
        let (pacing, pacing_diagnostics) = pacing::score(&features, &self.config);
        let (fluency, fluency_diagnostics) = fluency::score(&features, &self.config);

        let sub_scores = SubScores {
            rhythm,
            intonation,
            stress: stress.score,
            pacing,
            fluency,
        };
        let overall_score = self.overall(&sub_scores);
        debug!(
            overall = overall_score,
            rhythm, intonation, stress = stress.score, pacing, fluency, "prosody scored"
        );

        ProsodyScore {
            overall_score,
            sub_scores,
            diagnostics: Diagnostics {
                rhythm: rhythm_diagnostics,
                intonation: intonation_diagnostics,
                stress: stress.diagnostics,
                pacing: pacing_diagnostics,
                fluency: fluency_diagnostics,
            },
            feedback: feedback::generate(&sub_scores.by_category(), &self.config),
            features: ProsodyFeatures {
                word_timings: stress.word_timings,
                ..features
            },
            metadata: ScoreMetadata {
                scorer_version: self.config.scorer_version.clone(),
                model_type: ModelType::RuleBased,
                language: language.to_string(),
                scored_at: Utc::now(),
            },
        }
    }

    fn overall(&self, scores: &SubScores) -> f64 {
        let weights = &self.config.weights;
        let total = weights.rhythm * scores.rhythm
            + weights.intonation * scores.intonation
            + weights.stress * scores.stress
            + weights.pacing * scores.pacing
            + weights.fluency * scores.fluency;
        total.clamp(0.0, 1.0)
    }
}

/// Scores `features` with the default configuration.
pub fn score_prosody(features: ProsodyFeatures, language: &str) -> ProsodyScore {
    ProsodyScorer::default().score(features, language)
}
