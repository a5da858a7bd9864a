use serde::Serialize;

use crate::evaluation::features::ProsodyFeatures;

use super::stats::RunningStats;

/// Syllable-duration variability of natural connected speech.
pub const REFERENCE_CV: f64 = 0.35;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RhythmDiagnostics {
    pub syllable_duration_variance: f64,
    pub reference_cv: f64,
    /// Coefficient of variation of per-syllable durations.
    pub isochrony_index: f64,
    pub interpretation: String,
}

pub fn score(features: &ProsodyFeatures) -> (f64, RhythmDiagnostics) {
    let stats: RunningStats = features
        .word_timings
        .iter()
        .filter(|timing| timing.syllables > 0)
        .map(|timing| timing.duration() / timing.syllables as f64)
        .collect();

    if stats.count() == 0 {
        return (
            0.0,
            RhythmDiagnostics {
                syllable_duration_variance: 0.0,
                reference_cv: REFERENCE_CV,
                isochrony_index: 0.0,
                interpretation: "No words available to assess rhythm".to_string(),
            },
        );
    }

    let cv = stats.coefficient_of_variation();
    let (score, interpretation) = score_cv(cv);
    (
        score,
        RhythmDiagnostics {
            syllable_duration_variance: stats.variance(),
            reference_cv: REFERENCE_CV,
            isochrony_index: cv,
            interpretation: interpretation.to_string(),
        },
    )
}

fn score_cv(cv: f64) -> (f64, &'static str) {
    if cv < 0.2 {
        (0.6, "Rhythm is overly regular and sounds mechanical")
    } else if cv <= 0.5 {
        let score = 1.0 - (cv - REFERENCE_CV).abs() / REFERENCE_CV;
        (score.clamp(0.0, 1.0), "Rhythm varies naturally between syllables")
    } else {
        let score = (1.0 - (cv - 0.5) / 0.5).max(0.3);
        (score.min(1.0), "Rhythm is irregular with uneven syllable timing")
    }
}
