use serde::Serialize;

use crate::config::ProsodyConfig;
use crate::evaluation::features::{EnergyPoint, ProsodyFeatures, WordTiming};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StressDiagnostics {
    pub stressed_words: usize,
    pub expected_stressed_words: f64,
    pub stress_ratio: f64,
    pub placement_accuracy: f64,
    /// Loudest word peak divided by the quietest non-silent word peak.
    pub energy_contrast: f64,
    pub interpretation: String,
}

pub struct StressAssessment {
    pub score: f64,
    pub diagnostics: StressDiagnostics,
    /// Input word timings with the stressed flag filled in.
    pub word_timings: Vec<WordTiming>,
}

pub fn score(features: &ProsodyFeatures, config: &ProsodyConfig) -> StressAssessment {
    let words = &features.word_timings;
    let mean_energy = mean_energy(&features.energy_contour);
    if words.is_empty() || mean_energy <= 0.0 {
        return StressAssessment {
            score: 0.5,
            diagnostics: StressDiagnostics {
                stressed_words: 0,
                expected_stressed_words: words.len() as f64 * config.expected_stress_ratio,
                stress_ratio: 0.0,
                placement_accuracy: 0.0,
                energy_contrast: 0.0,
                interpretation: "Insufficient data to assess word stress".to_string(),
            },
            word_timings: words.clone(),
        };
    }

    let threshold = mean_energy * config.stress_energy_ratio;
    let peaks: Vec<f64> = words
        .iter()
        .map(|word| peak_energy(&features.energy_contour, word))
        .collect();
    let word_timings: Vec<WordTiming> = words
        .iter()
        .zip(peaks.iter())
        .map(|(word, &peak)| WordTiming {
            stressed: peak > threshold,
            ..word.clone()
        })
        .collect();

    let stressed = word_timings.iter().filter(|word| word.stressed).count();
    let ratio = stressed as f64 / words.len() as f64;
    let expected = words.len() as f64 * config.expected_stress_ratio;
    let placement_accuracy = placement_accuracy(stressed, expected);
    let (score, interpretation) = ratio_score(ratio);

    StressAssessment {
        score,
        diagnostics: StressDiagnostics {
            stressed_words: stressed,
            expected_stressed_words: expected,
            stress_ratio: ratio,
            placement_accuracy,
            energy_contrast: energy_contrast(&peaks),
            interpretation: interpretation.to_string(),
        },
        word_timings,
    }
}

fn mean_energy(contour: &[EnergyPoint]) -> f64 {
    if contour.is_empty() {
        return 0.0;
    }
    contour.iter().map(|point| point.energy).sum::<f64>() / contour.len() as f64
}

fn peak_energy(contour: &[EnergyPoint], word: &WordTiming) -> f64 {
    contour
        .iter()
        .filter(|point| point.time >= word.start && point.time <= word.end)
        .map(|point| point.energy)
        .fold(0.0, f64::max)
}

fn placement_accuracy(stressed: usize, expected: f64) -> f64 {
    if expected <= 0.0 {
        return if stressed == 0 { 1.0 } else { 0.0 };
    }
    (1.0 - (stressed as f64 - expected).abs() / expected).clamp(0.0, 1.0)
}

fn energy_contrast(peaks: &[f64]) -> f64 {
    let loudest = peaks.iter().copied().fold(0.0, f64::max);
    let quietest = peaks
        .iter()
        .copied()
        .filter(|peak| *peak > 0.0)
        .fold(f64::INFINITY, f64::min);
    if quietest.is_finite() {
        loudest / quietest
    } else {
        0.0
    }
}

fn ratio_score(ratio: f64) -> (f64, &'static str) {
    if ratio < 0.3 {
        (0.5, "Stress is flat; few words stand out")
    } else if ratio <= 0.8 {
        (1.0, "Stress is distributed naturally")
    } else {
        (0.7, "Too many words are stressed")
    }
}
