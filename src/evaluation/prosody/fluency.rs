use serde::Serialize;

use crate::config::ProsodyConfig;
use crate::evaluation::features::ProsodyFeatures;

const FREQUENCY_WEIGHT: f64 = 0.4;
const DURATION_WEIGHT: f64 = 0.3;
const FILLED_WEIGHT: f64 = 0.3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FluencyDiagnostics {
    pub pause_count: usize,
    pub long_pause_count: usize,
    pub filled_pause_count: usize,
    pub mean_pause_duration: f64,
    /// Pauses per minute of speech.
    pub disfluency_rate: f64,
    pub interpretation: String,
}

pub fn score(features: &ProsodyFeatures, config: &ProsodyConfig) -> (f64, FluencyDiagnostics) {
    let pauses = &features.pauses;
    let pause_count = pauses.len();
    let long_pause_count = pauses
        .iter()
        .filter(|pause| pause.duration() > config.long_pause_secs)
        .count();
    let filled_pause_count = pauses.iter().filter(|pause| pause.filled).count();
    let mean_pause_duration = if pause_count == 0 {
        0.0
    } else {
        pauses.iter().map(|pause| pause.duration()).sum::<f64>() / pause_count as f64
    };
    let minutes = features.speaking_duration() / 60.0;
    let disfluency_rate = if minutes > 0.0 {
        pause_count as f64 / minutes
    } else {
        0.0
    };

    let mut diagnostics = FluencyDiagnostics {
        pause_count,
        long_pause_count,
        filled_pause_count,
        mean_pause_duration,
        disfluency_rate,
        interpretation: String::new(),
    };

    if features.word_timings.is_empty() {
        diagnostics.interpretation = "No speech available to assess fluency".to_string();
        return (0.0, diagnostics);
    }

    let filled_ratio = if pause_count == 0 {
        0.0
    } else {
        filled_pause_count as f64 / pause_count as f64
    };
    let score = FREQUENCY_WEIGHT * frequency_score(disfluency_rate)
        + DURATION_WEIGHT * duration_score(mean_pause_duration)
        + FILLED_WEIGHT * filled_score(filled_ratio);
    diagnostics.interpretation = interpret(score, long_pause_count, filled_pause_count).to_string();
    (score.clamp(0.0, 1.0), diagnostics)
}

fn frequency_score(pauses_per_minute: f64) -> f64 {
    if pauses_per_minute <= 6.0 {
        1.0
    } else if pauses_per_minute <= 12.0 {
        0.7
    } else {
        0.4
    }
}

fn duration_score(mean_pause: f64) -> f64 {
    if mean_pause <= 0.5 {
        1.0
    } else if mean_pause <= 1.0 {
        0.7
    } else {
        0.4
    }
}

fn filled_score(filled_ratio: f64) -> f64 {
    if filled_ratio <= 0.0 {
        1.0
    } else if filled_ratio <= 0.3 {
        0.7
    } else {
        0.4
    }
}

fn interpret(score: f64, long_pauses: usize, filled_pauses: usize) -> &'static str {
    if score >= 0.9 {
        "Speech flows smoothly with few interruptions"
    } else if filled_pauses > long_pauses {
        "Filler words interrupt the flow of speech"
    } else if long_pauses > 0 {
        "Long pauses interrupt the flow of speech"
    } else {
        "Frequent pauses interrupt the flow of speech"
    }
}
