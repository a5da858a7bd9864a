use serde::Serialize;

use crate::config::ProsodyConfig;
use crate::evaluation::features::ProsodyFeatures;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PacingDiagnostics {
    pub words_per_minute: f64,
    pub syllables_per_second: f64,
    pub optimal_min_wpm: f64,
    pub optimal_max_wpm: f64,
    pub interpretation: String,
}

pub fn score(features: &ProsodyFeatures, config: &ProsodyConfig) -> (f64, PacingDiagnostics) {
    let duration = features.speaking_duration();
    let words = features.word_timings.len();
    if words == 0 || duration <= 0.0 {
        return (
            0.0,
            PacingDiagnostics {
                words_per_minute: 0.0,
                syllables_per_second: 0.0,
                optimal_min_wpm: config.optimal_min_wpm,
                optimal_max_wpm: config.optimal_max_wpm,
                interpretation: "No speech available to assess pacing".to_string(),
            },
        );
    }

    let syllables: u32 = features.word_timings.iter().map(|w| w.syllables).sum();
    let words_per_minute = words as f64 / duration * 60.0;
    let (score, interpretation) = wpm_score(words_per_minute, config);
    (
        score,
        PacingDiagnostics {
            words_per_minute,
            syllables_per_second: syllables as f64 / duration,
            optimal_min_wpm: config.optimal_min_wpm,
            optimal_max_wpm: config.optimal_max_wpm,
            interpretation: interpretation.to_string(),
        },
    )
}

fn wpm_score(wpm: f64, config: &ProsodyConfig) -> (f64, &'static str) {
    let (low, high) = (config.optimal_min_wpm, config.optimal_max_wpm);
    if wpm < 0.7 * low {
        (0.4, "Speech is much slower than natural pace")
    } else if wpm < low {
        (0.7, "Speech is slightly slow")
    } else if wpm <= high {
        (1.0, "Speaking rate is within the natural range")
    } else if wpm <= 1.3 * high {
        (0.8, "Speech is slightly fast")
    } else {
        (0.5, "Speech is much faster than natural pace")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wpm_table() {
        let config = ProsodyConfig::default();
        assert_eq!(wpm_score(60.0, &config).0, 0.4);
        assert_eq!(wpm_score(120.0, &config).0, 0.7);
        assert_eq!(wpm_score(160.0, &config).0, 1.0);
        assert_eq!(wpm_score(200.0, &config).0, 0.8);
        assert_eq!(wpm_score(300.0, &config).0, 0.5);
    }
}
