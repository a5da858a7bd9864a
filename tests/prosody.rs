use approx::assert_relative_eq;
use elocution::config::{DimensionWeights, FeatureConfig, ProsodyConfig};
use elocution::evaluation::features::{
    extract_features, EnergyPoint, PitchPoint, ProsodyFeatures, WordTiming,
};
use elocution::evaluation::prosody::feedback::{FeedbackCategory, Severity};
use elocution::evaluation::prosody::{score_prosody, ModelType, ProsodyScorer};
use elocution::types::{AudioData, WordHypothesis};

/// Contiguous one-syllable words with the given durations.
fn timings(durations: &[f64]) -> Vec<WordTiming> {
    let mut cursor = 0.0;
    durations
        .iter()
        .map(|duration| {
            let timing = WordTiming {
                word: "cat".to_string(),
                start: cursor,
                end: cursor + duration,
                syllables: 1,
                stressed: false,
            };
            cursor += duration;
            timing
        })
        .collect()
}

fn alternating(long: f64, short: f64, count: usize) -> Vec<f64> {
    (0..count)
        .map(|idx| if idx % 2 == 0 { long } else { short })
        .collect()
}

/// A fluent, well-paced utterance with a gentle pitch glide and alternating stress.
fn healthy_features() -> ProsodyFeatures {
    let word_timings = timings(&alternating(0.405, 0.195, 10));
    let energy_contour = word_timings
        .iter()
        .enumerate()
        .map(|(idx, word)| EnergyPoint {
            time: (word.start + word.end) / 2.0,
            energy: if idx % 2 == 0 { 1.0 } else { 0.2 },
        })
        .collect();
    let pitch_contour = (0..=60)
        .map(|step| PitchPoint {
            time: step as f64 * 0.05,
            frequency: 180.0 + step as f64,
            voiced: true,
        })
        .collect();
    ProsodyFeatures {
        pitch_contour,
        energy_contour,
        word_timings,
        pauses: Vec::new(),
        duration: 4.0,
    }
}

#[test]
fn mechanical_rhythm_is_capped() {
    let features = ProsodyFeatures {
        word_timings: timings(&[0.5; 6]),
        duration: 3.0,
        ..ProsodyFeatures::default()
    };
    let score = score_prosody(features, "en");
    assert!(score.sub_scores.rhythm <= 0.6);
    assert_relative_eq!(score.diagnostics.rhythm.isochrony_index, 0.0);
}

#[test]
fn natural_rhythm_scores_high() {
    let features = ProsodyFeatures {
        word_timings: timings(&alternating(1.35, 0.65, 6)),
        duration: 6.0,
        ..ProsodyFeatures::default()
    };
    let score = score_prosody(features, "en");
    assert_relative_eq!(
        score.diagnostics.rhythm.isochrony_index,
        0.35,
        epsilon = 1e-9
    );
    assert!(score.sub_scores.rhythm > 0.9);
}

#[test]
fn empty_features_score_low_with_feedback() {
    let score = score_prosody(ProsodyFeatures::default(), "en");
    assert!(score.overall_score <= 0.5);
    assert_eq!(score.sub_scores.rhythm, 0.0);
    assert_eq!(score.sub_scores.intonation, 0.0);
    assert_eq!(score.sub_scores.stress, 0.5);
    assert_eq!(score.sub_scores.pacing, 0.0);
    assert_eq!(score.sub_scores.fluency, 0.0);
    assert_eq!(score.feedback.len(), 5);

    let stress = score
        .feedback
        .iter()
        .find(|entry| entry.category == FeedbackCategory::Stress)
        .unwrap();
    assert_eq!(stress.severity, Severity::Warning);
    assert!(score
        .feedback
        .iter()
        .filter(|entry| entry.category != FeedbackCategory::Stress)
        .all(|entry| entry.severity == Severity::Critical));
    assert!(score.feedback.iter().all(|entry| !entry.suggestion.is_empty()));
}

#[test]
fn healthy_utterance_gets_single_positive_note() {
    let score = score_prosody(healthy_features(), "en-US");

    assert_relative_eq!(score.sub_scores.rhythm, 1.0, epsilon = 1e-9);
    assert_eq!(score.sub_scores.stress, 1.0);
    assert_eq!(score.sub_scores.pacing, 1.0);
    assert_relative_eq!(score.sub_scores.fluency, 1.0, epsilon = 1e-12);
    assert!(score.sub_scores.intonation > 0.95);
    assert!(score.overall_score > 0.95 && score.overall_score <= 1.0);

    assert_eq!(score.feedback.len(), 1);
    assert_eq!(score.feedback[0].category, FeedbackCategory::Overall);
    assert_eq!(score.feedback[0].severity, Severity::Info);

    let stressed: Vec<bool> = score
        .features
        .word_timings
        .iter()
        .map(|w| w.stressed)
        .collect();
    assert_eq!(stressed, alternating_flags(10));
    assert_eq!(score.diagnostics.stress.stressed_words, 5);
    assert_relative_eq!(
        score.diagnostics.pacing.words_per_minute,
        150.0,
        epsilon = 1e-9
    );

    assert_eq!(score.metadata.language, "en-US");
    assert_eq!(score.metadata.model_type, ModelType::RuleBased);
    assert_eq!(
        score.metadata.scorer_version,
        ProsodyConfig::default().scorer_version
    );
}

fn alternating_flags(count: usize) -> Vec<bool> {
    (0..count).map(|idx| idx % 2 == 0).collect()
}

#[test]
fn overall_follows_configured_weights() {
    let config = ProsodyConfig {
        weights: DimensionWeights {
            rhythm: 0.0,
            intonation: 0.0,
            stress: 1.0,
            pacing: 0.0,
            fluency: 0.0,
        },
        ..ProsodyConfig::default()
    };
    let score = ProsodyScorer::new(config)
        .score(ProsodyFeatures::default(), "en");
    assert_relative_eq!(score.overall_score, 0.5);
}

#[test]
fn pacing_uses_word_span_without_duration() {
    let mut features = healthy_features();
    features.duration = 0.0;
    let score = score_prosody(features, "en");
    // ten words over three seconds
    assert_relative_eq!(
        score.diagnostics.pacing.words_per_minute,
        200.0,
        epsilon = 1e-9
    );
    assert_eq!(score.sub_scores.pacing, 0.8);
}

#[test]
fn report_serializes_with_screaming_enums() {
    let score = score_prosody(ProsodyFeatures::default(), "en");
    let json = serde_json::to_value(&score).unwrap();
    assert_eq!(json["metadata"]["model_type"], "RULE_BASED");
    assert_eq!(json["feedback"][0]["severity"], "CRITICAL");
    assert!(json["metadata"]["scored_at"].is_string());
}

#[test]
fn fluency_without_audio_counts_pauses_over_spoken_span() {
    let words: Vec<WordHypothesis> = [0.0, 2.0, 4.0, 6.0]
        .iter()
        .map(|&start| WordHypothesis::new("word", start, start + 0.3, 0.9))
        .collect();
    let audio = AudioData {
        samples: Vec::new(),
        sample_rate: 16_000,
    };
    let features = extract_features(&audio, &words, &FeatureConfig::default()).unwrap();
    assert_eq!(features.duration, 0.0);
    assert_eq!(features.pauses.len(), 3);

    let score = score_prosody(features, "en");
    assert_relative_eq!(
        score.diagnostics.fluency.disfluency_rate,
        3.0 / (6.3 / 60.0),
        epsilon = 1e-9
    );
    assert_relative_eq!(
        score.diagnostics.pacing.words_per_minute,
        4.0 / (6.3 / 60.0),
        epsilon = 1e-9
    );
    assert!(score.sub_scores.fluency < 0.7);
}
