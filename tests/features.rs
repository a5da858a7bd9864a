use std::f32::consts::PI;

use approx::assert_relative_eq;
use elocution::config::FeatureConfig;
use elocution::evaluation::features::extract_features;
use elocution::evaluation::EvaluationError;
use elocution::types::{AudioData, WordHypothesis};

const SAMPLE_RATE: u32 = 16_000;

fn sine(freq: f32, seconds: f32, amplitude: f32) -> AudioData {
    let len = (SAMPLE_RATE as f32 * seconds) as usize;
    let samples = (0..len)
        .map(|n| amplitude * (2.0 * PI * freq * n as f32 / SAMPLE_RATE as f32).sin())
        .collect();
    AudioData {
        samples,
        sample_rate: SAMPLE_RATE,
    }
}

fn silence(seconds: f32) -> AudioData {
    AudioData {
        samples: vec![0.0; (SAMPLE_RATE as f32 * seconds) as usize],
        sample_rate: SAMPLE_RATE,
    }
}

#[test]
fn pause_between_words_is_reported() {
    let words = vec![
        WordHypothesis::new("hello", 0.0, 0.5, 0.9),
        WordHypothesis::new("world", 1.0, 1.5, 0.9),
    ];
    let features = extract_features(&silence(1.5), &words, &FeatureConfig::default()).unwrap();
    assert_eq!(features.pauses.len(), 1);
    assert_relative_eq!(features.pauses[0].start, 0.5);
    assert_relative_eq!(features.pauses[0].end, 1.0);
    assert!(!features.pauses[0].filled);
    assert_relative_eq!(features.duration, 1.5, epsilon = 1e-9);
}

#[test]
fn back_to_back_words_have_no_pause() {
    let words = vec![
        WordHypothesis::new("hello", 0.0, 0.5, 0.9),
        WordHypothesis::new("world", 0.5, 1.0, 0.9),
    ];
    let features = extract_features(&silence(1.0), &words, &FeatureConfig::default()).unwrap();
    assert!(features.pauses.is_empty());
    assert_eq!(features.word_timings.len(), 2);
    assert_eq!(features.word_timings[0].syllables, 2);
}

#[test]
fn filled_pause_is_flagged() {
    let words = vec![
        WordHypothesis::new("so", 0.0, 0.3, 0.9),
        WordHypothesis::new("Um", 0.8, 1.0, 0.5),
        WordHypothesis::new("yes", 1.0, 1.3, 0.9),
    ];
    let features = extract_features(&silence(1.3), &words, &FeatureConfig::default()).unwrap();
    assert_eq!(features.pauses.len(), 1);
    assert!(features.pauses[0].filled);
}

/// Voiced frequencies of every frame whose 75 Hz lag window fits inside the buffer.
fn tracked_frequencies(audio: &AudioData) -> Vec<(bool, f64)> {
    let features = extract_features(audio, &[], &FeatureConfig::default()).unwrap();
    let window = 160 + 213;
    features
        .pitch_contour
        .iter()
        .filter(|p| (p.time * SAMPLE_RATE as f64).round() as usize + window <= audio.samples.len())
        .map(|p| (p.voiced, p.frequency))
        .collect()
}

#[test]
fn steady_tone_tracks_its_pitch() {
    let audio = sine(200.0, 0.5, 0.5);
    let features = extract_features(&audio, &[], &FeatureConfig::default()).unwrap();
    assert!(!features.pitch_contour.is_empty());
    assert_eq!(features.pitch_contour.len(), features.energy_contour.len());
    for (voiced, frequency) in tracked_frequencies(&audio) {
        assert!(voiced);
        assert!((185.0..=215.0).contains(&frequency), "got {frequency}");
    }
    for point in &features.energy_contour {
        assert_relative_eq!(point.energy, 0.5 / 2f64.sqrt(), epsilon = 0.02);
    }
}

#[test]
fn male_range_voices_are_tracked() {
    for freq in [90.0f32, 110.0, 120.0, 130.0] {
        let tracked = tracked_frequencies(&sine(freq, 0.5, 0.5));
        assert!(tracked.len() > 90);
        for (voiced, frequency) in tracked {
            assert!(voiced, "{freq} Hz frame unvoiced");
            assert!(
                (frequency - freq as f64).abs() < 5.0,
                "{freq} Hz estimated as {frequency} Hz"
            );
        }
    }
}

#[test]
fn silence_is_unvoiced() {
    let features = extract_features(&silence(0.2), &[], &FeatureConfig::default()).unwrap();
    assert!(features.pitch_contour.iter().all(|p| !p.voiced && p.frequency == 0.0));
    assert!(features.energy_contour.iter().all(|e| e.energy == 0.0));
}

#[test]
fn frames_are_time_ordered() {
    let features =
        extract_features(&sine(150.0, 0.3, 0.3), &[], &FeatureConfig::default()).unwrap();
    assert!(features
        .pitch_contour
        .windows(2)
        .all(|pair| pair[0].time < pair[1].time));
    assert_relative_eq!(features.pitch_contour[1].time, 0.005, epsilon = 1e-9);
}

#[test]
fn invalid_input_is_rejected() {
    let config = FeatureConfig::default();
    let unrated = AudioData {
        samples: vec![0.0; 10],
        sample_rate: 0,
    };
    assert!(matches!(
        extract_features(&unrated, &[], &config),
        Err(EvaluationError::PreconditionViolation { .. })
    ));

    let backwards = [WordHypothesis::new("oops", 1.0, 0.5, 0.9)];
    assert!(matches!(
        extract_features(&silence(1.0), &backwards, &config),
        Err(EvaluationError::PreconditionViolation { .. })
    ));
}

#[test]
fn short_buffer_yields_empty_contours() {
    let audio = AudioData {
        samples: vec![0.1; 20],
        sample_rate: SAMPLE_RATE,
    };
    let features = extract_features(&audio, &[], &FeatureConfig::default()).unwrap();
    assert!(features.pitch_contour.is_empty());
    assert!(features.energy_contour.is_empty());
}
