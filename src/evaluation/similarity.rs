//! Whole-utterance pronunciation score from transcript similarity and recognizer confidence.

use edit_distance::edit_distance;
use serde::Serialize;

use crate::config::SimilarityConfig;
use crate::types::{normalize_token, WordHypothesis};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarityScore {
    /// Blended pronunciation score in [0, 1].
    pub score: f64,
    pub similarity: f64,
    pub mean_confidence: Option<f64>,
    pub words: Vec<WordDetail>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordDetail {
    pub word: String,
    pub confidence: f64,
    pub expected: Option<String>,
    pub correct: bool,
}

/// Character-level Levenshtein distance.
pub fn levenshtein(a: &str, b: &str) -> usize {
    edit_distance(a, b)
}

/// Case-insensitive normalized similarity; two empty strings are identical.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return 1.0;
    }
    1.0 - levenshtein(&a, &b) as f64 / longest as f64
}

/// Blends transcript similarity with mean word confidence.
///
/// When no word confidences are available the score is the similarity alone.
pub fn score_similarity(
    hypothesis: &str,
    reference: &str,
    words: &[WordHypothesis],
    config: &SimilarityConfig,
) -> SimilarityScore {
    let similarity = similarity(hypothesis.trim(), reference.trim());
    let mean_confidence = (!words.is_empty())
        .then(|| words.iter().map(|w| w.evaluation).sum::<f64>() / words.len() as f64);
    let score = match mean_confidence {
        Some(confidence) => {
            config.similarity_weight * similarity + (1.0 - config.similarity_weight) * confidence
        }
        None => similarity,
    };

    SimilarityScore {
        score: score.clamp(0.0, 1.0),
        similarity,
        mean_confidence,
        words: word_details(reference, words),
    }
}

fn word_details(reference: &str, words: &[WordHypothesis]) -> Vec<WordDetail> {
    let expected: Vec<&str> = reference.split_whitespace().collect();
    words
        .iter()
        .enumerate()
        .map(|(idx, word)| {
            let expected = expected.get(idx).map(|token| token.to_string());
            let correct = expected
                .as_deref()
                .is_some_and(|token| normalize_token(token) == normalize_token(&word.text));
            WordDetail {
                word: word.text.clone(),
                confidence: word.evaluation,
                expected,
                correct,
            }
        })
        .collect()
}
