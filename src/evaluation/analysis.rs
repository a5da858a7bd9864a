//! Word error rate, pause and rate statistics built on top of the word aligner.

use serde::Serialize;

use crate::config::{AlignmentConfig, AnalysisConfig};
use crate::evaluation::alignment::{self, AlignmentStep, EditCounts, EditOperation};
use crate::evaluation::{EvaluationError, Result};
use crate::types::{normalize_token, tokenize, WordHypothesis};

/// Tolerance applied when comparing a gap against the pause threshold.
pub(crate) const GAP_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Serialize)]
pub struct DetailedAnalysis {
    pub reference_text: String,
    pub transcript: String,
    pub word_error_rate: f64,
    pub substitutions: usize,
    pub insertions: usize,
    pub deletions: usize,
    pub total_duration: Option<f64>,
    /// Words per minute.
    pub speech_rate: Option<f64>,
    pub average_word_duration: Option<f64>,
    pub pauses: Vec<Pause>,
    pub words: Vec<WordAnalysis>,
}

/// Silence between two consecutively recognized words.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pause {
    pub start: f64,
    pub end: f64,
    pub duration: f64,
    pub previous_word: String,
    pub next_word: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordAnalysis {
    pub operation: EditOperation,
    pub expected: Option<String>,
    pub actual: Option<String>,
    pub start: Option<f64>,
    pub end: Option<f64>,
    pub evaluation: Option<f64>,
    pub phonemes: Option<Vec<String>>,
}

/// Builds the full word-level analysis of `words` against `reference_text`.
pub fn analyze_detailed(
    reference_text: &str,
    transcript: &str,
    words: &[WordHypothesis],
    alignment_config: &AlignmentConfig,
    config: &AnalysisConfig,
) -> Result<DetailedAnalysis> {
    validate_words(words)?;
    let reference = tokenize(reference_text);
    let hypothesis: Vec<String> = words.iter().map(|w| normalize_token(&w.text)).collect();
    let steps = alignment::align(&reference, &hypothesis, alignment_config)?;
    let counts = EditCounts::from_steps(&steps);

    Ok(DetailedAnalysis {
        reference_text: reference_text.to_string(),
        transcript: transcript.to_string(),
        word_error_rate: word_error_rate(&counts, reference.len(), hypothesis.len()),
        substitutions: counts.substitutions,
        insertions: counts.insertions,
        deletions: counts.deletions,
        total_duration: total_duration(words),
        speech_rate: speech_rate(words),
        average_word_duration: average_word_duration(words),
        pauses: detect_pauses(words, config.min_pause_secs),
        words: word_analyses(&steps, &reference, words),
    })
}

/// Rejects hypotheses whose timings cannot describe a real utterance.
pub fn validate_words(words: &[WordHypothesis]) -> Result<()> {
    for (idx, word) in words.iter().enumerate() {
        if !word.start.is_finite() || !word.end.is_finite() {
            return Err(EvaluationError::precondition(format!(
                "word {idx} (\"{}\") has non-finite timing",
                word.text
            )));
        }
        if word.start < 0.0 {
            return Err(EvaluationError::precondition(format!(
                "word {idx} (\"{}\") starts at negative time {:.3}",
                word.text, word.start
            )));
        }
        if word.end < word.start {
            return Err(EvaluationError::precondition(format!(
                "word {idx} (\"{}\") ends at {:.3} before its start {:.3}",
                word.text, word.end, word.start
            )));
        }
    }
    Ok(())
}

/// An empty reference scores 0.0 against an empty hypothesis and 1.0 otherwise.
pub fn word_error_rate(counts: &EditCounts, reference_len: usize, hypothesis_len: usize) -> f64 {
    if reference_len == 0 {
        return if hypothesis_len == 0 { 0.0 } else { 1.0 };
    }
    counts.errors() as f64 / reference_len as f64
}

/// Gaps between adjacent words, in recognition order, of at least `min_gap` seconds.
pub fn detect_pauses(words: &[WordHypothesis], min_gap: f64) -> Vec<Pause> {
    words
        .windows(2)
        .filter_map(|pair| {
            let (previous, next) = (&pair[0], &pair[1]);
            let gap = next.start - previous.end;
            (gap + GAP_EPSILON >= min_gap).then(|| Pause {
                start: previous.end,
                end: next.start,
                duration: gap,
                previous_word: previous.text.clone(),
                next_word: next.text.clone(),
            })
        })
        .collect()
}

fn total_duration(words: &[WordHypothesis]) -> Option<f64> {
    let first = words.first()?;
    let last = words.last()?;
    Some((last.end - first.start).max(0.0))
}

fn speech_rate(words: &[WordHypothesis]) -> Option<f64> {
    let duration = total_duration(words)?;
    (duration > 0.0).then(|| words.len() as f64 / (duration / 60.0))
}

fn average_word_duration(words: &[WordHypothesis]) -> Option<f64> {
    if words.is_empty() {
        return None;
    }
    let total: f64 = words.iter().map(WordHypothesis::duration).sum();
    Some(total / words.len() as f64)
}

fn word_analyses(
    steps: &[AlignmentStep],
    reference: &[String],
    words: &[WordHypothesis],
) -> Vec<WordAnalysis> {
    steps
        .iter()
        .map(|step| {
            let expected = step.reference_index.map(|idx| reference[idx].clone());
            match step.hypothesis_index.map(|idx| &words[idx]) {
                Some(word) => WordAnalysis {
                    operation: step.operation,
                    expected,
                    actual: Some(word.text.clone()),
                    start: Some(word.start),
                    end: Some(word.end),
                    evaluation: Some(word.evaluation),
                    phonemes: word.phonemes.clone(),
                },
                None => WordAnalysis {
                    operation: step.operation,
                    expected,
                    actual: None,
                    start: None,
                    end: None,
                    evaluation: None,
                    phonemes: None,
                },
            }
        })
        .collect()
}
