//! Pronunciation evaluation: word alignment, prosody features and scoring.

pub mod audio;
pub mod cli;
pub mod config;
pub mod evaluation;
pub mod recognizer;
pub mod types;

pub use evaluation::alignment::align;
pub use evaluation::analysis::analyze_detailed;
pub use evaluation::features::extract_features;
pub use evaluation::prosody::score_prosody;
pub use evaluation::similarity::score_similarity;
pub use evaluation::{EvaluationError, EvaluationReport, Evaluator, Result};
