use serde::Serialize;

use crate::config::ProsodyConfig;

/// Sub-scores below this produce a feedback entry.
const FEEDBACK_THRESHOLD: f64 = 0.7;
const CRITICAL_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeedbackCategory {
    Rhythm,
    Intonation,
    Stress,
    Pacing,
    Fluency,
    Overall,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Feedback {
    pub category: FeedbackCategory,
    pub severity: Severity,
    pub message: String,
    pub suggestion: String,
}

impl FeedbackCategory {
    fn message(self) -> &'static str {
        match self {
            Self::Rhythm => "Your rhythm could be more natural.",
            Self::Intonation => "Your intonation could be more expressive.",
            Self::Stress => "Word stress could be clearer.",
            Self::Pacing => "Your speaking rate is outside the comfortable range.",
            Self::Fluency => "Pauses and fillers are interrupting your speech.",
            Self::Overall => "Excellent prosody overall.",
        }
    }

    fn suggestion(self, config: &ProsodyConfig) -> String {
        let text = match self {
            Self::Rhythm => {
                "Practice with a native recording and mirror how stressed syllables \
                 stretch while unstressed ones shorten."
            }
            Self::Intonation => {
                "Let your pitch rise and fall with meaning: rise for questions, \
                 fall at the end of statements."
            }
            Self::Stress => {
                "Emphasize content words such as nouns and verbs by making them \
                 louder and longer than function words."
            }
            Self::Pacing => {
                return format!(
                    "Aim for roughly {:.0} to {:.0} words per minute; read along with a \
                     recording to find a steady pace.",
                    config.optimal_min_wpm, config.optimal_max_wpm
                );
            }
            Self::Fluency => {
                "Plan the next phrase before speaking and replace fillers like \
                 \"um\" with a short silent pause."
            }
            Self::Overall => "Keep practicing with varied material to maintain this level.",
        };
        text.to_string()
    }
}

/// One entry per weak dimension, or a single positive entry when none are weak.
pub fn generate(scores: &[(FeedbackCategory, f64)], config: &ProsodyConfig) -> Vec<Feedback> {
    let mut feedback: Vec<Feedback> = scores
        .iter()
        .filter(|(_, score)| *score < FEEDBACK_THRESHOLD)
        .map(|&(category, score)| Feedback {
            category,
            severity: if score < CRITICAL_THRESHOLD {
                Severity::Critical
            } else {
                Severity::Warning
            },
            message: category.message().to_string(),
            suggestion: category.suggestion(config),
        })
        .collect();

    if feedback.is_empty() {
        feedback.push(Feedback {
            category: FeedbackCategory::Overall,
            severity: Severity::Info,
            message: FeedbackCategory::Overall.message().to_string(),
            suggestion: FeedbackCategory::Overall.suggestion(config),
        });
    }
    feedback
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_follows_score() {
        let feedback = generate(
            &[
                (FeedbackCategory::Rhythm, 0.9),
                (FeedbackCategory::Pacing, 0.6),
                (FeedbackCategory::Fluency, 0.2),
            ],
            &ProsodyConfig::default(),
        );
        assert_eq!(feedback.len(), 2);
        assert_eq!(feedback[0].category, FeedbackCategory::Pacing);
        assert_eq!(feedback[0].severity, Severity::Warning);
        assert_eq!(feedback[1].severity, Severity::Critical);
    }

    #[test]
    fn strong_scores_get_single_info_entry() {
        let feedback = generate(
            &[(FeedbackCategory::Rhythm, 0.95), (FeedbackCategory::Stress, 0.7)],
            &ProsodyConfig::default(),
        );
        assert_eq!(feedback.len(), 1);
        assert_eq!(feedback[0].severity, Severity::Info);
        assert_eq!(feedback[0].category, FeedbackCategory::Overall);
    }

    #[test]
    fn pacing_suggestion_quotes_configured_band() {
        let config = ProsodyConfig {
            optimal_min_wpm: 110.0,
            optimal_max_wpm: 150.0,
            ..ProsodyConfig::default()
        };
        let feedback = generate(&[(FeedbackCategory::Pacing, 0.4)], &config);
        assert!(feedback[0].suggestion.contains("110 to 150 words per minute"));

        let default_band = generate(&[(FeedbackCategory::Pacing, 0.4)], &ProsodyConfig::default());
        assert!(default_band[0].suggestion.contains("140 to 180 words per minute"));
    }
}
