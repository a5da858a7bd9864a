use crate::evaluation::analysis::GAP_EPSILON;
use crate::types::{normalize_token, WordHypothesis};

use super::{PauseRegion, WordTiming};

const VOWELS: [char; 6] = ['a', 'e', 'i', 'o', 'u', 'y'];

/// Estimates syllables by counting vowel groups, discounting a silent final "e".
pub fn count_syllables(word: &str) -> u32 {
    let lowered = word.trim().to_lowercase();
    let mut count = 0u32;
    let mut in_vowel_group = false;
    for ch in lowered.chars() {
        let is_vowel = VOWELS.contains(&ch);
        if is_vowel && !in_vowel_group {
            count += 1;
        }
        in_vowel_group = is_vowel;
    }
    if lowered.ends_with('e') && count > 1 {
        count -= 1;
    }
    count.max(1)
}

/// Word timings with syllable counts; stress is assigned later by the scorer.
pub fn word_timings(words: &[WordHypothesis]) -> Vec<WordTiming> {
    words
        .iter()
        .map(|word| WordTiming {
            word: word.text.clone(),
            start: word.start,
            end: word.end,
            syllables: count_syllables(&word.text),
            stressed: false,
        })
        .collect()
}

/// Inter-word gaps of at least `min_gap` seconds, in recognition order.
pub fn detect_pause_regions(
    words: &[WordHypothesis],
    min_gap: f64,
    disfluency_markers: &[String],
) -> Vec<PauseRegion> {
    words
        .windows(2)
        .filter_map(|pair| {
            let gap = pair[1].start - pair[0].end;
            (gap + GAP_EPSILON >= min_gap).then(|| PauseRegion {
                start: pair[0].end,
                end: pair[1].start,
                filled: is_disfluency(&pair[1].text, disfluency_markers),
            })
        })
        .collect()
}

fn is_disfluency(word: &str, markers: &[String]) -> bool {
    let normalized = normalize_token(word);
    markers.iter().any(|marker| normalize_token(marker) == normalized)
}
