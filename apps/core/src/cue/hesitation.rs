//! Hesitation heuristic.
//!
//! A reply counts as hesitant when any one of three signals fires:
//! a long pause before the turn, too many filler words, or a very short
//! utterance. Content is not considered.

use serde::{Deserialize, Serialize};

/// Filler words and phrases counted by substring occurrence
const DEFAULT_FILLERS: &[&str] = &["um", "uh", "like", "you know", "kind of", "sort of", "i mean"];

/// Immutable filler lexicon
#[derive(Debug, Clone)]
pub struct FillerLexicon {
    terms: Vec<String>,
}

impl Default for FillerLexicon {
    fn default() -> Self {
        Self::new(DEFAULT_FILLERS.iter().copied())
    }
}

impl FillerLexicon {
    /// Build a lexicon; terms are lowercased and blank terms dropped
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let terms = terms
            .into_iter()
            .map(|t| t.as_ref().trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        Self { terms }
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Total non-overlapping occurrences of every term, summed across terms.
    ///
    /// Matching is plain substring containment, so "like" also counts inside
    /// "likely".
    pub fn count(&self, text: &str) -> usize {
        let lower = text.to_lowercase();
        self.terms
            .iter()
            .map(|term| lower.matches(term.as_str()).count())
            .sum()
    }
}

/// Thresholds for the three hesitation signals
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HesitationLimits {
    /// Pause (seconds) at or above which the turn is hesitant
    pub gap_sec: f64,
    /// Filler count at or above which the turn is hesitant
    pub filler_count: usize,
    /// Token count at or below which the utterance is "very short"
    pub short_tokens: usize,
}

impl Default for HesitationLimits {
    fn default() -> Self {
        Self {
            gap_sec: 2.5,
            filler_count: 2,
            short_tokens: 3,
        }
    }
}

/// Raw measurements and which signals fired
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HesitationSignals {
    pub gap_sec: f64,
    pub filler_count: usize,
    pub token_count: usize,
    pub long_pause: bool,
    pub filler_heavy: bool,
    pub very_short: bool,
}

impl HesitationSignals {
    pub fn is_hesitant(&self) -> bool {
        self.long_pause || self.filler_heavy || self.very_short
    }
}

#[derive(Debug, Clone)]
pub struct HesitationDetector {
    lexicon: FillerLexicon,
    limits: HesitationLimits,
}

impl Default for HesitationDetector {
    fn default() -> Self {
        Self::new(FillerLexicon::default(), HesitationLimits::default())
    }
}

impl HesitationDetector {
    pub fn new(lexicon: FillerLexicon, limits: HesitationLimits) -> Self {
        Self { lexicon, limits }
    }

    pub fn limits(&self) -> HesitationLimits {
        self.limits
    }

    pub fn lexicon(&self) -> &FillerLexicon {
        &self.lexicon
    }

    /// Measure all three signals. A missing gap counts as 0.
    pub fn signals(&self, utterance: &str, gap_sec: Option<f64>) -> HesitationSignals {
        let gap_sec = gap_sec.unwrap_or(0.0);
        let filler_count = self.lexicon.count(utterance);
        let token_count = utterance.split_whitespace().count();

        HesitationSignals {
            gap_sec,
            filler_count,
            token_count,
            long_pause: gap_sec >= self.limits.gap_sec,
            filler_heavy: filler_count >= self.limits.filler_count,
            very_short: token_count <= self.limits.short_tokens,
        }
    }

    pub fn is_hesitant(&self, utterance: &str, gap_sec: Option<f64>) -> bool {
        self.signals(utterance, gap_sec).is_hesitant()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_filler_counts_twice() {
        let lexicon = FillerLexicon::default();
        assert_eq!(lexicon.count("Um, I went there, um"), 2);
    }

    #[test]
    fn test_substring_counting() {
        let lexicon = FillerLexicon::new(["like"]);
        assert_eq!(lexicon.count("it was likely fine"), 1);
    }

    #[test]
    fn test_nan_gap_is_not_a_pause() {
        let detector = HesitationDetector::default();
        let signals = detector.signals("I walked up to the front of the room", Some(f64::NAN));
        assert!(!signals.long_pause);
    }
}
