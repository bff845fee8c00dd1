//! Category detection over a rule set.
//!
//! Safety is checked first and wins outright once it reaches the confidence
//! threshold. The remaining categories compete on score in a fixed order,
//! and an equal score never displaces an earlier category.

use serde::{Deserialize, Serialize};

use super::category::Category;
use super::triggers::RuleSet;

/// Outcome of category detection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detection {
    pub category: Category,
    /// Score of the winning category; for `Default`, the best competing score
    pub score: u32,
    /// Text fragments that fired rules in the winning category
    pub matched: Vec<String>,
}

/// Runs the pattern scorer over the categories in priority order
#[derive(Debug, Clone)]
pub struct CategoryDetector {
    rules: RuleSet,
    threshold: u32,
}

impl CategoryDetector {
    pub fn new(rules: RuleSet, threshold: u32) -> Self {
        Self { rules, threshold }
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Classify `text` into a category and its score
    pub fn detect(&self, text: &str) -> Detection {
        let safety_score = self.rules.score(Category::Safety, text);
        if safety_score >= self.threshold {
            return Detection {
                category: Category::Safety,
                score: safety_score,
                matched: self.rules.matched(Category::Safety, text),
            };
        }

        let mut best_category = Category::Default;
        let mut best_score = 0;
        for category in Category::COMPETING {
            let score = self.rules.score(category, text);
            if score > best_score {
                best_category = category;
                best_score = score;
            }
        }

        if best_score < self.threshold {
            return Detection {
                category: Category::Default,
                score: best_score,
                matched: vec![],
            };
        }

        Detection {
            category: best_category,
            score: best_score,
            matched: self.rules.matched(best_category, text),
        }
    }
}
