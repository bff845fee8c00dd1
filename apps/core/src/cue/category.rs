//! Category tags used by the detector and the prompt selector.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Theme detected from the text of an utterance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Physiological distress or a wish to stop (always checked first)
    Safety,
    /// Fear of being judged or watched
    EvaluationFear,
    /// Withholding, hiding, staying quiet
    Avoidance,
    /// Bodily symptoms of stress
    Somatic,
    /// Nothing scored above the confidence threshold
    Default,
}

impl Category {
    /// Categories that compete on score after safety, in tie-break order
    pub const COMPETING: [Category; 3] = [
        Category::EvaluationFear,
        Category::Avoidance,
        Category::Somatic,
    ];

    /// Every category a trigger table may carry rules for
    pub const ALL: [Category; 5] = [
        Category::Safety,
        Category::EvaluationFear,
        Category::Avoidance,
        Category::Somatic,
        Category::Default,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Safety => "safety",
            Category::EvaluationFear => "evaluation_fear",
            Category::Avoidance => "avoidance",
            Category::Somatic => "somatic",
            Category::Default => "default",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Key of the prompt pool a response was drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseCategory {
    AudienceFollowup,
    EvaluationFear,
    Avoidance,
    Somatic,
    EncouragingReflection,
    Hesitation,
}

impl ResponseCategory {
    pub const ALL: [ResponseCategory; 6] = [
        ResponseCategory::AudienceFollowup,
        ResponseCategory::EvaluationFear,
        ResponseCategory::Avoidance,
        ResponseCategory::Somatic,
        ResponseCategory::EncouragingReflection,
        ResponseCategory::Hesitation,
    ];

    /// Position of the category in `ALL`
    pub fn index(&self) -> usize {
        match self {
            ResponseCategory::AudienceFollowup => 0,
            ResponseCategory::EvaluationFear => 1,
            ResponseCategory::Avoidance => 2,
            ResponseCategory::Somatic => 3,
            ResponseCategory::EncouragingReflection => 4,
            ResponseCategory::Hesitation => 5,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ResponseCategory::AudienceFollowup => "audience_followup",
            ResponseCategory::EvaluationFear => "evaluation_fear",
            ResponseCategory::Avoidance => "avoidance",
            ResponseCategory::Somatic => "somatic",
            ResponseCategory::EncouragingReflection => "encouraging_reflection",
            ResponseCategory::Hesitation => "hesitation",
        }
    }

    /// Pool that answers a detected category directly, if there is one.
    ///
    /// `Safety` and `Default` have no pool of their own and resolve through the
    /// narrative-context branch of the selector.
    pub fn for_detected(category: Category) -> Option<Self> {
        match category {
            Category::EvaluationFear => Some(ResponseCategory::EvaluationFear),
            Category::Avoidance => Some(ResponseCategory::Avoidance),
            Category::Somatic => Some(ResponseCategory::Somatic),
            Category::Safety | Category::Default => None,
        }
    }
}

impl fmt::Display for ResponseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_match_serde_names() {
        for category in Category::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.label()));
        }
        for category in ResponseCategory::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.label()));
        }
    }

    #[test]
    fn test_index_matches_all_order() {
        for (position, category) in ResponseCategory::ALL.iter().enumerate() {
            assert_eq!(category.index(), position, "wrong index for {}", category);
        }
    }

    #[test]
    fn test_safety_has_no_direct_pool() {
        assert_eq!(ResponseCategory::for_detected(Category::Safety), None);
        assert_eq!(ResponseCategory::for_detected(Category::Default), None);
        assert_eq!(
            ResponseCategory::for_detected(Category::Somatic),
            Some(ResponseCategory::Somatic)
        );
    }
}
