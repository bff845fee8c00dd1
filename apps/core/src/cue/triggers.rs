//! Weighted trigger patterns and the pattern scorer.
//!
//! Each category owns an ordered list of `(pattern, weight)` rules. A rule adds
//! its weight once when its pattern occurs anywhere in the text, no matter how
//! many times it occurs. Patterns are compiled case-insensitively when the rule
//! set is built, so a bad pattern fails at startup instead of mid-request.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use super::category::Category;
use crate::error::AppError;

/// Built-in trigger table, one phrase per rule.
const BUILTIN_TRIGGERS: &[(Category, &[(&str, u32)])] = &[
    (
        Category::Safety,
        &[
            (r"\bcan't breathe\b", 5),
            (r"\bcant breathe\b", 5),
            (r"\bpanic\b", 5),
            (r"\bpanicking\b", 5),
            (r"\bfreaking out\b", 5),
            (r"\btoo much\b", 4),
            (r"\boverwhelming\b", 4),
            (r"\bstop\b", 4),
            (r"\bpause\b", 4),
            (r"\bi want to leave\b", 4),
            (r"\bi need to leave\b", 4),
            (r"\bshaking\b", 3),
            (r"\btrembling\b", 3),
            (r"\bheart racing\b", 3),
            (r"\bdizzy\b", 3),
            (r"\bnauseous\b", 3),
        ],
    ),
    (
        Category::EvaluationFear,
        &[
            (r"\bjudge\b", 2),
            (r"\bjudging\b", 2),
            (r"\bstaring\b", 2),
            (r"\bwatching\b", 2),
            (r"\bembarrassed\b", 2),
            (r"\bawkward\b", 2),
            (r"\bwhat will they think\b", 4),
            (r"\bpeople think\b", 4),
            (r"\beveryone thinks\b", 4),
            (r"\blaugh at me\b", 4),
            (r"\bmake fun of me\b", 4),
            (r"\bthey're looking at me\b", 4),
            (r"\bthey are looking at me\b", 4),
        ],
    ),
    (
        Category::Avoidance,
        &[
            (r"\bi didn't tell\b", 4),
            (r"\bi never told\b", 4),
            (r"\bi kept it to myself\b", 4),
            (r"\bi hid it\b", 4),
            (r"\bi avoided\b", 4),
            (r"\bi try to avoid\b", 4),
            (r"\bi stayed quiet\b", 4),
            (r"\bi didn’t speak\b", 4),
            (r"\bi don't want to talk\b", 4),
            (r"\bi can't say it\b", 4),
        ],
    ),
    (
        Category::Somatic,
        &[
            (r"\bshaking\b", 4),
            (r"\bsweating\b", 4),
            (r"\bblushing\b", 4),
            (r"\bheart racing\b", 4),
            (r"\btight chest\b", 4),
            (r"\bnervous\b", 2),
            (r"\banxious\b", 2),
        ],
    ),
    (Category::Default, &[]),
];

/// A single compiled rule
#[derive(Debug, Clone)]
pub struct TriggerRule {
    pattern: Regex,
    weight: u32,
}

impl TriggerRule {
    /// Compile a rule. The pattern is matched case-insensitively; the weight must be positive.
    pub fn new(pattern: &str, weight: u32) -> Result<Self, AppError> {
        if weight == 0 {
            return Err(AppError::Config(format!(
                "trigger '{}' has weight 0, weights must be positive",
                pattern
            )));
        }
        let pattern = RegexBuilder::new(pattern).case_insensitive(true).build()?;
        Ok(Self { pattern, weight })
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn weight(&self) -> u32 {
        self.weight
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }

    /// First matching fragment of `text`, if any
    pub fn find<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.pattern.find(text).map(|m| m.as_str())
    }
}

/// Sum the weights of every rule that matches `text` at least once.
pub fn score(text: &str, rules: &[TriggerRule]) -> u32 {
    rules
        .iter()
        .filter(|rule| rule.is_match(text))
        .map(TriggerRule::weight)
        .sum()
}

/// Uncompiled rule, as read from an external trigger table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSpec {
    pub pattern: String,
    pub weight: u32,
}

/// Immutable category -> rules mapping
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: BTreeMap<Category, Vec<TriggerRule>>,
}

impl RuleSet {
    /// Compile the built-in trigger table
    pub fn builtin() -> Result<Self, AppError> {
        let specs = BUILTIN_TRIGGERS
            .iter()
            .map(|(category, rules)| {
                let rules = rules
                    .iter()
                    .map(|(pattern, weight)| RuleSpec {
                        pattern: (*pattern).to_string(),
                        weight: *weight,
                    })
                    .collect();
                (*category, rules)
            })
            .collect();
        Self::from_specs(specs)
    }

    /// Compile a table of rule specs.
    ///
    /// `safety` and every competing category must be present (an empty list is
    /// fine). `default` may be omitted.
    pub fn from_specs(specs: BTreeMap<Category, Vec<RuleSpec>>) -> Result<Self, AppError> {
        for required in std::iter::once(Category::Safety).chain(Category::COMPETING) {
            if !specs.contains_key(&required) {
                return Err(AppError::Config(format!(
                    "trigger table has no entry for category '{}'",
                    required
                )));
            }
        }

        let mut rules = BTreeMap::new();
        for (category, category_specs) in specs {
            let compiled = category_specs
                .iter()
                .map(|spec| TriggerRule::new(&spec.pattern, spec.weight))
                .collect::<Result<Vec<_>, _>>()?;
            rules.insert(category, compiled);
        }

        Ok(Self { rules })
    }

    /// Parse and compile a JSON trigger table
    pub fn from_json_str(json: &str) -> Result<Self, AppError> {
        let specs: BTreeMap<Category, Vec<RuleSpec>> = serde_json::from_str(json)
            .map_err(|e| AppError::Config(format!("invalid trigger table: {}", e)))?;
        Self::from_specs(specs)
    }

    /// Load a JSON trigger table from disk
    pub fn from_file(path: &Path) -> Result<Self, AppError> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Rules for a category (empty when the table has none)
    pub fn rules_for(&self, category: Category) -> &[TriggerRule] {
        self.rules.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn score(&self, category: Category, text: &str) -> u32 {
        score(text, self.rules_for(category))
    }

    /// Matched fragments for a category, one per matching rule
    pub fn matched(&self, category: Category, text: &str) -> Vec<String> {
        self.rules_for(category)
            .iter()
            .filter_map(|rule| rule.find(text))
            .map(str::to_string)
            .collect()
    }

    /// Total number of compiled rules
    pub fn len(&self) -> usize {
        self.rules.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_compiles() {
        let rules = RuleSet::builtin().unwrap();
        assert!(!rules.is_empty());
        assert!(rules.rules_for(Category::Default).is_empty());
    }

    #[test]
    fn test_repeated_match_counts_once() {
        let rules = vec![TriggerRule::new(r"\bpanic\b", 5).unwrap()];
        assert_eq!(score("panic panic PANIC", &rules), 5);
    }

    #[test]
    fn test_zero_weight_rejected() {
        let err = TriggerRule::new(r"\bpanic\b", 0).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let err = TriggerRule::new(r"\b(panic", 3).unwrap_err();
        assert!(matches!(err, AppError::Pattern(_)));
    }
}
