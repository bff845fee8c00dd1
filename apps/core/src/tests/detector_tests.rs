//! Category detector tests.

use crate::cue::{Category, CategoryDetector, RuleSet, RuleSpec};
use std::collections::BTreeMap;

fn builtin() -> CategoryDetector {
    CategoryDetector::new(RuleSet::builtin().unwrap(), 3)
}

fn table(entries: &[(Category, &[(&str, u32)])]) -> RuleSet {
    let mut specs: BTreeMap<Category, Vec<RuleSpec>> = BTreeMap::new();
    for category in Category::ALL {
        specs.insert(category, vec![]);
    }
    for (category, rules) in entries {
        specs.insert(
            *category,
            rules
                .iter()
                .map(|(pattern, weight)| RuleSpec {
                    pattern: pattern.to_string(),
                    weight: *weight,
                })
                .collect(),
        );
    }
    RuleSet::from_specs(specs).unwrap()
}

#[test]
fn test_safety_example() {
    let detection = builtin().detect("I can't breathe, it's too much");
    assert_eq!(detection.category, Category::Safety);
    assert!(detection.score >= 7);
}

#[test]
fn test_safety_wins_over_stronger_category() {
    let detector = CategoryDetector::new(
        table(&[
            (Category::Safety, &[(r"\bdizzy\b", 3)]),
            (Category::Somatic, &[(r"\bsweating\b", 4), (r"\bblushing\b", 4), (r"\bdizzy\b", 4)]),
        ]),
        3,
    );

    let detection = detector.detect("dizzy, sweating and blushing");
    assert_eq!(detection.category, Category::Safety);
    assert_eq!(detection.score, 3);
}

#[test]
fn test_builtin_shaking_is_safety_first() {
    // shaking scores 3 for safety and 4 for somatic
    let detection = builtin().detect("my hands were shaking the whole time");
    assert_eq!(detection.category, Category::Safety);
    assert_eq!(detection.score, 3);
}

#[test]
fn test_evaluation_fear_example() {
    let detection = builtin().detect("everyone was staring and judging me");
    assert_eq!(detection.category, Category::EvaluationFear);
    assert_eq!(detection.score, 4);
    assert_eq!(detection.matched, vec!["judging".to_string(), "staring".to_string()]);
}

#[test]
fn test_below_threshold_reports_best_score() {
    let detection = builtin().detect("I was a little nervous before class");
    assert_eq!(detection.category, Category::Default);
    assert_eq!(detection.score, 2);
    assert!(detection.matched.is_empty());
}

#[test]
fn test_sub_threshold_safety_is_ignored() {
    let detector = CategoryDetector::new(
        table(&[
            (Category::Safety, &[(r"\bdizzy\b", 2)]),
            (Category::Avoidance, &[(r"\bi hid it\b", 4)]),
        ]),
        3,
    );

    let detection = detector.detect("I was dizzy so I hid it");
    assert_eq!(detection.category, Category::Avoidance);
    assert_eq!(detection.score, 4);
}

#[test]
fn test_tie_goes_to_first_category() {
    let detector = CategoryDetector::new(
        table(&[
            (Category::EvaluationFear, &[(r"\bwatched\b", 4)]),
            (Category::Avoidance, &[(r"\bquiet\b", 4)]),
            (Category::Somatic, &[(r"\bsweaty\b", 4)]),
        ]),
        3,
    );

    let detection = detector.detect("I felt watched so I stayed quiet and sweaty");
    assert_eq!(detection.category, Category::EvaluationFear);
    assert_eq!(detection.score, 4);

    let detection = detector.detect("I stayed quiet and sweaty");
    assert_eq!(detection.category, Category::Avoidance);
}

#[test]
fn test_higher_later_category_wins() {
    let detector = CategoryDetector::new(
        table(&[
            (Category::EvaluationFear, &[(r"\bwatched\b", 3)]),
            (Category::Somatic, &[(r"\bsweaty\b", 5)]),
        ]),
        3,
    );

    let detection = detector.detect("watched and sweaty");
    assert_eq!(detection.category, Category::Somatic);
    assert_eq!(detection.score, 5);
}

#[test]
fn test_threshold_is_inclusive() {
    let rules = table(&[(Category::Avoidance, &[(r"\bquiet\b", 3)])]);
    let at = CategoryDetector::new(rules.clone(), 3).detect("quiet");
    assert_eq!(at.category, Category::Avoidance);

    let above = CategoryDetector::new(rules, 4).detect("quiet");
    assert_eq!(above.category, Category::Default);
    assert_eq!(above.score, 3);
}
