//! # Cue Module
//!
//! Classifies one transcribed turn and picks the interviewer's follow-up.
//!
//! ## Components
//! - `triggers`: weighted regex rules and the pattern scorer
//! - `detector`: safety-first category detection with a confidence threshold
//! - `hesitation`: pause / filler / brevity heuristic
//! - `prompts`: prompt pools and follow-up selection
//! - `category`: category and response keys
//! - `analyzer`: main orchestrator

pub mod analyzer;
pub mod category;
pub mod detector;
pub mod hesitation;
pub mod prompts;
pub mod triggers;

pub use analyzer::{AnalysisTrace, CueAnalyzer};
pub use category::{Category, ResponseCategory};
pub use detector::{CategoryDetector, Detection};
pub use hesitation::{FillerLexicon, HesitationDetector, HesitationLimits, HesitationSignals};
pub use prompts::{
    PromptPicker, PromptPool, PromptPools, PromptSelector, SeededPicker, Selection, ThreadRngPicker,
};
pub use triggers::{score, RuleSet, RuleSpec, TriggerRule};
