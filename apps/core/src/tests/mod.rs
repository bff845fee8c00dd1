//! Test Module
//!
//! ## Test Categories
//! - `scorer_tests`: pattern scoring and trigger tables
//! - `detector_tests`: safety priority, threshold, tie-break
//! - `hesitation_tests`: pause, filler and brevity signals
//! - `selector_tests`: pool routing and the reflection branch
//! - `analyzer_tests`: end-to-end request handling
//! - `config_tests`: environment settings and external trigger tables

pub mod detector_tests;

use crate::cue::PromptPicker;

/// Always returns the same index (wrapped to the pool size)
pub struct FixedPicker(pub usize);

impl PromptPicker for FixedPicker {
    fn pick_index(&self, len: usize) -> usize {
        self.0 % len
    }
}
