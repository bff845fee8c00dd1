//! Cue Analyzer - orchestrates one classification turn.
//!
//! Pipeline:
//! 1. Trim the utterance
//! 2. Measure hesitation signals
//! 3. Detect the topic category (always computed, even when hesitant)
//! 4. Select the follow-up prompt

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::category::Category;
use super::detector::{CategoryDetector, Detection};
use super::hesitation::{FillerLexicon, HesitationDetector, HesitationLimits, HesitationSignals};
use super::prompts::{PromptPicker, PromptPools, PromptSelector, SeededPicker, ThreadRngPicker};
use super::triggers::RuleSet;
use crate::config::Settings;
use crate::error::AppError;
use crate::models::{AnalyzeRequest, AnalyzeResponse};

/// Everything `analyze` computed for one request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisTrace {
    pub detection: Detection,
    pub hesitation: HesitationSignals,
    pub response: AnalyzeResponse,
}

/// Stateless classifier; safe to share across threads
pub struct CueAnalyzer {
    detector: CategoryDetector,
    hesitation: HesitationDetector,
    selector: PromptSelector,
}

impl CueAnalyzer {
    /// Assemble an analyzer from explicitly constructed parts
    pub fn new(
        detector: CategoryDetector,
        hesitation: HesitationDetector,
        selector: PromptSelector,
    ) -> Self {
        Self {
            detector,
            hesitation,
            selector,
        }
    }

    /// Built-in tables with default thresholds and a thread-local random picker
    pub fn with_defaults() -> Result<Self, AppError> {
        Ok(Self::new(
            CategoryDetector::new(RuleSet::builtin()?, Settings::default().confidence_threshold),
            HesitationDetector::new(FillerLexicon::default(), HesitationLimits::default()),
            PromptSelector::new(PromptPools::builtin()?, Box::new(ThreadRngPicker)),
        ))
    }

    /// Build from settings, loading an external trigger table when one is configured
    pub fn from_settings(settings: &Settings) -> Result<Self, AppError> {
        let rules = match &settings.triggers_path {
            Some(path) => {
                info!("Loading trigger table from {:?}", path);
                RuleSet::from_file(path)?
            }
            None => RuleSet::builtin()?,
        };
        let pools = PromptPools::builtin()?;
        let picker: Box<dyn PromptPicker> = match settings.seed {
            Some(seed) => Box::new(SeededPicker::new(seed)),
            None => Box::new(ThreadRngPicker),
        };

        info!(
            "Cue analyzer ready: {} trigger rules, {} prompts, threshold {}",
            rules.len(),
            pools.total_prompts(),
            settings.confidence_threshold
        );

        Ok(Self::new(
            CategoryDetector::new(rules, settings.confidence_threshold),
            HesitationDetector::new(FillerLexicon::default(), settings.hesitation_limits()),
            PromptSelector::new(pools, picker),
        ))
    }

    pub fn detect(&self, text: &str) -> Detection {
        self.detector.detect(text.trim())
    }

    pub fn is_hesitant(&self, utterance: &str, gap_sec: Option<f64>) -> bool {
        self.hesitation.is_hesitant(utterance.trim(), gap_sec)
    }

    /// Classify a request and choose the follow-up question
    pub fn analyze(&self, request: &AnalyzeRequest) -> AnalyzeResponse {
        self.explain(request).response
    }

    /// Same as `analyze`, but also returns the detection and hesitation signals
    pub fn explain(&self, request: &AnalyzeRequest) -> AnalysisTrace {
        let utterance = request.utterance.trim();

        let hesitation = self.hesitation.signals(utterance, request.gap_sec);
        let detection = self.detector.detect(utterance);

        if detection.category == Category::Safety && !hesitation.is_hesitant() {
            warn!(
                score = detection.score,
                matched = ?detection.matched,
                "Safety language detected; no dedicated prompt pool, using narrative follow-up"
            );
        }

        let selection = self.selector.select(
            detection.category,
            detection.score,
            hesitation.is_hesitant(),
            request.recent_context.as_deref(),
        );

        debug!(
            session_id = request.session_id.as_deref().unwrap_or("-"),
            detected = %detection.category,
            detected_score = detection.score,
            hesitant = hesitation.is_hesitant(),
            fillers = hesitation.filler_count,
            tokens = hesitation.token_count,
            category = %selection.category,
            "Utterance analyzed"
        );

        AnalysisTrace {
            detection,
            hesitation,
            response: AnalyzeResponse {
                category: selection.category,
                score: selection.score,
                question: selection.question,
                time_sec: request.time_sec,
            },
        }
    }
}
