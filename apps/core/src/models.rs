use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::cue::category::ResponseCategory;

/// One transcribed turn to classify.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    /// Opaque caller session identifier. Not used by classification.
    #[serde(default)]
    pub session_id: Option<String>,
    /// Caller playback/recording timestamp, echoed back unchanged.
    #[serde(default)]
    pub time_sec: f64,
    /// The transcribed utterance.
    pub utterance: String,
    /// Seconds between the previous turn and this one. Absent means 0.
    #[serde(default)]
    pub gap_sec: Option<f64>,
    /// Short window of prior narrative, used to pick reflection prompts.
    #[serde(default)]
    pub recent_context: Option<String>,
}

impl AnalyzeRequest {
    pub fn new(utterance: impl Into<String>) -> Self {
        Self {
            utterance: utterance.into(),
            ..Default::default()
        }
    }

    pub fn with_gap(mut self, gap_sec: f64) -> Self {
        self.gap_sec = Some(gap_sec);
        self
    }

    pub fn with_context(mut self, recent_context: impl Into<String>) -> Self {
        self.recent_context = Some(recent_context.into());
        self
    }

    pub fn with_time(mut self, time_sec: f64) -> Self {
        self.time_sec = time_sec;
        self
    }
}

/// Follow-up chosen for a turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    /// Pool the question was drawn from.
    pub category: ResponseCategory,
    /// Detected score; 0 when routed to hesitation.
    pub score: u32,
    /// The follow-up question.
    pub question: String,
    /// Echo of the request's `time_sec`.
    pub time_sec: f64,
}

/// Liveness report for the process shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub ok: bool,
    /// Unix time in seconds.
    pub ts: f64,
}

impl HealthStatus {
    pub fn now() -> Self {
        let now = Utc::now();
        Self {
            ok: true,
            ts: now.timestamp_millis() as f64 / 1000.0,
        }
    }
}
