//! Runtime settings.
//!
//! Values come from the process environment (after `.env` is loaded by the
//! binary). A variable that is set but cannot be parsed is a configuration
//! error, not a silent fallback to the default.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::cue::hesitation::HesitationLimits;
use crate::error::AppError;

pub const ENV_CONFIDENCE_THRESHOLD: &str = "STORYCUE_CONFIDENCE_THRESHOLD";
pub const ENV_HESITATION_GAP_SEC: &str = "STORYCUE_HESITATION_GAP_SEC";
pub const ENV_FILLER_LIMIT: &str = "STORYCUE_FILLER_LIMIT";
pub const ENV_SHORT_UTTERANCE_TOKENS: &str = "STORYCUE_SHORT_UTTERANCE_TOKENS";
pub const ENV_SEED: &str = "STORYCUE_SEED";
pub const ENV_TRIGGERS_PATH: &str = "STORYCUE_TRIGGERS_PATH";
pub const ENV_LOG_FORMAT: &str = "STORYCUE_LOG_FORMAT";

/// Output format of the log subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(AppError::Config(format!(
                "{} must be 'pretty' or 'json', got '{}'",
                ENV_LOG_FORMAT, other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Minimum score for a category to count as detected
    pub confidence_threshold: u32,
    pub hesitation_gap_sec: f64,
    pub filler_limit: usize,
    pub short_utterance_tokens: usize,
    /// Seed for reproducible prompt selection
    pub seed: Option<u64>,
    /// JSON trigger table replacing the built-in one
    pub triggers_path: Option<PathBuf>,
    pub log_format: LogFormat,
}

impl Default for Settings {
    fn default() -> Self {
        let limits = HesitationLimits::default();
        Self {
            confidence_threshold: 3,
            hesitation_gap_sec: limits.gap_sec,
            filler_limit: limits.filler_count,
            short_utterance_tokens: limits.short_tokens,
            seed: None,
            triggers_path: None,
            log_format: LogFormat::default(),
        }
    }
}

impl Settings {
    /// Read settings from the process environment
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read settings through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let settings = Self {
            confidence_threshold: parse_or(&lookup, ENV_CONFIDENCE_THRESHOLD, defaults.confidence_threshold)?,
            hesitation_gap_sec: parse_or(&lookup, ENV_HESITATION_GAP_SEC, defaults.hesitation_gap_sec)?,
            filler_limit: parse_or(&lookup, ENV_FILLER_LIMIT, defaults.filler_limit)?,
            short_utterance_tokens: parse_or(&lookup, ENV_SHORT_UTTERANCE_TOKENS, defaults.short_utterance_tokens)?,
            seed: parse_opt(&lookup, ENV_SEED)?,
            triggers_path: non_empty(&lookup, ENV_TRIGGERS_PATH).map(PathBuf::from),
            log_format: parse_or(&lookup, ENV_LOG_FORMAT, defaults.log_format)?,
        };

        if !settings.hesitation_gap_sec.is_finite() {
            return Err(AppError::Config(format!(
                "{} must be a finite number of seconds",
                ENV_HESITATION_GAP_SEC
            )));
        }

        Ok(settings)
    }

    pub fn hesitation_limits(&self) -> HesitationLimits {
        HesitationLimits {
            gap_sec: self.hesitation_gap_sec,
            filler_count: self.filler_limit,
            short_tokens: self.short_utterance_tokens,
        }
    }
}

fn non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_opt<F, T>(lookup: &F, key: &str) -> Result<Option<T>, AppError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    non_empty(lookup, key)
        .map(|raw| {
            raw.parse::<T>()
                .map_err(|e| AppError::Config(format!("{}='{}': {}", key, raw, e)))
        })
        .transpose()
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, AppError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    Ok(parse_opt(lookup, key)?.unwrap_or(default))
}
