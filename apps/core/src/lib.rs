//! StoryCue core: classifies a spoken turn and chooses a follow-up question
//! for an interviewer-style app.

pub mod config;
pub mod cue;
pub mod error;
pub mod logging;
pub mod models;
pub mod shell;

pub use cue::CueAnalyzer;
pub use error::AppError;
pub use models::{AnalyzeRequest, AnalyzeResponse, HealthStatus};

#[cfg(test)]
mod tests;
