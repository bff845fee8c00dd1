//! Line-oriented JSON driver for the binary.
//!
//! Each non-blank input line is one `AnalyzeRequest`; each output line is the
//! matching response (or trace), or `{"error": "..."}` for a bad line.

use serde::Serialize;
use std::io::{BufRead, Write};
use tracing::{error, info};

use crate::cue::analyzer::CueAnalyzer;
use crate::error::AppError;
use crate::models::{AnalyzeRequest, HealthStatus};

/// What to write for each request line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Analyze,
    Explain,
}

#[derive(Serialize)]
struct ErrorLine {
    error: String,
}

pub fn health() -> HealthStatus {
    HealthStatus::now()
}

/// Parse a single request line
pub fn parse_request(line: &str) -> Result<AnalyzeRequest, AppError> {
    Ok(serde_json::from_str(line)?)
}

/// Handle one line, returning the JSON to emit
pub fn handle_line(analyzer: &CueAnalyzer, mode: Mode, line: &str) -> Result<String, AppError> {
    let request = parse_request(line)?;
    let json = match mode {
        Mode::Analyze => serde_json::to_string(&analyzer.analyze(&request))?,
        Mode::Explain => serde_json::to_string(&analyzer.explain(&request))?,
    };
    Ok(json)
}

/// Decode one raw input line, without its line ending
fn decode_line(mut raw: Vec<u8>) -> Result<String, AppError> {
    if raw.last() == Some(&b'\n') {
        raw.pop();
        if raw.last() == Some(&b'\r') {
            raw.pop();
        }
    }
    String::from_utf8(raw)
        .map_err(|e| AppError::Validation(format!("input line is not valid UTF-8: {}", e)))
}

/// Process every line of `input`; returns the number of requests answered.
///
/// Only failures of the reader or writer end the loop. A line that is not
/// UTF-8 or not a valid request is answered with an error object.
pub fn run<R, W>(analyzer: &CueAnalyzer, mode: Mode, mut input: R, mut output: W) -> Result<usize, AppError>
where
    R: BufRead,
    W: Write,
{
    let mut answered = 0;
    let mut line_number = 0;

    loop {
        let mut raw = Vec::new();
        if input.read_until(b'\n', &mut raw)? == 0 {
            break;
        }
        line_number += 1;

        let result = decode_line(raw).and_then(|line| {
            if line.trim().is_empty() {
                Ok(None)
            } else {
                handle_line(analyzer, mode, &line).map(Some)
            }
        });

        match result {
            Ok(None) => continue,
            Ok(Some(json)) => {
                writeln!(output, "{}", json)?;
                answered += 1;
            }
            Err(e) => {
                error!("Rejected input line {}: {}", line_number, e);
                let json = serde_json::to_string(&ErrorLine {
                    error: e.to_string(),
                })?;
                writeln!(output, "{}", json)?;
            }
        }
        output.flush()?;
    }

    info!("Input closed after {} answered requests", answered);
    Ok(answered)
}
