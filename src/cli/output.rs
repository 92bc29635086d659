//! Robot (JSON) envelopes and small human-output helpers.

use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::Serialize;

use crate::error::{ErrorCode, FaqError, Result, StructuredError};

#[derive(Serialize)]
pub struct RobotResponse<T> {
    pub status: RobotStatus,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub data: T,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RobotStatus {
    Ok,
    Error {
        /// Error code enum value (e.g., "ENTRY_NOT_FOUND")
        code: ErrorCode,
        /// Numeric error code (e.g., 103)
        numeric_code: u16,
        message: String,
        /// Actionable suggestion for recovery
        suggestion: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        context: Option<serde_json::Value>,
        recoverable: bool,
        category: String,
    },
    Partial {
        completed: usize,
        failed: usize,
    },
}

impl From<StructuredError> for RobotStatus {
    fn from(err: StructuredError) -> Self {
        Self::Error {
            code: err.code,
            numeric_code: err.numeric_code,
            message: err.message,
            suggestion: err.suggestion,
            context: err.context,
            recoverable: err.recoverable,
            category: err.category,
        }
    }
}

fn envelope<T>(status: RobotStatus, data: T) -> RobotResponse<T> {
    RobotResponse {
        status,
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        data,
        warnings: Vec::new(),
    }
}

pub fn robot_ok<T: Serialize>(data: T) -> RobotResponse<T> {
    envelope(RobotStatus::Ok, data)
}

/// Envelope for a batch where some items failed.
pub fn robot_partial<T: Serialize>(data: T, completed: usize, failed: usize) -> RobotResponse<T> {
    if failed == 0 {
        return robot_ok(data);
    }
    envelope(RobotStatus::Partial { completed, failed }, data)
}

/// Error envelope with code, suggestion and context.
pub fn robot_error_structured(err: &FaqError) -> RobotResponse<serde_json::Value> {
    envelope(err.to_structured().into(), serde_json::Value::Null)
}

pub fn emit_robot<T: Serialize>(response: &RobotResponse<T>) -> Result<()> {
    emit_json(response)
}

pub fn emit_json<T: Serialize>(value: &T) -> Result<()> {
    let payload = serde_json::to_string_pretty(value)?;
    println!("{payload}");
    Ok(())
}

/// Score with a colour hinting at its strength.
pub fn format_score(score: f64) -> String {
    let text = format!("{score:.3}");
    if score >= 0.8 {
        text.green().to_string()
    } else if score >= 0.5 {
        text.yellow().to_string()
    } else {
        text.dimmed().to_string()
    }
}

/// Cut `text` to at most `max` characters, marking the cut with `…`.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{kept}…")
}
