//! Serializable result-or-error envelope
//!
//! Analyses return `Result<T>` inside Rust. At the boundary to callers that
//! consume JSON the result is converted to an [`AnalysisOutcome`], which
//! serializes either as the result itself or as `{"error": "..."}`.

use crate::error::Result;
use serde::Serialize;

/// Either a successful analysis result or a structured error
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnalysisOutcome<T> {
    Ok(T),
    Failed { error: String },
}

impl<T> AnalysisOutcome<T> {
    /// Whether this outcome carries an error
    pub fn is_error(&self) -> bool {
        matches!(self, AnalysisOutcome::Failed { .. })
    }

    /// The error message, if any
    pub fn error(&self) -> Option<&str> {
        match self {
            AnalysisOutcome::Ok(_) => None,
            AnalysisOutcome::Failed { error } => Some(error),
        }
    }

    /// The successful result, if any
    pub fn ok(self) -> Option<T> {
        match self {
            AnalysisOutcome::Ok(value) => Some(value),
            AnalysisOutcome::Failed { .. } => None,
        }
    }
}

impl<T> From<Result<T>> for AnalysisOutcome<T> {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(value) => AnalysisOutcome::Ok(value),
            Err(err) => AnalysisOutcome::Failed {
                error: err.to_string(),
            },
        }
    }
}
