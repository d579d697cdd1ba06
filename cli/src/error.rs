//! CLI error types and exit codes.
//!
//! Backend and validation failures arrive already interpreted as an
//! `ErrorReport`; the category picks the exit code.

use thiserror::Error;

use restaurantes_core::{ErrorCategory, ErrorReport};

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{message}")]
    Operation {
        message: String,
        category: ErrorCategory,
    },

    #[error("no se pudo leer la confirmación: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl From<ErrorReport> for CliError {
    fn from(report: ErrorReport) -> Self {
        CliError::Operation {
            message: report.message,
            category: report.category,
        }
    }
}

impl From<&ErrorReport> for CliError {
    fn from(report: &ErrorReport) -> Self {
        CliError::from(report.clone())
    }
}

impl CliError {
    /// The controller's report, or `fallback` when it recorded none.
    pub fn reported(report: Option<&ErrorReport>, fallback: &str) -> Self {
        report.map_or_else(
            || CliError::Operation {
                message: fallback.to_string(),
                category: ErrorCategory::Unknown,
            },
            |report| CliError::from(report),
        )
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Operation { category, .. } => match category {
                ErrorCategory::Validation => exit_code::USAGE,
                ErrorCategory::Conflict => exit_code::CONFLICT,
                ErrorCategory::Network => exit_code::CONNECTION,
                ErrorCategory::Unknown => exit_code::GENERAL,
            },
            CliError::Prompt(_) | CliError::Json(_) => exit_code::GENERAL,
        }
    }
}
