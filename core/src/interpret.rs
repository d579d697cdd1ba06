//! Error Interpreter: turns any failed round-trip into one user-facing line.
//!
//! # Design
//! Callers never look inside an error body themselves. `ErrorInterpreter`
//! is a pure function of the `HttpFailure` (plus the backend address, which
//! the connectivity message names). Message precedence, first match wins:
//!
//! 1. `detail` on the error body (string verbatim, validation list joined,
//!    anything else serialized)
//! 2. `message` on the error body
//! 3. the transport's own message, or for an HTTP status the code plus
//!    any plain-text body
//! 4. the fixed "cannot reach backend" message when no connection was made
//! 5. the generic fallback
//!
//! Deletes get one extra pass: database constraint violations in `detail`
//! are rewritten into an explanation of why the restaurant cannot be
//! deleted, and any other detail is truncated before display.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ApiError, MappingError};
use crate::http::{ErrorBody, HttpFailure};

pub const UNKNOWN_ERROR: &str = "Error desconocido";

/// Longest backend detail shown verbatim after a failed delete.
pub const DETAIL_LIMIT: usize = 200;

const NOT_NULL_MARKERS: [&str; 2] = ["NotNullViolation", "violates not-null constraint"];
const FOREIGN_KEY_MARKERS: [&str; 2] = ["ForeignKeyViolation", "foreign key constraint"];

const NOT_NULL_MESSAGE: &str = "No se puede eliminar el restaurante porque tiene menús, mesas o \
     reservas asociadas. Elimina primero los datos relacionados.";
const FOREIGN_KEY_MESSAGE: &str = "No se puede eliminar el restaurante porque tiene datos \
     relacionados (menús, mesas, reservas).";

/// Coarse classification for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    Validation,
    Conflict,
    Network,
    Unknown,
}

impl ErrorCategory {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Conflict => "conflict",
            Self::Network => "network",
            Self::Unknown => "unknown",
        }
    }
}

/// The user action a failure interrupted; picks the message prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Load,
    Search,
    Fetch,
    Create,
    Update,
    Delete,
}

impl Operation {
    fn prefix(&self) -> &'static str {
        match self {
            Operation::Load => "Error al cargar los restaurantes",
            Operation::Search => "Error al buscar restaurantes",
            Operation::Fetch => "Error al cargar el restaurante",
            Operation::Create => "Error al crear",
            Operation::Update => "Error al actualizar",
            Operation::Delete => "Error al eliminar",
        }
    }
}

/// A user message together with its category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorReport {
    pub message: String,
    pub category: ErrorCategory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Violation {
    NotNull,
    ForeignKey,
}

fn violation(detail: &str) -> Option<Violation> {
    if NOT_NULL_MARKERS.iter().any(|m| detail.contains(m)) {
        Some(Violation::NotNull)
    } else if FOREIGN_KEY_MARKERS.iter().any(|m| detail.contains(m)) {
        Some(Violation::ForeignKey)
    } else {
        None
    }
}

/// Null and empty strings count as absent.
fn meaningful(value: &&Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

fn detail_text(detail: &Value) -> String {
    match detail {
        Value::String(s) => s.clone(),
        Value::Array(entries) => entries
            .iter()
            .map(|entry| match entry {
                Value::String(s) => s.clone(),
                other => other
                    .get("msg")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| other.to_string()),
            })
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

fn truncate(detail: &str) -> String {
    match detail.char_indices().nth(DETAIL_LIMIT) {
        Some((cut, _)) => format!("{}...", &detail[..cut]),
        None => detail.to_string(),
    }
}

/// `Error HTTP 503`, followed by the text body when the backend sent one.
fn status_message(status: u16, body: &ErrorBody) -> String {
    match body {
        ErrorBody::Text(text) => format!("Error HTTP {status}: {}", truncate(text)),
        ErrorBody::Empty | ErrorBody::Json(_) => format!("Error HTTP {status}"),
    }
}

#[derive(Debug, Clone)]
pub struct ErrorInterpreter {
    base_url: String,
}

impl ErrorInterpreter {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn unreachable_message(&self) -> String {
        format!(
            "No se puede conectar con el backend. Verifica que esté corriendo en {}",
            self.base_url
        )
    }

    pub fn describe(&self, failure: &HttpFailure) -> String {
        if let HttpFailure::Status { body, .. } = failure {
            if let Some(detail) = body.field("detail").filter(meaningful) {
                return detail_text(detail);
            }
            if let Some(message) = body.field("message").filter(meaningful) {
                return match message {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
            }
        }
        match failure {
            HttpFailure::Transport { message } if !message.is_empty() => message.clone(),
            HttpFailure::Unreachable | HttpFailure::Status { status: 0, .. } => {
                self.unreachable_message()
            }
            HttpFailure::Status { status, body } => status_message(*status, body),
            HttpFailure::Transport { .. } => UNKNOWN_ERROR.to_string(),
        }
    }

    /// Like `describe`, with constraint violations explained and long
    /// details cut to `DETAIL_LIMIT` characters.
    pub fn describe_delete(&self, failure: &HttpFailure) -> String {
        if let HttpFailure::Status { body, .. } = failure {
            if let Some(Value::String(detail)) = body.field("detail") {
                if !detail.is_empty() {
                    return match violation(detail) {
                        Some(Violation::NotNull) => NOT_NULL_MESSAGE.to_string(),
                        Some(Violation::ForeignKey) => FOREIGN_KEY_MESSAGE.to_string(),
                        None => truncate(detail),
                    };
                }
            }
        }
        self.describe(failure)
    }

    pub fn category(&self, failure: &HttpFailure) -> ErrorCategory {
        match failure {
            HttpFailure::Unreachable
            | HttpFailure::Transport { .. }
            | HttpFailure::Status { status: 0, .. } => ErrorCategory::Network,
            HttpFailure::Status { status, body } => {
                let detail = body.field("detail");
                let constraint = detail
                    .and_then(Value::as_str)
                    .and_then(violation)
                    .is_some();
                if *status == 409 || constraint {
                    ErrorCategory::Conflict
                } else if matches!(status, 400 | 422) || matches!(detail, Some(Value::Array(_))) {
                    ErrorCategory::Validation
                } else {
                    ErrorCategory::Unknown
                }
            }
        }
    }

    /// Full report for a failed operation, prefixed with what was attempted.
    pub fn report(&self, error: &ApiError, operation: Operation) -> ErrorReport {
        let report = match error {
            ApiError::Validation(err) => {
                return ErrorReport {
                    message: err.to_string(),
                    category: ErrorCategory::Validation,
                };
            }
            ApiError::Request(failure) => {
                let detail = if operation == Operation::Delete {
                    self.describe_delete(failure)
                } else {
                    self.describe(failure)
                };
                ErrorReport {
                    message: format!("{}: {detail}", operation.prefix()),
                    category: self.category(failure),
                }
            }
            ApiError::Mapping(err) => ErrorReport {
                message: format!("{}: {}", operation.prefix(), mapping_message(err)),
                category: ErrorCategory::Unknown,
            },
            ApiError::Serialization(err) => ErrorReport {
                message: format!(
                    "{}: no se pudo preparar la solicitud ({err})",
                    operation.prefix()
                ),
                category: ErrorCategory::Unknown,
            },
        };
        tracing::warn!(
            ?operation,
            category = report.category.name(),
            error = %error,
            "operation failed"
        );
        report
    }
}

fn mapping_message(err: &MappingError) -> String {
    match err {
        MappingError::MissingIdentifier => {
            "el backend devolvió un restaurante sin identificador".to_string()
        }
        MappingError::InvalidCapacity { value } => {
            format!("el backend devolvió una capacidad no válida ({value})")
        }
        MappingError::NotAnObject { found } => {
            format!("el backend devolvió un {found} en lugar de un restaurante")
        }
        MappingError::InCollection { index, source } => {
            format!("restaurante #{index}: {}", mapping_message(source))
        }
    }
}
