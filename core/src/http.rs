//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! These types describe HTTP requests and responses as plain data. The core
//! crate builds `HttpRequest` values and parses `HttpResponse` values without
//! ever touching the network; the caller (host) executes the actual I/O.
//!
//! `HttpFailure` is the single shape every failed round-trip is reduced to
//! before anything tries to explain it to a user. It is built once, here, at
//! the boundary, and consumed by `ErrorInterpreter`.

use std::fmt;

use serde_json::Value;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// An HTTP request described as plain data.
///
/// Built by `RestaurantClient::build_*` methods. `path` is the absolute URL,
/// query string included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// What the host hands back after executing an `HttpRequest`.
///
/// `Err` is reserved for round-trips that produced no usable response at all.
pub type Outcome = Result<HttpResponse, HttpFailure>;

/// Body of a non-success response.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorBody {
    Empty,
    Json(Value),
    Text(String),
}

impl ErrorBody {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return ErrorBody::Empty;
        }
        match serde_json::from_str(trimmed) {
            Ok(value) => ErrorBody::Json(value),
            Err(_) => ErrorBody::Text(trimmed.to_string()),
        }
    }

    /// Looks up a top-level key when the body is a JSON object.
    pub fn field(&self, key: &str) -> Option<&Value> {
        match self {
            ErrorBody::Json(Value::Object(map)) => map.get(key),
            _ => None,
        }
    }
}

/// A failed round-trip, classified at the HTTP boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum HttpFailure {
    /// No connection was established (status absent or 0).
    Unreachable,

    /// The transport failed after connecting, or the response was unusable.
    Transport { message: String },

    /// The backend answered with a non-success status.
    Status { status: u16, body: ErrorBody },
}

impl HttpFailure {
    pub fn from_response(response: &HttpResponse) -> Self {
        if response.status == 0 {
            return HttpFailure::Unreachable;
        }
        HttpFailure::Status {
            status: response.status,
            body: ErrorBody::parse(&response.body),
        }
    }

    pub fn malformed(detail: impl fmt::Display) -> Self {
        HttpFailure::Transport {
            message: format!("Respuesta del backend no válida: {detail}"),
        }
    }

    /// Status code, when a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            HttpFailure::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl fmt::Display for HttpFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpFailure::Unreachable => write!(f, "backend unreachable"),
            HttpFailure::Transport { message } => write!(f, "transport failure: {message}"),
            HttpFailure::Status { status, .. } => write!(f, "HTTP {status}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn status_zero_is_unreachable() {
        assert_eq!(HttpFailure::from_response(&response(0, "")), HttpFailure::Unreachable);
    }

    #[test]
    fn json_body_is_parsed() {
        let failure = HttpFailure::from_response(&response(404, r#"{"detail":"nope"}"#));
        assert_eq!(
            failure,
            HttpFailure::Status {
                status: 404,
                body: ErrorBody::Json(json!({"detail": "nope"})),
            }
        );
    }

    #[test]
    fn non_json_body_is_kept_as_text() {
        let failure = HttpFailure::from_response(&response(500, "Internal Server Error\n"));
        assert_eq!(
            failure,
            HttpFailure::Status {
                status: 500,
                body: ErrorBody::Text("Internal Server Error".to_string()),
            }
        );
    }

    #[test]
    fn blank_body_is_empty() {
        assert_eq!(ErrorBody::parse("  \n"), ErrorBody::Empty);
    }

    #[test]
    fn field_only_reads_objects() {
        assert_eq!(
            ErrorBody::Json(json!({"message": "m"})).field("message"),
            Some(&json!("m"))
        );
        assert!(ErrorBody::Json(json!(["message"])).field("message").is_none());
        assert!(ErrorBody::Text("message".into()).field("message").is_none());
    }
}
