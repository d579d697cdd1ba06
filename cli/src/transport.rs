//! Executes the requests the core builds, over blocking HTTP.
//!
//! 4xx/5xx answers are returned as data so the core can interpret them.
//! Only failures that produced no response at all become `HttpFailure`s.

use std::io::ErrorKind;
use std::time::Duration;

use restaurantes_core::{HttpFailure, HttpMethod, HttpRequest, HttpResponse, Outcome};
use ureq::{Agent, RequestBuilder};

pub struct Transport {
    agent: Agent,
}

impl Transport {
    pub fn new(timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build()
            .new_agent();
        Self { agent }
    }

    pub fn execute(&self, request: HttpRequest) -> Outcome {
        tracing::debug!(method = request.method.as_str(), path = %request.path, "sending request");
        let HttpRequest {
            method,
            path,
            headers,
            body,
        } = request;

        let result = match method {
            HttpMethod::Get => with_headers(self.agent.get(&path), &headers).call(),
            HttpMethod::Delete => with_headers(self.agent.delete(&path), &headers).call(),
            HttpMethod::Post => {
                let builder = with_headers(self.agent.post(&path), &headers);
                match body {
                    Some(body) => builder.send(body.as_bytes()),
                    None => builder.send_empty(),
                }
            }
            HttpMethod::Put => {
                let builder = with_headers(self.agent.put(&path), &headers);
                match body {
                    Some(body) => builder.send(body.as_bytes()),
                    None => builder.send_empty(),
                }
            }
        };

        let mut response = result.map_err(classify)?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        let body = response.body_mut().read_to_string().map_err(classify)?;
        tracing::debug!(status, bytes = body.len(), "received response");

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

fn with_headers<B>(
    mut builder: RequestBuilder<B>,
    headers: &[(String, String)],
) -> RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

fn classify(err: ureq::Error) -> HttpFailure {
    match err {
        ureq::Error::ConnectionFailed | ureq::Error::HostNotFound => HttpFailure::Unreachable,
        ureq::Error::Io(ref io)
            if matches!(
                io.kind(),
                ErrorKind::ConnectionRefused
                    | ErrorKind::ConnectionAborted
                    | ErrorKind::AddrNotAvailable
            ) =>
        {
            HttpFailure::Unreachable
        }
        other => {
            tracing::warn!(error = %other, "transport failure");
            HttpFailure::Transport {
                message: other.to_string(),
            }
        }
    }
}
