//! Stateless HTTP request builder and response parser for the restaurant API.
//!
//! # Design
//! `RestaurantClient` holds only a `base_url` and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. The caller executes the actual HTTP round-trip.
//!
//! Every path ends with a slash (`/restaurantes/`, `/restaurantes/{id}/`),
//! matching what the backend routes without redirecting. Every record that
//! comes back passes through the Entity Mapper.

use serde::de::DeserializeOwned;
use serde_json::Value;
use url::form_urlencoded;

use crate::error::ApiError;
use crate::http::{HttpFailure, HttpMethod, HttpRequest, HttpResponse};
use crate::mapper;
use crate::types::{Restaurant, RestaurantPayload, SaveMode};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

const COLLECTION: &str = "restaurantes";

/// Synchronous, stateless client for the restaurant API.
#[derive(Debug, Clone)]
pub struct RestaurantClient {
    base_url: String,
}

impl Default for RestaurantClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl RestaurantClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}/{COLLECTION}/", self.base_url)
    }

    fn item_url(&self, id: &str) -> String {
        format!("{}/{COLLECTION}/{}/", self.base_url, path_segment(id))
    }

    pub fn build_list(&self) -> HttpRequest {
        get(self.collection_url())
    }

    /// Server-side search; the term is sent as the `search` query parameter.
    pub fn build_search(&self, term: &str) -> HttpRequest {
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("search", term)
            .finish();
        get(format!("{}?{query}", self.collection_url()))
    }

    pub fn build_get(&self, id: &str) -> HttpRequest {
        get(self.item_url(id))
    }

    /// `POST` for `SaveMode::Create`, `PUT` on the item for `SaveMode::Update`.
    pub fn build_save(
        &self,
        mode: &SaveMode,
        payload: &RestaurantPayload,
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(payload)?;
        let (method, path) = match mode {
            SaveMode::Create => (HttpMethod::Post, self.collection_url()),
            SaveMode::Update { id } => (HttpMethod::Put, self.item_url(id)),
        };
        tracing::debug!(method = method.as_str(), %path, "built save request");
        Ok(HttpRequest {
            method,
            path,
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    pub fn build_delete(&self, id: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: self.item_url(id),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Parses a list or search response.
    pub fn parse_list(&self, response: HttpResponse) -> Result<Vec<Restaurant>, ApiError> {
        let values: Vec<Value> = decode(&response)?;
        let restaurants = mapper::to_canonical_list(&values)?;
        tracing::debug!(count = restaurants.len(), "parsed restaurant collection");
        Ok(restaurants)
    }

    pub fn parse_get(&self, response: HttpResponse) -> Result<Restaurant, ApiError> {
        let value: Value = decode(&response)?;
        Ok(mapper::to_canonical_value(&value)?)
    }

    /// Parses the record returned by a create or update.
    pub fn parse_save(&self, response: HttpResponse) -> Result<Restaurant, ApiError> {
        self.parse_get(response)
    }

    pub fn parse_delete(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)?;
        Ok(())
    }
}

/// Percent-encodes an identifier so it always addresses exactly one path
/// segment under the collection.
fn path_segment(id: &str) -> String {
    match id {
        "." => "%2E".to_string(),
        ".." => "%2E%2E".to_string(),
        _ => form_urlencoded::byte_serialize(id.as_bytes())
            .collect::<String>()
            .replace('+', "%20"),
    }
}

fn get(path: String) -> HttpRequest {
    HttpRequest {
        method: HttpMethod::Get,
        path,
        headers: Vec::new(),
        body: None,
    }
}

/// Any 2xx is success; everything else is handed to the interpreter as-is.
fn check_status(response: &HttpResponse) -> Result<(), HttpFailure> {
    if response.is_success() {
        Ok(())
    } else {
        Err(HttpFailure::from_response(response))
    }
}

fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, HttpFailure> {
    check_status(response)?;
    serde_json::from_str(&response.body).map_err(HttpFailure::malformed)
}
