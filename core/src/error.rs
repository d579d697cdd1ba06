//! Error types for the restaurant client core.
//!
//! # Design
//! Each layer owns its failure type: the Entity Mapper reports
//! `MappingError`, the Request Builder reports `ValidationError`, and
//! `RestaurantClient::parse_*` wraps both plus `HttpFailure` in `ApiError`.
//! None of them decide what a user sees; that is `ErrorInterpreter`'s job.
//!
//! `ValidationError` messages are shown verbatim next to the form, so they
//! are written in the UI language.

use thiserror::Error;

use crate::http::HttpFailure;

/// A backend record that cannot be turned into a canonical `Restaurant`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    /// Neither `id_restaurante` nor `id` holds a usable value.
    #[error("restaurant record has no identifier (expected `id_restaurante` or `id`)")]
    MissingIdentifier,

    /// The capacity field is present but is not a positive integer.
    #[error("restaurant record has an invalid capacity: {value}")]
    InvalidCapacity { value: String },

    /// The record is not a JSON object.
    #[error("restaurant record is not an object: {found}")]
    NotAnObject { found: String },

    /// One element of a collection failed to map; the collection is dropped.
    #[error("restaurant #{index} in collection: {source}")]
    InCollection {
        index: usize,
        #[source]
        source: Box<MappingError>,
    },
}

/// Form fields the backend requires to be non-empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    Nombre,
    Direccion,
    Telefono,
}

impl RequiredField {
    /// Validation order; the first missing field is the one reported.
    pub const ALL: [RequiredField; 3] = [
        RequiredField::Nombre,
        RequiredField::Direccion,
        RequiredField::Telefono,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            RequiredField::Nombre => "nombre",
            RequiredField::Direccion => "direccion",
            RequiredField::Telefono => "telefono",
        }
    }

    fn required_message(&self) -> &'static str {
        match self {
            RequiredField::Nombre => "El nombre es obligatorio.",
            RequiredField::Direccion => "La dirección es obligatoria.",
            RequiredField::Telefono => "El teléfono es obligatorio.",
        }
    }
}

/// Local form data rejected before any request is built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{}", field.required_message())]
    Required { field: RequiredField },

    #[error("La capacidad debe ser un número entero positivo (recibido: '{value}').")]
    InvalidCapacity { value: String },
}

impl ValidationError {
    /// Name of the offending form field.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::Required { field } => field.name(),
            ValidationError::InvalidCapacity { .. } => "capacidad",
        }
    }
}

/// Errors returned by `RestaurantClient` build and parse methods.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Mapping(#[from] MappingError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The round-trip failed; see `ErrorInterpreter` for the user message.
    #[error("request failed: {0}")]
    Request(HttpFailure),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<HttpFailure> for ApiError {
    fn from(failure: HttpFailure) -> Self {
        ApiError::Request(failure)
    }
}
