//! Client core for the restaurant management front-end.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). The caller executes the
//! actual HTTP round-trip, so everything here is deterministic and testable.
//!
//! # Design
//! - `mapper` is the single place the backend's field names
//!   (`id_restaurante`, `capacidad_maxima`) are reconciled with the form's
//!   (`id`, `capacidad`).
//! - `payload` projects a form down to the exact create/update body.
//! - `interpret` turns any `HttpFailure` into the message a user sees.
//! - `controller` holds the list and form state and decides which request
//!   comes next; it never performs I/O itself.

pub mod client;
pub mod controller;
pub mod error;
pub mod http;
pub mod interpret;
pub mod mapper;
pub mod payload;
pub mod routes;
pub mod types;

pub use client::{RestaurantClient, DEFAULT_BASE_URL};
pub use controller::{
    CollectionController, DeleteConfirmation, FormStatus, Navigation, Pending, RecordController,
    Ticket, TicketKind,
};
pub use error::{ApiError, MappingError, RequiredField, ValidationError};
pub use http::{ErrorBody, HttpFailure, HttpMethod, HttpRequest, HttpResponse, Outcome};
pub use interpret::{ErrorCategory, ErrorInterpreter, ErrorReport, Operation};
pub use routes::{FormMode, Route};
pub use types::{Restaurant, RestaurantForm, RestaurantPayload, SaveMode};
