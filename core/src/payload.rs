//! Request Builder: projects a form down to the body the backend accepts.
//!
//! `RestaurantPayload` has no field for identifiers, timestamps or the
//! `capacidad` alias, so none of them can leak into a request. The payload
//! does not depend on `SaveMode`; the mode only picks the verb and path in
//! `RestaurantClient::build_save`.

use serde_json::{Map, Value};

use crate::error::{RequiredField, ValidationError};
use crate::mapper::{self, CAPACITY};
use crate::types::{RestaurantForm, RestaurantPayload, SaveMode};

impl RestaurantForm {
    /// Assembles a form from loose key-value input.
    ///
    /// Capacity is looked up through the mapper's alias table, so
    /// `{"capacidad": "40"}` and `{"capacidad_maxima": 40}` give the same form.
    pub fn from_fields(fields: &Map<String, Value>) -> Self {
        let text = |key: &str| match fields.get(key) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        };
        let capacidad = match CAPACITY.resolve(fields) {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        };
        Self {
            nombre: text("nombre"),
            direccion: text("direccion"),
            telefono: text("telefono"),
            email: text("email"),
            capacidad,
            tipo_cocina: text("tipo_cocina"),
        }
    }

    fn required(&self, field: RequiredField) -> &str {
        match field {
            RequiredField::Nombre => &self.nombre,
            RequiredField::Direccion => &self.direccion,
            RequiredField::Telefono => &self.telefono,
        }
    }
}

/// Checks the required fields in order; the first blank one is reported.
pub fn validate(form: &RestaurantForm) -> Result<(), ValidationError> {
    match RequiredField::ALL
        .into_iter()
        .find(|field| form.required(*field).trim().is_empty())
    {
        Some(field) => Err(ValidationError::Required { field }),
        None => Ok(()),
    }
}

/// Builds the create/update body.
///
/// Callers are expected to have run `validate` first; required fields are
/// copied verbatim.
pub fn to_backend_payload(
    form: &RestaurantForm,
    mode: &SaveMode,
) -> Result<RestaurantPayload, ValidationError> {
    let email = Some(form.email.trim())
        .filter(|email| !email.is_empty())
        .map(|_| form.email.clone());

    let capacidad_maxima = match form.capacidad.trim() {
        "" => None,
        raw => Some(
            mapper::parse_capacity(&Value::String(raw.to_string())).ok_or_else(|| {
                ValidationError::InvalidCapacity {
                    value: form.capacidad.clone(),
                }
            })?,
        ),
    };

    tracing::debug!(
        ?mode,
        has_email = email.is_some(),
        ?capacidad_maxima,
        "built restaurant payload"
    );

    Ok(RestaurantPayload {
        nombre: form.nombre.clone(),
        direccion: form.direccion.clone(),
        telefono: form.telefono.clone(),
        email,
        capacidad_maxima,
    })
}
