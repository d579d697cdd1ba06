//! Entity Mapper: backend records in, canonical `Restaurant` out.
//!
//! # Design
//! The backend names the identifier `id_restaurante` and the capacity
//! `capacidad_maxima`; the form (and some older backend builds) use `id` and
//! `capacidad`. `FIELD_ALIASES` is the only place that pairing is written
//! down. Every response that carries a restaurant, single or in a collection,
//! goes through `to_canonical`, so nothing downstream ever checks both names.
//!
//! A value counts as present when it is not null, not an empty string, not
//! numeric zero and not `false`. The backend field wins when both are
//! present.

use serde_json::{Map, Value};

use crate::error::MappingError;
use crate::types::Restaurant;

/// One field known under two names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldAlias {
    /// Name the backend uses; preferred when both are present.
    pub backend: &'static str,
    /// Name the form and older payloads use.
    pub alias: &'static str,
}

pub const IDENTIFIER: FieldAlias = FieldAlias {
    backend: "id_restaurante",
    alias: "id",
};

pub const CAPACITY: FieldAlias = FieldAlias {
    backend: "capacidad_maxima",
    alias: "capacidad",
};

pub const FIELD_ALIASES: [FieldAlias; 2] = [IDENTIFIER, CAPACITY];

impl FieldAlias {
    /// First present value, backend name first.
    pub fn resolve<'a>(&self, raw: &'a Map<String, Value>) -> Option<&'a Value> {
        [self.backend, self.alias]
            .into_iter()
            .filter_map(|key| raw.get(key))
            .find(|value| is_present(value))
    }

    /// Writes `value` under both names.
    pub fn mirror(&self, raw: &mut Map<String, Value>, value: Value) {
        raw.insert(self.alias.to_string(), value.clone());
        raw.insert(self.backend.to_string(), value);
    }
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => false,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64() != Some(0.0),
        _ => true,
    }
}

/// Maps one backend record into canonical form.
pub fn to_canonical(raw: &Map<String, Value>) -> Result<Restaurant, MappingError> {
    let id = resolve_identifier(raw)?;
    let capacidad_maxima = resolve_capacity(raw)?;

    let mut extra = raw.clone();
    for alias in FIELD_ALIASES {
        extra.remove(alias.backend);
        extra.remove(alias.alias);
    }

    Ok(Restaurant {
        id,
        nombre: take_text(&mut extra, "nombre"),
        direccion: take_text(&mut extra, "direccion"),
        telefono: take_text(&mut extra, "telefono"),
        email: take_string(&mut extra, "email").filter(|email| !email.is_empty()),
        capacidad_maxima,
        tipo_cocina: take_string(&mut extra, "tipo_cocina"),
        activo: take_bool(&mut extra, "activo"),
        horario_apertura: take_string(&mut extra, "horario_apertura"),
        horario_cierre: take_string(&mut extra, "horario_cierre"),
        usuario_admin_id: take_string(&mut extra, "usuario_admin_id"),
        fecha_creacion: take_string(&mut extra, "fecha_creacion"),
        fecha_edicion: take_string(&mut extra, "fecha_edicion"),
        extra,
    })
}

/// Maps a JSON value that should hold one record.
pub fn to_canonical_value(value: &Value) -> Result<Restaurant, MappingError> {
    match value {
        Value::Object(raw) => to_canonical(raw),
        other => Err(MappingError::NotAnObject {
            found: type_name(other).to_string(),
        }),
    }
}

/// Maps a collection; the first element that fails aborts the whole list.
pub fn to_canonical_list(values: &[Value]) -> Result<Vec<Restaurant>, MappingError> {
    values
        .iter()
        .enumerate()
        .map(|(index, value)| {
            to_canonical_value(value).map_err(|source| MappingError::InCollection {
                index,
                source: Box::new(source),
            })
        })
        .collect()
}

impl Restaurant {
    /// Renders the record as a key-value map carrying both names of every
    /// alias pair. `to_canonical(&r.to_raw()) == r` holds for every record
    /// the mapper produced.
    pub fn to_raw(&self) -> Map<String, Value> {
        let mut raw = self.extra.clone();

        IDENTIFIER.mirror(&mut raw, Value::String(self.id.clone()));
        if let Some(capacidad) = self.capacidad_maxima {
            CAPACITY.mirror(&mut raw, Value::from(capacidad));
        }

        raw.insert("nombre".into(), Value::String(self.nombre.clone()));
        raw.insert("direccion".into(), Value::String(self.direccion.clone()));
        raw.insert("telefono".into(), Value::String(self.telefono.clone()));

        let optional = [
            ("email", &self.email),
            ("tipo_cocina", &self.tipo_cocina),
            ("horario_apertura", &self.horario_apertura),
            ("horario_cierre", &self.horario_cierre),
            ("usuario_admin_id", &self.usuario_admin_id),
            ("fecha_creacion", &self.fecha_creacion),
            ("fecha_edicion", &self.fecha_edicion),
        ];
        for (key, value) in optional {
            if let Some(value) = value {
                raw.insert(key.into(), Value::String(value.clone()));
            }
        }
        if let Some(activo) = self.activo {
            raw.insert("activo".into(), Value::Bool(activo));
        }
        raw
    }
}

fn resolve_identifier(raw: &Map<String, Value>) -> Result<String, MappingError> {
    match IDENTIFIER.resolve(raw) {
        Some(Value::String(id)) => Ok(id.clone()),
        Some(Value::Number(id)) => Ok(id.to_string()),
        _ => Err(MappingError::MissingIdentifier),
    }
}

/// Capacity from either name, as a positive integer.
pub(crate) fn parse_capacity(value: &Value) -> Option<u32> {
    let parsed = match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    };
    parsed.filter(|capacity| *capacity > 0)
}

fn resolve_capacity(raw: &Map<String, Value>) -> Result<Option<u32>, MappingError> {
    match CAPACITY.resolve(raw) {
        None => Ok(None),
        Some(value) => parse_capacity(value)
            .map(Some)
            .ok_or_else(|| MappingError::InvalidCapacity {
                value: value.to_string(),
            }),
    }
}

/// Removes an optional string field. A value of the wrong type stays in
/// `extra` untouched.
fn take_string(extra: &mut Map<String, Value>, key: &str) -> Option<String> {
    match extra.remove(key) {
        Some(Value::String(s)) => Some(s),
        Some(Value::Null) | None => None,
        Some(other) => {
            extra.insert(key.to_string(), other);
            None
        }
    }
}

fn take_bool(extra: &mut Map<String, Value>, key: &str) -> Option<bool> {
    match extra.remove(key) {
        Some(Value::Bool(b)) => Some(b),
        Some(Value::Null) | None => None,
        Some(other) => {
            extra.insert(key.to_string(), other);
            None
        }
    }
}

/// Removes a required text field; missing becomes empty, non-strings are
/// rendered as JSON text.
fn take_text(extra: &mut Map<String, Value>, key: &str) -> String {
    match extra.remove(key) {
        Some(Value::String(s)) => s,
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
