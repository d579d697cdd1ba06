//! Domain DTOs for the restaurant API.
//!
//! # Design
//! `Restaurant` is the canonical, read-side record. It is only ever built by
//! the Entity Mapper (`crate::mapper`), which reconciles the two naming
//! conventions the backend and the form use. Capacity is stored once, in
//! `capacidad_maxima`; the `capacidad` form alias is an accessor over the same
//! value, so the two names cannot drift apart.
//!
//! `RestaurantForm` is the write-side shape as typed by a user, and
//! `RestaurantPayload` is the exact body the backend accepts on create and
//! update. Neither has room for identifiers, timestamps or aliases.

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

/// A restaurant in canonical client-side form.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Restaurant {
    pub id: String,
    pub nombre: String,
    pub direccion: String,
    pub telefono: String,
    /// Never `Some("")`; the mapper turns an empty email into `None`.
    pub email: Option<String>,
    pub capacidad_maxima: Option<u32>,
    /// Client-only; the backend does not store it.
    pub tipo_cocina: Option<String>,
    pub activo: Option<bool>,
    pub horario_apertura: Option<String>,
    pub horario_cierre: Option<String>,
    pub usuario_admin_id: Option<String>,
    pub fecha_creacion: Option<String>,
    pub fecha_edicion: Option<String>,
    /// Backend fields this layer does not know about, carried through as-is.
    pub extra: Map<String, Value>,
}

impl Restaurant {
    /// The form's name for `capacidad_maxima`.
    pub fn capacidad(&self) -> Option<u32> {
        self.capacidad_maxima
    }

    /// Writes capacity under both of its names.
    pub fn set_capacidad(&mut self, capacidad: Option<u32>) {
        self.capacidad_maxima = capacidad;
    }
}

impl Serialize for Restaurant {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_raw().serialize(serializer)
    }
}

/// The create/edit form, field by field, as the user typed it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RestaurantForm {
    pub nombre: String,
    pub direccion: String,
    pub telefono: String,
    pub email: String,
    /// Capacity as entered; parsed when the payload is built.
    pub capacidad: String,
    pub tipo_cocina: String,
}

impl From<&Restaurant> for RestaurantForm {
    fn from(restaurant: &Restaurant) -> Self {
        Self {
            nombre: restaurant.nombre.clone(),
            direccion: restaurant.direccion.clone(),
            telefono: restaurant.telefono.clone(),
            email: restaurant.email.clone().unwrap_or_default(),
            capacidad: restaurant
                .capacidad()
                .map(|c| c.to_string())
                .unwrap_or_default(),
            tipo_cocina: restaurant.tipo_cocina.clone().unwrap_or_default(),
        }
    }
}

/// Request body for `POST /restaurantes/` and `PUT /restaurantes/{id}/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestaurantPayload {
    pub nombre: String,
    pub direccion: String,
    pub telefono: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacidad_maxima: Option<u32>,
}

/// Whether a save creates a new restaurant or updates an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveMode {
    Create,
    Update { id: String },
}
