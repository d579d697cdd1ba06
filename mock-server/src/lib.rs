use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Restaurante {
    pub id_restaurante: Uuid,
    pub nombre: String,
    pub direccion: String,
    pub telefono: String,
    pub email: Option<String>,
    pub capacidad_maxima: Option<u32>,
    pub horario_apertura: Option<String>,
    pub horario_cierre: Option<String>,
    pub activo: bool,
    pub usuario_admin_id: Option<Uuid>,
    pub fecha_creacion: DateTime<Utc>,
    pub fecha_edicion: Option<DateTime<Utc>>,
}

/// Body of `POST /restaurantes/` and `PUT /restaurantes/{id}/`.
#[derive(Debug, Deserialize)]
pub struct RestauranteIn {
    pub nombre: String,
    pub direccion: String,
    pub telefono: String,
    pub email: Option<String>,
    pub capacidad_maxima: Option<u32>,
    pub horario_apertura: Option<String>,
    pub horario_cierre: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub search: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Mesa {
    pub id_mesa: Uuid,
    pub id_restaurante: Uuid,
}

#[derive(Debug, Default)]
pub struct Store {
    pub restaurantes: HashMap<Uuid, Restaurante>,
    /// Tables per restaurant; a restaurant with tables cannot be deleted.
    pub mesas: HashMap<Uuid, Vec<Uuid>>,
}

pub type Db = Arc<RwLock<Store>>;

/// One entry of a FastAPI-style validation `detail` list.
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl FieldError {
    fn body(field: &str, msg: &str, kind: &str) -> Self {
        Self {
            loc: vec!["body".to_string(), field.to_string()],
            msg: msg.to_string(),
            kind: kind.to_string(),
        }
    }
}

/// Failures rendered the way the real backend renders them: a JSON object
/// with a `detail` field.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("restaurant not found")]
    NotFound,

    #[error("request body failed validation")]
    Validation(Vec<FieldError>),

    #[error("restaurant has dependent rows")]
    ForeignKey { id: Uuid },
}

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        tracing::warn!(error = %self, "request rejected");
        match self {
            BackendError::NotFound => (
                StatusCode::NOT_FOUND,
                Json(json!({"detail": "Restaurante no encontrado"})),
            )
                .into_response(),
            BackendError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({"detail": errors})),
            )
                .into_response(),
            BackendError::ForeignKey { id } => (
                StatusCode::CONFLICT,
                Json(json!({
                    "detail": format!(
                        "(psycopg2.errors.ForeignKeyViolation) update or delete on table \
                         \"restaurantes\" violates foreign key constraint \
                         \"mesas_id_restaurante_fkey\" on table \"mesas\"\n\
                         DETAIL: Key (id_restaurante)=({id}) is still referenced \
                         from table \"mesas\"."
                    )
                })),
            )
                .into_response(),
        }
    }
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/restaurantes/", get(list_restaurantes).post(create_restaurante))
        .route(
            "/restaurantes/{id}/",
            get(get_restaurante)
                .put(update_restaurante)
                .delete(delete_restaurante),
        )
        .route("/restaurantes/{id}/mesas/", post(create_mesa))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn parse_id(raw: &str) -> Result<Uuid, BackendError> {
    raw.parse().map_err(|_| {
        BackendError::Validation(vec![FieldError {
            loc: vec!["path".to_string(), "id".to_string()],
            msg: "Input should be a valid UUID".to_string(),
            kind: "uuid_parsing".to_string(),
        }])
    })
}

fn validate(input: &RestauranteIn) -> Result<(), BackendError> {
    let mut errors = Vec::new();
    for (field, value) in [
        ("nombre", &input.nombre),
        ("direccion", &input.direccion),
        ("telefono", &input.telefono),
    ] {
        if value.trim().is_empty() {
            errors.push(FieldError::body(
                field,
                "String should have at least 1 character",
                "string_too_short",
            ));
        }
    }
    if let Some(email) = &input.email {
        if !email.contains('@') {
            errors.push(FieldError::body(
                "email",
                "value is not a valid email address",
                "value_error",
            ));
        }
    }
    if input.capacidad_maxima == Some(0) {
        errors.push(FieldError::body(
            "capacidad_maxima",
            "Input should be greater than 0",
            "greater_than",
        ));
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(BackendError::Validation(errors))
    }
}

fn body(
    payload: Result<Json<RestauranteIn>, JsonRejection>,
) -> Result<RestauranteIn, BackendError> {
    let Json(input) = payload.map_err(|rejection| {
        BackendError::Validation(vec![FieldError {
            loc: vec!["body".to_string()],
            msg: rejection.body_text(),
            kind: "json_invalid".to_string(),
        }])
    })?;
    validate(&input)?;
    Ok(input)
}

fn matches(restaurante: &Restaurante, term: &str) -> bool {
    let term = term.to_lowercase();
    restaurante.nombre.to_lowercase().contains(&term)
        || restaurante.direccion.to_lowercase().contains(&term)
}

async fn list_restaurantes(
    State(db): State<Db>,
    Query(params): Query<ListParams>,
) -> Json<Vec<Restaurante>> {
    let store = db.read().await;
    let term = params.search.as_deref().map(str::trim).unwrap_or_default();
    let mut found: Vec<Restaurante> = store
        .restaurantes
        .values()
        .filter(|r| term.is_empty() || matches(r, term))
        .cloned()
        .collect();
    found.sort_by(|a, b| {
        a.fecha_creacion
            .cmp(&b.fecha_creacion)
            .then_with(|| a.id_restaurante.cmp(&b.id_restaurante))
    });
    Json(found)
}

async fn create_restaurante(
    State(db): State<Db>,
    payload: Result<Json<RestauranteIn>, JsonRejection>,
) -> Result<(StatusCode, Json<Restaurante>), BackendError> {
    let input = body(payload)?;
    let restaurante = Restaurante {
        id_restaurante: Uuid::new_v4(),
        nombre: input.nombre,
        direccion: input.direccion,
        telefono: input.telefono,
        email: input.email,
        capacidad_maxima: input.capacidad_maxima,
        horario_apertura: input.horario_apertura,
        horario_cierre: input.horario_cierre,
        activo: true,
        usuario_admin_id: None,
        fecha_creacion: Utc::now(),
        fecha_edicion: None,
    };
    tracing::info!(id = %restaurante.id_restaurante, "restaurant created");
    db.write()
        .await
        .restaurantes
        .insert(restaurante.id_restaurante, restaurante.clone());
    Ok((StatusCode::CREATED, Json(restaurante)))
}

async fn get_restaurante(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<Restaurante>, BackendError> {
    let id = parse_id(&id)?;
    let store = db.read().await;
    store
        .restaurantes
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or(BackendError::NotFound)
}

async fn update_restaurante(
    State(db): State<Db>,
    Path(id): Path<String>,
    payload: Result<Json<RestauranteIn>, JsonRejection>,
) -> Result<Json<Restaurante>, BackendError> {
    let id = parse_id(&id)?;
    let input = body(payload)?;
    let mut store = db.write().await;
    let restaurante = store.restaurantes.get_mut(&id).ok_or(BackendError::NotFound)?;
    restaurante.nombre = input.nombre;
    restaurante.direccion = input.direccion;
    restaurante.telefono = input.telefono;
    restaurante.email = input.email;
    restaurante.capacidad_maxima = input.capacidad_maxima;
    // The front end has no hour fields; an omitted one keeps its value.
    if let Some(apertura) = input.horario_apertura {
        restaurante.horario_apertura = Some(apertura);
    }
    if let Some(cierre) = input.horario_cierre {
        restaurante.horario_cierre = Some(cierre);
    }
    restaurante.fecha_edicion = Some(Utc::now());
    tracing::info!(%id, "restaurant updated");
    Ok(Json(restaurante.clone()))
}

async fn delete_restaurante(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<StatusCode, BackendError> {
    let id = parse_id(&id)?;
    let mut store = db.write().await;
    if !store.restaurantes.contains_key(&id) {
        return Err(BackendError::NotFound);
    }
    if store.mesas.get(&id).is_some_and(|mesas| !mesas.is_empty()) {
        return Err(BackendError::ForeignKey { id });
    }
    store.restaurantes.remove(&id);
    tracing::info!(%id, "restaurant deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Attaches a table to a restaurant, making it undeletable.
async fn create_mesa(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<Mesa>), BackendError> {
    let id = parse_id(&id)?;
    let mut store = db.write().await;
    if !store.restaurantes.contains_key(&id) {
        return Err(BackendError::NotFound);
    }
    let mesa = Mesa {
        id_mesa: Uuid::new_v4(),
        id_restaurante: id,
    };
    store.mesas.entry(id).or_default().push(mesa.id_mesa);
    Ok((StatusCode::CREATED, Json(mesa)))
}
