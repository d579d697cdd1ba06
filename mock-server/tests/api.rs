use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Restaurante};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

const CAFE: &str =
    r#"{"nombre":"Cafe","direccion":"Main St","telefono":"555-0100","capacidad_maxima":40}"#;
const NIL: &str = "00000000-0000-0000-0000-000000000000";

// --- list ---

#[tokio::test]
async fn list_restaurantes_empty() {
    let resp = app()
        .oneshot(empty_request("GET", "/restaurantes/"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let restaurantes: Vec<Restaurante> = body_json(resp).await;
    assert!(restaurantes.is_empty());
}

// --- create ---

#[tokio::test]
async fn create_restaurante_returns_201() {
    let resp = app()
        .oneshot(json_request("POST", "/restaurantes/", CAFE))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let restaurante: Restaurante = body_json(resp).await;
    assert_eq!(restaurante.nombre, "Cafe");
    assert_eq!(restaurante.capacidad_maxima, Some(40));
    assert!(restaurante.activo);
    assert!(restaurante.fecha_edicion.is_none());
}

#[tokio::test]
async fn create_blank_fields_returns_detail_list() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/restaurantes/",
            r#"{"nombre":"","direccion":"Main St","telefono":""}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = body_json(resp).await;
    let detail = body["detail"].as_array().unwrap();
    assert_eq!(detail.len(), 2);
    assert_eq!(detail[0]["loc"][1], "nombre");
    assert_eq!(detail[1]["loc"][1], "telefono");
    assert!(detail[0]["msg"].is_string());
}

#[tokio::test]
async fn create_malformed_json_returns_422_with_detail() {
    let resp = app()
        .oneshot(json_request("POST", "/restaurantes/", r#"{"not_nombre":1}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = body_json(resp).await;
    assert!(body["detail"][0]["msg"].is_string());
}

// --- get ---

#[tokio::test]
async fn get_restaurante_not_found() {
    let resp = app()
        .oneshot(empty_request("GET", &format!("/restaurantes/{NIL}/")))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["detail"], "Restaurante no encontrado");
}

#[tokio::test]
async fn get_restaurante_bad_uuid_returns_422() {
    let resp = app()
        .oneshot(empty_request("GET", "/restaurantes/not-a-uuid/"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- update ---

#[tokio::test]
async fn update_restaurante_not_found() {
    let resp = app()
        .oneshot(json_request("PUT", &format!("/restaurantes/{NIL}/"), CAFE))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_without_hours_keeps_them() {
    use tower::Service;

    let mut app = app().into_service();

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "POST",
            "/restaurantes/",
            r#"{"nombre":"Cafe","direccion":"Main St","telefono":"555-0100",
                "horario_apertura":"08:00","horario_cierre":"22:00"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Restaurante = body_json(resp).await;
    let id = created.id_restaurante;

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("PUT", &format!("/restaurantes/{id}/"), CAFE))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Restaurante = body_json(resp).await;
    assert_eq!(updated.capacidad_maxima, Some(40));
    assert_eq!(updated.horario_apertura.as_deref(), Some("08:00"));
    assert_eq!(updated.horario_cierre.as_deref(), Some("22:00"));

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "PUT",
            &format!("/restaurantes/{id}/"),
            r#"{"nombre":"Cafe","direccion":"Main St","telefono":"555-0100",
                "horario_cierre":"23:30"}"#,
        ))
        .await
        .unwrap();
    let updated: Restaurante = body_json(resp).await;
    assert_eq!(updated.horario_apertura.as_deref(), Some("08:00"));
    assert_eq!(updated.horario_cierre.as_deref(), Some("23:30"));
}

// --- delete ---

#[tokio::test]
async fn delete_restaurante_not_found() {
    let resp = app()
        .oneshot(empty_request("DELETE", &format!("/restaurantes/{NIL}/")))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- full CRUD lifecycle ---

#[tokio::test]
async fn crud_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    // create two
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", "/restaurantes/", CAFE))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Restaurante = body_json(resp).await;
    let id = created.id_restaurante;

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "POST",
            "/restaurantes/",
            r#"{"nombre":"La Tasca","direccion":"Calle Mayor 1","telefono":"555-0200"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    // search narrows by nombre or direccion
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/restaurantes/?search=mayor"))
        .await
        .unwrap();
    let found: Vec<Restaurante> = body_json(resp).await;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].nombre, "La Tasca");

    // update replaces every field it carries and stamps fecha_edicion
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "PUT",
            &format!("/restaurantes/{id}/"),
            r#"{"nombre":"Cafe Central","direccion":"Main St","telefono":"555-0100",
                "email":"c@c.com"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Restaurante = body_json(resp).await;
    assert_eq!(updated.nombre, "Cafe Central");
    assert_eq!(updated.email.as_deref(), Some("c@c.com"));
    assert_eq!(updated.capacidad_maxima, None);
    assert!(updated.fecha_edicion.is_some());
    assert_eq!(updated.fecha_creacion, created.fecha_creacion);

    // a table blocks the delete
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("POST", &format!("/restaurantes/{id}/mesas/")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("DELETE", &format!("/restaurantes/{id}/")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: serde_json::Value = body_json(resp).await;
    assert!(body["detail"]
        .as_str()
        .unwrap()
        .contains("ForeignKeyViolation"));

    // the other restaurant deletes cleanly
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/restaurantes/?search=tasca"))
        .await
        .unwrap();
    let found: Vec<Restaurante> = body_json(resp).await;
    let tasca = found[0].id_restaurante;

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("DELETE", &format!("/restaurantes/{tasca}/")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());

    // list after delete: only the blocked one remains
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/restaurantes/"))
        .await
        .unwrap();
    let all: Vec<Restaurante> = body_json(resp).await;
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id_restaurante, id);
}
