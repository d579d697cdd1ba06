//! Verify mapping, request building and error interpretation against the JSON
//! test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs together with the expected result.
//! Bodies are compared as parsed JSON (not raw strings) to avoid false
//! negatives from field-ordering differences.

use restaurantes_core::mapper;
use restaurantes_core::{
    ApiError, ErrorInterpreter, HttpFailure, HttpMethod, HttpResponse, MappingError, Operation,
    RestaurantClient, RestaurantForm, SaveMode,
};
use serde_json::Value;

const BASE_URL: &str = "http://localhost:8000";

fn client() -> RestaurantClient {
    RestaurantClient::new(BASE_URL)
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn parse_operation(s: &str) -> Operation {
    match s {
        "load" => Operation::Load,
        "search" => Operation::Search,
        "fetch" => Operation::Fetch,
        "create" => Operation::Create,
        "update" => Operation::Update,
        "delete" => Operation::Delete,
        other => panic!("unknown operation: {other}"),
    }
}

fn simulated(sim: &Value) -> HttpResponse {
    HttpResponse {
        status: sim["status"].as_u64().unwrap() as u16,
        headers: Vec::new(),
        body: sim["body"].as_str().unwrap().to_string(),
    }
}

// ---------------------------------------------------------------------------
// Entity mapping
// ---------------------------------------------------------------------------

#[test]
fn mapper_test_vectors() {
    let raw = include_str!("../../test-vectors/mapper.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let restaurant = mapper::to_canonical_value(&case["input"])
            .unwrap_or_else(|e| panic!("{name}: {e}"));
        let rendered = Value::Object(restaurant.to_raw());
        assert_eq!(rendered, case["expected_raw"], "{name}: rendered record");

        // A rendered record maps back to itself.
        let again = mapper::to_canonical_value(&rendered).unwrap();
        assert_eq!(again, restaurant, "{name}: idempotent");
    }

    for case in vectors["errors"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let err = mapper::to_canonical_value(&case["input"]).unwrap_err();
        match case["expected_error"].as_str().unwrap() {
            "missing_identifier" => {
                assert!(matches!(err, MappingError::MissingIdentifier), "{name}: {err:?}")
            }
            "invalid_capacity" => {
                assert!(matches!(err, MappingError::InvalidCapacity { .. }), "{name}: {err:?}")
            }
            other => panic!("unknown error kind: {other}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Save
// ---------------------------------------------------------------------------

#[test]
fn save_test_vectors() {
    let raw = include_str!("../../test-vectors/requests.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["save"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let form: RestaurantForm = serde_json::from_value(case["form"].clone()).unwrap();
        let mode = match case["mode"].as_str().unwrap() {
            "create" => SaveMode::Create,
            "update" => SaveMode::Update {
                id: case["id"].as_str().unwrap().to_string(),
            },
            other => panic!("unknown mode: {other}"),
        };
        let expected_req = &case["expected_request"];

        // Verify build
        restaurantes_core::payload::validate(&form).unwrap();
        let payload = restaurantes_core::payload::to_backend_payload(&form, &mode).unwrap();
        let req = c.build_save(&mode, &payload).unwrap();
        let expected_method = parse_method(expected_req["method"].as_str().unwrap());
        assert_eq!(req.method, expected_method, "{name}: method");
        let expected_path = format!("{BASE_URL}{}", expected_req["path"].as_str().unwrap());
        assert_eq!(req.path, expected_path, "{name}: path");

        let expected_headers: Vec<(String, String)> = expected_req["headers"]
            .as_array()
            .unwrap()
            .iter()
            .map(|h| {
                let arr = h.as_array().unwrap();
                (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
            })
            .collect();
        assert_eq!(req.headers, expected_headers, "{name}: headers");

        let req_body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(req_body, expected_req["body"], "{name}: body");

        // Verify parse
        let restaurant = c.parse_save(simulated(&case["simulated_response"])).unwrap();
        assert_eq!(restaurant.id, case["expected_id"].as_str().unwrap(), "{name}: id");
        assert_eq!(
            restaurant.capacidad().map(u64::from),
            case["expected_capacity"].as_u64(),
            "{name}: capacity"
        );
    }
}

// ---------------------------------------------------------------------------
// Reads and delete
// ---------------------------------------------------------------------------

#[test]
fn read_request_test_vectors() {
    let raw = include_str!("../../test-vectors/requests.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["reads"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let id = case["id"].as_str().unwrap_or_default();
        let req = match case["operation"].as_str().unwrap() {
            "list" => c.build_list(),
            "search" => c.build_search(case["term"].as_str().unwrap()),
            "get" => c.build_get(id),
            "delete" => c.build_delete(id),
            other => panic!("unknown operation: {other}"),
        };
        let expected_method = if case["operation"] == "delete" {
            HttpMethod::Delete
        } else {
            HttpMethod::Get
        };
        assert_eq!(req.method, expected_method, "{name}: method");
        let expected_path = format!("{BASE_URL}{}", case["expected_path"].as_str().unwrap());
        assert_eq!(req.path, expected_path, "{name}: path");
        assert!(req.body.is_none(), "{name}: body");
    }
}

// ---------------------------------------------------------------------------
// Error interpretation
// ---------------------------------------------------------------------------

#[test]
fn error_test_vectors() {
    let raw = include_str!("../../test-vectors/errors.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();
    let interpreter = ErrorInterpreter::new(vectors["base_url"].as_str().unwrap());

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let response = simulated(case);
        assert!(!response.is_success(), "{name}: vector must describe a failure");

        let failure = HttpFailure::from_response(&response);
        let report = interpreter.report(
            &ApiError::Request(failure),
            parse_operation(case["operation"].as_str().unwrap()),
        );
        assert_eq!(report.message, case["expected_message"].as_str().unwrap(), "{name}: message");
        assert_eq!(
            report.category.name(),
            case["expected_category"].as_str().unwrap(),
            "{name}: category"
        );
    }
}
