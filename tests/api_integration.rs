//! Integration tests for the clinic API.
//!
//! These tests spin up a real server instance on the in-memory backend and
//! make HTTP requests to verify the complete request/response cycle.

use std::collections::BTreeSet;
use std::net::SocketAddr;
use std::sync::Arc;

use reqwest::{Client, Response, StatusCode};
use serde_json::{Value, json};
use tokio::net::TcpListener;

use vetclinic_api::api::{AppState, create_router};
use vetclinic_api::config::{AppConfig, ObservabilityConfig, ServerConfig, StorageConfig};
use vetclinic_api::storage::create_storage;

// ============================================================================
// Test Harness
// ============================================================================

/// Test server instance.
struct TestServer {
    addr: SocketAddr,
    client: Client,
}

impl TestServer {
    async fn new() -> Self {
        let config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".parse().unwrap(),
                port: 0,
            },
            storage: StorageConfig::default(),
            observability: ObservabilityConfig {
                log_level: "warn".to_string(),
                log_format: "text".to_string(),
                metrics_enabled: false,
            },
        };

        let storage = create_storage(&config.storage)
            .await
            .expect("Failed to create storage");

        let state = AppState::new(storage, None);
        let app = create_router(state);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to get local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server failed");
        });

        Self {
            addr,
            client: Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    async fn get(&self, path: &str) -> Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("Request failed")
    }

    async fn post(&self, path: &str, body: &Value) -> Response {
        self.client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Request failed")
    }

    async fn put(&self, path: &str, body: &Value) -> Response {
        self.client
            .put(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Request failed")
    }

    async fn delete(&self, path: &str) -> Response {
        self.client
            .delete(self.url(path))
            .send()
            .await
            .expect("Request failed")
    }

    /// POST and return the assigned id, asserting 201.
    async fn create(&self, path: &str, body: &Value) -> i64 {
        let resp = self.post(path, body).await;
        assert_eq!(resp.status(), StatusCode::CREATED, "POST {path}");
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["code"], 0);
        body["data"]["id"].as_i64().expect("id in response")
    }

    async fn ids(&self, path: &str) -> Vec<i64> {
        let body: Value = self.get(path).await.json().await.unwrap();
        body["data"]
            .as_array()
            .expect("list data")
            .iter()
            .map(|row| row["id"].as_i64().unwrap())
            .collect()
    }
}

fn person(ci: &str) -> Value {
    json!({
        "nombres": "Lucia",
        "apellidos": "Mamani",
        "ci": ci,
        "telefono": "71234567",
        "email": "lucia@example.com",
        "direccion": "Calle 21, Calacoto",
        "activo": true
    })
}

fn pet(owner: i64) -> Value {
    json!({
        "nombre": "Firulais",
        "especie": "perro",
        "raza": "mestizo",
        "edad": 4,
        "peso": 12.5,
        "dueno_persona_id": owner
    })
}

fn veterinarian(persona_id: i64) -> Value {
    json!({
        "licencia": "MV-2231",
        "especialidad": "cirugia",
        "persona_id": persona_id
    })
}

// ============================================================================
// System endpoints
// ============================================================================

#[tokio::test]
async fn test_root_banner() {
    let server = TestServer::new().await;
    let resp = server.get("/").await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["code"], 0);
    assert_eq!(body["message"], "API Veterinaria en funcionamiento");
}

#[tokio::test]
async fn test_health_and_ready() {
    let server = TestServer::new().await;

    let body: Value = server.get("/health").await.json().await.unwrap();
    assert_eq!(body["data"]["status"], "healthy");

    let resp = server.get("/ready").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["ready"], true);
    assert_eq!(body["data"]["components"]["backend"], "memory");
}

#[tokio::test]
async fn test_metrics_without_recorder() {
    let server = TestServer::new().await;
    let resp = server.get("/metrics").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.text().await.unwrap().contains("vetclinic_up 1"));
}

#[tokio::test]
async fn test_request_id_echoed() {
    let server = TestServer::new().await;
    let resp = server.get("/health").await;
    assert!(resp.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_cors_headers_on_envelope_responses() {
    let server = TestServer::new().await;
    let resp = server
        .client
        .get(server.url("/personas/7"))
        .header("origin", "http://clinic.example")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(resp.headers()["access-control-allow-origin"], "*");
    assert!(resp.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_unknown_route() {
    let server = TestServer::new().await;
    assert_eq!(server.get("/facturas").await.status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// Allocated identifiers
// ============================================================================

#[tokio::test]
async fn test_person_crud_cycle() {
    let server = TestServer::new().await;

    let id = server.create("/personas", &person("4455667")).await;
    assert_eq!(id, 1);

    let body: Value = server.get("/personas/1").await.json().await.unwrap();
    assert_eq!(body["data"]["id"], 1);
    assert_eq!(body["data"]["ci"], "4455667");

    let mut changed = person("4455667");
    changed["telefono"] = json!("79999999");
    let resp = server.put("/personas/1", &changed).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = server.get("/personas/1").await.json().await.unwrap();
    assert_eq!(body["data"]["telefono"], "79999999");

    assert_eq!(server.delete("/personas/1").await.status(), StatusCode::OK);
    assert_eq!(server.get("/personas/1").await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_sequential_then_concurrent_ids() {
    let server = Arc::new(TestServer::new().await);
    assert_eq!(server.create("/personas", &person("A")).await, 1);

    let b = {
        let server = Arc::clone(&server);
        tokio::spawn(async move { server.create("/personas", &person("B")).await })
    };
    let c = {
        let server = Arc::clone(&server);
        tokio::spawn(async move { server.create("/personas", &person("C")).await })
    };

    let mut got = vec![b.await.unwrap(), c.await.unwrap()];
    got.sort_unstable();
    assert_eq!(got, vec![2, 3]);
}

#[tokio::test]
async fn test_concurrent_creates_are_unique_and_dense() {
    let server = Arc::new(TestServer::new().await);

    let handles: Vec<_> = (0..24)
        .map(|i| {
            let server = Arc::clone(&server);
            tokio::spawn(async move { server.create("/personas", &person(&format!("ci-{i}"))).await })
        })
        .collect();

    let mut ids = BTreeSet::new();
    for handle in handles {
        assert!(ids.insert(handle.await.unwrap()), "duplicate id");
    }
    assert_eq!(ids, (1..=24).collect::<BTreeSet<_>>());
    assert_eq!(server.ids("/personas").await, (1..=24).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_next_id_after_deleting_middle_row() {
    let server = TestServer::new().await;
    for ci in ["1", "2", "3"] {
        server.create("/personas", &person(ci)).await;
    }

    assert_eq!(server.delete("/personas/2").await.status(), StatusCode::OK);
    assert_eq!(server.create("/personas", &person("4")).await, 4);
    assert_eq!(server.ids("/personas").await, vec![1, 3, 4]);
}

#[tokio::test]
async fn test_tables_number_independently() {
    let server = TestServer::new().await;
    let owner = server.create("/personas", &person("1")).await;
    server.create("/personas", &person("2")).await;

    assert_eq!(server.create("/mascotas", &pet(owner)).await, 1);
    assert_eq!(server.create("/veterinarios", &veterinarian(2)).await, 1);

    let user = json!({
        "username": "lmamani",
        "password_hash": "$argon2id$stub",
        "persona_id": owner
    });
    assert_eq!(server.create("/usuarios", &user).await, 1);

    let body: Value = server.get("/usuarios/1").await.json().await.unwrap();
    assert_eq!(body["data"]["rol"], "veterinario");
    assert_eq!(body["data"]["activo"], true);

    let body: Value = server.get("/mascotas/1").await.json().await.unwrap();
    assert_eq!(body["data"]["peso"], 12.5);
    assert_eq!(body["data"]["activo"], true);
}

// ============================================================================
// Generated identifiers
// ============================================================================

#[tokio::test]
async fn test_clinical_chain() {
    let server = TestServer::new().await;
    let owner = server.create("/personas", &person("1")).await;
    let pet_id = server.create("/mascotas", &pet(owner)).await;
    let vet_id = server.create("/veterinarios", &veterinarian(owner)).await;

    let cita = server
        .create(
            "/citas",
            &json!({
                "fecha_hora": "2026-03-14T10:30:00",
                "motivo": "vacunacion",
                "prioridad": "normal",
                "estado": "programada",
                "observaciones": "control anual",
                "mascota_id": pet_id,
                "veterinario_id": vet_id
            }),
        )
        .await;

    let historial = server
        .create(
            "/historiales",
            &json!({
                "fecha": "2026-03-14",
                "diagnostico": "sano",
                "mascota_id": pet_id,
                "veterinario_id": vet_id,
                "cita_id": cita
            }),
        )
        .await;

    let tratamiento = server
        .create(
            "/tratamientos",
            &json!({
                "nombre": "desparasitacion",
                "fecha_inicio": "2026-03-14",
                "fecha_fin": "2026-03-21",
                "historial_id": historial
            }),
        )
        .await;

    let control = server
        .create(
            "/controles",
            &json!({
                "fecha_control": "2026-03-21",
                "tratamiento_id": tratamiento
            }),
        )
        .await;

    let body: Value = server.get(&format!("/tratamientos/{tratamiento}")).await.json().await.unwrap();
    assert_eq!(body["data"]["estado"], "activo");

    let body: Value = server.get(&format!("/controles/{control}")).await.json().await.unwrap();
    assert_eq!(body["data"]["estado"], "pendiente");

    let body: Value = server.get(&format!("/citas/{cita}")).await.json().await.unwrap();
    assert_eq!(body["data"]["fecha_hora"], "2026-03-14T10:30:00");
}

#[tokio::test]
async fn test_generated_ids_not_reused_after_delete() {
    let server = TestServer::new().await;
    let control = json!({ "fecha_control": "2026-01-10", "tratamiento_id": 1 });

    let first = server.create("/controles", &control).await;
    let second = server.create("/controles", &control).await;
    assert_eq!(server.delete(&format!("/controles/{second}")).await.status(), StatusCode::OK);

    let third = server.create("/controles", &control).await;
    assert!(third > second && second > first);
}

// ============================================================================
// Errors
// ============================================================================

#[tokio::test]
async fn test_missing_rows_return_404() {
    let server = TestServer::new().await;

    let resp = server.get("/mascotas/99").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["code"], 4001);
    assert_eq!(body["message"], "mascota 99 not found");

    assert_eq!(
        server.put("/personas/5", &person("5")).await.status(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(server.delete("/citas/5").await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_validation_errors() {
    let server = TestServer::new().await;

    let mut blank = person("1");
    blank["nombres"] = json!("   ");
    let resp = server.post("/personas", &blank).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["code"], 3001);

    for field in ["telefono", "email", "direccion"] {
        let mut blank = person("1");
        blank[field] = json!("");
        let resp = server.post("/personas", &blank).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{field}");
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["message"], format!("Invalid request: {field} cannot be blank"));
    }

    let resp = server.post("/mascotas", &pet(0)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let backwards = json!({
        "nombre": "antibiotico",
        "fecha_inicio": "2026-03-14",
        "fecha_fin": "2026-03-01",
        "historial_id": 1
    });
    assert_eq!(
        server.post("/tratamientos", &backwards).await.status(),
        StatusCode::BAD_REQUEST
    );

    // Nothing was allocated for the rejected inserts.
    assert_eq!(server.create("/personas", &person("1")).await, 1);
}

#[tokio::test]
async fn test_extractor_rejections() {
    let server = TestServer::new().await;

    let resp = server.get("/personas/abc").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["code"], 3003);
    assert!(body["data"].is_null());

    assert_eq!(server.get("/personas/0").await.status(), StatusCode::BAD_REQUEST);

    let resp = server.post("/personas", &json!({ "nombres": "solo" })).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["code"], 3001);
    assert!(body["message"].as_str().unwrap().contains("apellidos"));
    assert!(server.ids("/personas").await.is_empty());

    let resp = server
        .client
        .post(server.url("/mascotas"))
        .header("content-type", "application/json")
        .body("{\"nombre\":")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["code"], 3001);
}
