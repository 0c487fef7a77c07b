//! Router setup and configuration.

use axum::{
    Router,
    body::Body,
    http::{HeaderName, Request},
    routing::get,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::api::handlers::{health, records};
use crate::api::state::AppState;
use crate::domain::{
    Appointment, ClinicalHistory, Person, Pet, Resource, Treatment, TreatmentControl, User,
    Veterinarian,
};
use crate::storage::traits::{DynStorage, Repository};

fn request_id_header() -> HeaderName {
    HeaderName::from_static("x-request-id")
}

/// Create the main application router.
pub fn create_router(state: AppState) -> Router {
    let system_routes = Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/metrics", get(health::metrics));

    let clinic_routes = Router::new()
        .nest("/personas", resource_routes::<Person>())
        .nest("/usuarios", resource_routes::<User>())
        .nest("/mascotas", resource_routes::<Pet>())
        .nest("/veterinarios", resource_routes::<Veterinarian>())
        .nest("/citas", resource_routes::<Appointment>())
        .nest("/historiales", resource_routes::<ClinicalHistory>())
        .nest("/tratamientos", resource_routes::<Treatment>())
        .nest("/controles", resource_routes::<TreatmentControl>());

    Router::new()
        .merge(system_routes)
        .merge(clinic_routes)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(request_id_header(), MakeRequestUuid))
                .layer(PropagateRequestIdLayer::new(request_id_header()))
                .layer(TraceLayer::new_for_http().make_span_with(
                    |request: &Request<Body>| {
                        let request_id = request
                            .headers()
                            .get("x-request-id")
                            .and_then(|v| v.to_str().ok())
                            .unwrap_or("-");
                        tracing::info_span!(
                            "http",
                            method = %request.method(),
                            uri = %request.uri(),
                            request_id,
                        )
                    },
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// CRUD routes for one resource, mounted under its collection path.
fn resource_routes<R: Resource>() -> Router<AppState>
where
    DynStorage: Repository<R>,
{
    Router::new()
        .route("/", get(records::list::<R>).post(records::create::<R>))
        .route(
            "/{id}",
            get(records::get::<R>)
                .put(records::update::<R>)
                .delete(records::delete::<R>),
        )
}
