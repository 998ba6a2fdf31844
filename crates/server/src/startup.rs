use crate::{
    climate::{self, ClimateService},
    db::{self, ClimateAccess, ClimateData},
    health, index_handler, precipitation, routes, stations, temperature_between,
    temperature_from, tobs,
};
use anyhow::anyhow;
use axum::{
    body::Body,
    extract::Request,
    middleware::{self, Next},
    response::IntoResponse,
    routing::get,
    Router,
};
use hyper::{header::ACCEPT, Method};
use log::info;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

#[derive(Clone)]
pub struct AppState {
    pub remote_url: String,
    pub climate: Arc<ClimateService>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::api::climate_routes::precipitation,
        routes::api::climate_routes::stations,
        routes::api::climate_routes::tobs,
        routes::api::climate_routes::temperature_from,
        routes::api::climate_routes::temperature_between,
        routes::api::health::health,
    ),
    components(
        schemas(
            climate::Precipitation,
            climate::Station,
            climate::TemperatureObservation,
            climate::TemperatureSummary,
            routes::api::ErrorBody,
            routes::api::Health,
        )
    ),
    tags(
        (name = "climate api", description = "a read-only RESTful api over historical daily precipitation and temperature observations")
    )
)]
struct ApiDoc;

pub async fn build_app_state(
    remote_url: String,
    dataset: String,
    max_connections: u32,
) -> Result<AppState, anyhow::Error> {
    let store = ClimateAccess::open(&dataset, max_connections)
        .await
        .map_err(|e| match e {
            db::Error::DatasetNotFound(path) => anyhow!("no dataset at {}", path),
            e => anyhow!("error opening climate dataset: {}", e),
        })?;

    Ok(app_state_with_store(remote_url, Arc::new(store)))
}

/// Wires any store into the app, used directly by tests with a mocked store
pub fn app_state_with_store(remote_url: String, store: Arc<dyn ClimateData>) -> AppState {
    AppState {
        remote_url,
        climate: Arc::new(ClimateService::new(store)),
    }
}

pub fn app(app_state: AppState) -> Router {
    let api_docs = ApiDoc::openapi();
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([ACCEPT])
        .allow_origin(Any);

    // Static segments win over `{start}`, so the listings are never parsed as dates
    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health))
        .route("/api/v1.0/precipitation", get(precipitation))
        .route("/api/v1.0/stations", get(stations))
        .route("/api/v1.0/tobs", get(tobs))
        .route("/api/v1.0/{start}", get(temperature_from))
        .route("/api/v1.0/{start}/{end}", get(temperature_between))
        .with_state(Arc::new(app_state))
        .layer(middleware::from_fn(log_request))
        .merge(Scalar::with_url("/docs", api_docs))
        .layer(cors)
}

async fn log_request(request: Request<Body>, next: Next) -> impl IntoResponse {
    let now = time::OffsetDateTime::now_utc();
    let path = request
        .uri()
        .path_and_query()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_default();
    let method = request.method().clone();
    info!(target: "http_request", "new request, {} {}", method.as_str(), path);

    let response = next.run(request).await;
    let response_time = time::OffsetDateTime::now_utc() - now;
    info!(target: "http_response", "response, {} {}, code: {}, time: {}", method.as_str(), path, response.status().as_str(), response_time);

    response
}
