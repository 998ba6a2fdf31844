use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    climate::{Error, Precipitation, Station, TemperatureObservation, TemperatureSummary},
    routes::api::ErrorBody,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/v1.0/precipitation",
    responses(
        (status = OK, description = "Every recorded date with its precipitation, in dataset order", body = Vec<Precipitation>),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to read the dataset", body = ErrorBody)
    ))]
pub async fn precipitation(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Precipitation>>, Error> {
    state.climate.precipitation().await.map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1.0/stations",
    responses(
        (status = OK, description = "Every weather station in the dataset", body = Vec<Station>),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to read the dataset", body = ErrorBody)
    ))]
pub async fn stations(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Station>>, Error> {
    state.climate.stations().await.map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1.0/tobs",
    responses(
        (status = OK, description = "Temperature observations for the 366 days up to the latest recorded date", body = Vec<TemperatureObservation>),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to read the dataset", body = ErrorBody)
    ))]
pub async fn tobs(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TemperatureObservation>>, Error> {
    state.climate.recent_temperatures().await.map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1.0/{start}",
    params(
        ("start" = String, Path, description = "First date included, YYYY-MM-DD"),
    ),
    responses(
        (status = OK, description = "MIN/AVG/MAX temperature from start through the latest recorded date", body = Vec<TemperatureSummary>),
        (status = BAD_REQUEST, description = "Start is not a YYYY-MM-DD date", body = ErrorBody),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to read the dataset", body = ErrorBody)
    ))]
pub async fn temperature_from(
    State(state): State<Arc<AppState>>,
    Path(start): Path<String>,
) -> Result<Json<Vec<TemperatureSummary>>, Error> {
    let summary = state.climate.temperature_summary(&start, None).await?;
    Ok(Json(vec![summary]))
}

#[utoipa::path(
    get,
    path = "/api/v1.0/{start}/{end}",
    params(
        ("start" = String, Path, description = "First date included, YYYY-MM-DD"),
        ("end" = String, Path, description = "Last date included, YYYY-MM-DD"),
    ),
    responses(
        (status = OK, description = "MIN/AVG/MAX temperature from start through end, null when nothing matched", body = Vec<TemperatureSummary>),
        (status = BAD_REQUEST, description = "Start or end is not a YYYY-MM-DD date", body = ErrorBody),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to read the dataset", body = ErrorBody)
    ))]
pub async fn temperature_between(
    State(state): State<Arc<AppState>>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<Vec<TemperatureSummary>>, Error> {
    let summary = state.climate.temperature_summary(&start, Some(&end)).await?;
    Ok(Json(vec![summary]))
}
