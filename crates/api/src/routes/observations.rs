//! Trailing-year observation routes
//!
//! Both routes share [`DateWindow::trailing_year`] and emit one record per
//! measurement row, ascending by date. Record fields are declared in key
//! order so bodies serialize with sorted keys.

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;
use weather_storage::{DateWindow, PrecipitationObservation, TemperatureObservation};

use crate::{error::ApiError, AppState};

/// Precipitation record as served
#[derive(Debug, Serialize)]
pub struct PrecipitationRecord {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Precipitation")]
    pub precipitation: Option<f64>,
    #[serde(rename = "Station Name")]
    pub station: String,
}

impl From<PrecipitationObservation> for PrecipitationRecord {
    fn from(row: PrecipitationObservation) -> Self {
        Self {
            date: row.date,
            precipitation: row.prcp,
            station: row.station,
        }
    }
}

/// Temperature record as served
#[derive(Debug, Serialize)]
pub struct TemperatureRecord {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Station Name")]
    pub station: String,
    #[serde(rename = "Temperature")]
    pub temperature: f64,
}

impl From<TemperatureObservation> for TemperatureRecord {
    fn from(row: TemperatureObservation) -> Self {
        Self {
            date: row.date,
            station: row.station,
            temperature: row.tobs,
        }
    }
}

/// Precipitation over the trailing year
pub async fn get_precipitation(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<PrecipitationRecord>>, ApiError> {
    metrics::counter!("weather_api_requests_total", "route" => "precipitation").increment(1);

    let rows = state
        .repository
        .precipitation_in(&DateWindow::trailing_year())
        .await?;

    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

/// Temperature observations over the trailing year
pub async fn get_temperature_observations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TemperatureRecord>>, ApiError> {
    metrics::counter!("weather_api_requests_total", "route" => "tobs").increment(1);

    let rows = state
        .repository
        .temperatures_in(&DateWindow::trailing_year())
        .await?;

    Ok(Json(rows.into_iter().map(Into::into).collect()))
}
