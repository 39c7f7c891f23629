//! Station Routes

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;
use weather_storage::Station;

use crate::{error::ApiError, AppState};

/// Station record as served
///
/// Fields are declared in key order so bodies serialize with sorted keys.
#[derive(Debug, Serialize)]
pub struct StationRecord {
    #[serde(rename = "Elevation")]
    pub elevation: f64,
    #[serde(rename = "ID")]
    pub id: i64,
    #[serde(rename = "Latitude")]
    pub latitude: f64,
    #[serde(rename = "Longitude")]
    pub longitude: f64,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Station #")]
    pub station: String,
}

impl From<Station> for StationRecord {
    fn from(station: Station) -> Self {
        Self {
            elevation: station.elevation,
            id: station.id,
            latitude: station.latitude,
            longitude: station.longitude,
            name: station.name,
            station: station.station,
        }
    }
}

/// List all stations in store order (no ordering is guaranteed)
pub async fn list_stations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<StationRecord>>, ApiError> {
    metrics::counter!("weather_api_requests_total", "route" => "stations").increment(1);

    let stations = state.repository.stations().await?;
    Ok(Json(stations.into_iter().map(Into::into).collect()))
}
