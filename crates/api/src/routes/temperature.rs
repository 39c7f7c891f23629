//! Temperature statistics routes
//!
//! Dates are passed through unvalidated. Anything that matches no rows
//! produces a single record with null fields rather than an error, and the
//! single aggregate is always wrapped in a one-element array.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;
use weather_storage::TemperatureStats;

use crate::{error::ApiError, AppState};

/// MIN/AVG/MAX record as served, fields in key order
#[derive(Debug, Serialize)]
pub struct TemperatureStatsRecord {
    #[serde(rename = "Average Temperature")]
    pub average: Option<f64>,
    #[serde(rename = "Maximum Temperature")]
    pub maximum: Option<f64>,
    #[serde(rename = "Minimum Temperature")]
    pub minimum: Option<f64>,
}

impl From<TemperatureStats> for TemperatureStatsRecord {
    fn from(stats: TemperatureStats) -> Self {
        Self {
            average: stats.avg,
            maximum: stats.max,
            minimum: stats.min,
        }
    }
}

/// Stats for a single date (exact match)
pub async fn stats_for_date(
    State(state): State<Arc<AppState>>,
    Path(start): Path<String>,
) -> Result<Json<Vec<TemperatureStatsRecord>>, ApiError> {
    metrics::counter!("weather_api_requests_total", "route" => "stats_date").increment(1);
    debug!("Temperature stats for {}", start);

    let stats = state.repository.temperature_stats_on(&start).await?;
    Ok(Json(vec![stats.into()]))
}

/// Stats for `start..=end`
pub async fn stats_for_range(
    State(state): State<Arc<AppState>>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<Vec<TemperatureStatsRecord>>, ApiError> {
    metrics::counter!("weather_api_requests_total", "route" => "stats_range").increment(1);
    debug!("Temperature stats for {} to {}", start, end);

    let stats = state
        .repository
        .temperature_stats_between(&start, &end)
        .await?;
    Ok(Json(vec![stats.into()]))
}
