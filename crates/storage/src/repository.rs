//! Repository Implementation

use crate::{DateWindow, StorageError};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::FromRow;
use std::path::Path;
use tracing::{debug, info};

/// Weather station reference record
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Station {
    pub id: i64,
    /// Station code, referenced by `measurement.station`
    pub station: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
}

/// Daily precipitation at a station
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct PrecipitationObservation {
    pub date: String,
    /// `None` when no rainfall was recorded
    pub prcp: Option<f64>,
    pub station: String,
}

/// Daily temperature observation at a station
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct TemperatureObservation {
    pub date: String,
    pub tobs: f64,
    pub station: String,
}

/// MIN/AVG/MAX of `tobs` over a set of rows; all `None` for an empty set
#[derive(Debug, Clone, Copy, Default, PartialEq, FromRow)]
pub struct TemperatureStats {
    pub min: Option<f64>,
    pub avg: Option<f64>,
    pub max: Option<f64>,
}

/// Earliest and latest measurement dates in the store
#[derive(Debug, Clone, Default, PartialEq, FromRow)]
pub struct DateBounds {
    pub earliest: Option<String>,
    pub latest: Option<String>,
}

const STATS_SELECT: &str = "SELECT CAST(MIN(tobs) AS REAL) AS min, \
     CAST(AVG(tobs) AS REAL) AS avg, \
     CAST(MAX(tobs) AS REAL) AS max \
     FROM measurement";

/// Read-only repository over the weather observation database
#[derive(Debug, Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Open an existing SQLite file read-only.
    ///
    /// The file is never created; a missing or unreadable file is reported
    /// as [`StorageError::Unavailable`].
    pub async fn open(path: impl AsRef<Path>, max_connections: u32) -> Result<Self, StorageError> {
        let path = path.as_ref();
        let options = SqliteConnectOptions::new()
            .filename(path)
            .read_only(true)
            .create_if_missing(false);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect_with(options)
            .await
            .map_err(|source| StorageError::Unavailable {
                path: path.display().to_string(),
                source,
            })?;

        info!("Opened weather database at {}", path.display());
        Ok(Self::from_pool(pool))
    }

    /// Wrap an already configured pool
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All stations, in store order
    pub async fn stations(&self) -> Result<Vec<Station>, StorageError> {
        let stations = sqlx::query_as::<_, Station>(
            "SELECT id, station, name, latitude, longitude, elevation FROM station",
        )
        .fetch_all(&self.pool)
        .await?;

        debug!("Fetched {} stations", stations.len());
        Ok(stations)
    }

    /// Precipitation rows inside `window`, ascending by date
    pub async fn precipitation_in(
        &self,
        window: &DateWindow,
    ) -> Result<Vec<PrecipitationObservation>, StorageError> {
        let rows = sqlx::query_as::<_, PrecipitationObservation>(
            "SELECT date, prcp, station FROM measurement \
             WHERE date >= ?1 AND date < ?2 ORDER BY date",
        )
        .bind(window.start_key())
        .bind(window.end_key())
        .fetch_all(&self.pool)
        .await?;

        debug!(
            "Fetched {} precipitation rows for [{}, {})",
            rows.len(),
            window.start,
            window.end
        );
        Ok(rows)
    }

    /// Temperature rows inside `window`, ascending by date
    pub async fn temperatures_in(
        &self,
        window: &DateWindow,
    ) -> Result<Vec<TemperatureObservation>, StorageError> {
        let rows = sqlx::query_as::<_, TemperatureObservation>(
            "SELECT date, tobs, station FROM measurement \
             WHERE date >= ?1 AND date < ?2 ORDER BY date",
        )
        .bind(window.start_key())
        .bind(window.end_key())
        .fetch_all(&self.pool)
        .await?;

        debug!(
            "Fetched {} temperature rows for [{}, {})",
            rows.len(),
            window.start,
            window.end
        );
        Ok(rows)
    }

    /// Temperature stats for rows whose date equals `date` exactly.
    ///
    /// `date` is not validated; a malformed string matches nothing.
    pub async fn temperature_stats_on(&self, date: &str) -> Result<TemperatureStats, StorageError> {
        let stats = sqlx::query_as::<_, TemperatureStats>(&format!(
            "{STATS_SELECT} WHERE date = ?1"
        ))
        .bind(date)
        .fetch_one(&self.pool)
        .await?;

        Ok(stats)
    }

    /// Temperature stats for `start <= date <= end`, both bounds inclusive.
    ///
    /// A reversed range simply matches nothing.
    pub async fn temperature_stats_between(
        &self,
        start: &str,
        end: &str,
    ) -> Result<TemperatureStats, StorageError> {
        let stats = sqlx::query_as::<_, TemperatureStats>(&format!(
            "{STATS_SELECT} WHERE date >= ?1 AND date <= ?2"
        ))
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await?;

        Ok(stats)
    }

    /// Number of stations
    pub async fn station_count(&self) -> Result<i64, StorageError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM station")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Number of measurement rows
    pub async fn measurement_count(&self) -> Result<i64, StorageError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM measurement")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Earliest and latest measurement dates
    pub async fn date_bounds(&self) -> Result<DateBounds, StorageError> {
        let bounds = sqlx::query_as::<_, DateBounds>(
            "SELECT MIN(date) AS earliest, MAX(date) AS latest FROM measurement",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(bounds)
    }

    /// Close the underlying pool
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Weather database closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{sample_measurements, sample_stations, seed_database};
    use tempfile::TempDir;

    async fn open_sample() -> (TempDir, Repository) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hawaii.sqlite");
        seed_database(&path, &sample_stations(), &sample_measurements())
            .await
            .unwrap();
        let repo = Repository::open(&path, 2).await.unwrap();
        (dir, repo)
    }

    #[tokio::test]
    async fn test_open_missing_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let result = Repository::open(dir.path().join("missing.sqlite"), 1).await;
        assert!(matches!(result, Err(StorageError::Unavailable { .. })));
        assert!(!dir.path().join("missing.sqlite").exists());
    }

    #[tokio::test]
    async fn test_stations_in_store_order() {
        let (_dir, repo) = open_sample().await;
        let stations = repo.stations().await.unwrap();

        assert_eq!(stations, sample_stations());
        assert_eq!(repo.station_count().await.unwrap(), stations.len() as i64);
    }

    #[tokio::test]
    async fn test_precipitation_uses_half_open_window() {
        let (_dir, repo) = open_sample().await;
        let window = DateWindow::trailing_year();
        let rows = repo.precipitation_in(&window).await.unwrap();

        assert!(!rows.is_empty());
        assert!(rows.iter().all(|r| window.contains(&r.date)));
        assert!(rows.windows(2).all(|w| w[0].date <= w[1].date));
        assert_eq!(rows.first().unwrap().date, "2016-08-20");
        assert_eq!(rows.last().unwrap().date, "2017-08-19");
        // Null precipitation survives as None
        assert!(rows.iter().any(|r| r.prcp.is_none()));
    }

    #[tokio::test]
    async fn test_trailing_year_keeps_rows_from_every_station() {
        let (_dir, repo) = open_sample().await;
        let rows = repo
            .precipitation_in(&DateWindow::trailing_year())
            .await
            .unwrap();

        let mut same_day: Vec<&str> = rows
            .iter()
            .filter(|r| r.date == "2016-12-25")
            .map(|r| r.station.as_str())
            .collect();
        same_day.sort_unstable();
        assert_eq!(same_day, ["USC00514830", "USC00519397"]);
        assert_eq!(rows.len(), 5);
    }

    #[tokio::test]
    async fn test_temperatures_match_precipitation_rows() {
        let (_dir, repo) = open_sample().await;
        let window = DateWindow::trailing_year();
        let prcp = repo.precipitation_in(&window).await.unwrap();
        let tobs = repo.temperatures_in(&window).await.unwrap();

        assert_eq!(prcp.len(), tobs.len());
        for (p, t) in prcp.iter().zip(&tobs) {
            assert_eq!(p.date, t.date);
        }
    }

    #[tokio::test]
    async fn test_stats_on_populated_date() {
        let (_dir, repo) = open_sample().await;
        let stats = repo.temperature_stats_on("2011-08-11").await.unwrap();

        assert_eq!(stats.min, Some(70.0));
        assert_eq!(stats.max, Some(80.0));
        assert_eq!(stats.avg, Some(75.0));
    }

    #[tokio::test]
    async fn test_stats_on_unknown_or_malformed_date() {
        let (_dir, repo) = open_sample().await;

        assert_eq!(
            repo.temperature_stats_on("1999-01-01").await.unwrap(),
            TemperatureStats::default()
        );
        assert_eq!(
            repo.temperature_stats_on("not-a-date").await.unwrap(),
            TemperatureStats::default()
        );
    }

    #[tokio::test]
    async fn test_stats_between_is_inclusive() {
        let (_dir, repo) = open_sample().await;
        let stats = repo
            .temperature_stats_between("2011-08-11", "2011-08-12")
            .await
            .unwrap();

        assert_eq!(stats.min, Some(68.0));
        assert_eq!(stats.max, Some(80.0));
        assert_eq!(stats.avg, Some(73.0));
    }

    #[tokio::test]
    async fn test_stats_between_reversed_range_is_empty() {
        let (_dir, repo) = open_sample().await;
        let stats = repo
            .temperature_stats_between("2017-01-01", "2016-01-01")
            .await
            .unwrap();

        assert_eq!(stats, TemperatureStats::default());
    }

    #[tokio::test]
    async fn test_date_bounds() {
        let (_dir, repo) = open_sample().await;
        let bounds = repo.date_bounds().await.unwrap();

        assert_eq!(bounds.earliest.as_deref(), Some("2010-01-01"));
        assert_eq!(bounds.latest.as_deref(), Some("2017-08-23"));
        assert_eq!(
            repo.measurement_count().await.unwrap(),
            sample_measurements().len() as i64
        );
    }
}
