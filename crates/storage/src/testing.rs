//! Test fixtures
//!
//! Writes a small database with the same `station`/`measurement` schema as
//! the production file so that read-only code paths can be exercised.

use crate::{Station, StorageError};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use std::path::Path;

/// One row of the `measurement` table
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementRow {
    pub station: String,
    pub date: String,
    pub prcp: Option<f64>,
    pub tobs: f64,
}

impl MeasurementRow {
    pub fn new(station: &str, date: &str, prcp: Option<f64>, tobs: f64) -> Self {
        Self {
            station: station.to_string(),
            date: date.to_string(),
            prcp,
            tobs,
        }
    }
}

const STATION_TABLE: &str = "
CREATE TABLE station (
    id INTEGER NOT NULL,
    station TEXT,
    name TEXT,
    latitude FLOAT,
    longitude FLOAT,
    elevation FLOAT,
    PRIMARY KEY (id)
)";

const MEASUREMENT_TABLE: &str = "
CREATE TABLE measurement (
    id INTEGER NOT NULL,
    station TEXT,
    date TEXT,
    prcp FLOAT,
    tobs FLOAT,
    PRIMARY KEY (id)
)";

/// Create `path` and fill it with the given rows.
pub async fn seed_database(
    path: &Path,
    stations: &[Station],
    measurements: &[MeasurementRow],
) -> Result<(), StorageError> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Delete);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;

    sqlx::query(STATION_TABLE).execute(&pool).await?;
    sqlx::query(MEASUREMENT_TABLE).execute(&pool).await?;

    for station in stations {
        sqlx::query(
            "INSERT INTO station (id, station, name, latitude, longitude, elevation) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(station.id)
        .bind(&station.station)
        .bind(&station.name)
        .bind(station.latitude)
        .bind(station.longitude)
        .bind(station.elevation)
        .execute(&pool)
        .await?;
    }

    for (id, row) in measurements.iter().enumerate() {
        sqlx::query(
            "INSERT INTO measurement (id, station, date, prcp, tobs) VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(id as i64 + 1)
        .bind(&row.station)
        .bind(&row.date)
        .bind(row.prcp)
        .bind(row.tobs)
        .execute(&pool)
        .await?;
    }

    pool.close().await;
    Ok(())
}

/// Three stations in id order
pub fn sample_stations() -> Vec<Station> {
    vec![
        Station {
            id: 1,
            station: "USC00519397".to_string(),
            name: "WAIKIKI 717.2, HI US".to_string(),
            latitude: 21.2716,
            longitude: -157.8168,
            elevation: 3.0,
        },
        Station {
            id: 2,
            station: "USC00513117".to_string(),
            name: "KANEOHE 838.1, HI US".to_string(),
            latitude: 21.4234,
            longitude: -157.8015,
            elevation: 14.6,
        },
        Station {
            id: 3,
            station: "USC00514830".to_string(),
            name: "KUALOA RANCH HEADQUARTERS 886.9, HI US".to_string(),
            latitude: 21.5213,
            longitude: -157.8374,
            elevation: 7.0,
        },
    ]
}

/// Measurements spanning 2010-01-01 to 2017-08-23, inserted unordered
pub fn sample_measurements() -> Vec<MeasurementRow> {
    vec![
        MeasurementRow::new("USC00519397", "2017-08-23", Some(0.0), 81.0),
        MeasurementRow::new("USC00519397", "2010-01-01", Some(0.08), 65.0),
        MeasurementRow::new("USC00519397", "2011-08-11", Some(0.0), 70.0),
        MeasurementRow::new("USC00513117", "2011-08-11", None, 75.0),
        MeasurementRow::new("USC00514830", "2011-08-11", Some(0.12), 80.0),
        MeasurementRow::new("USC00519397", "2011-08-12", Some(0.0), 68.0),
        MeasurementRow::new("USC00513117", "2011-08-12", Some(0.3), 72.0),
        MeasurementRow::new("USC00519397", "2016-08-19", Some(0.01), 79.0),
        MeasurementRow::new("USC00513117", "2017-02-14", None, 69.0),
        MeasurementRow::new("USC00519397", "2016-08-20", Some(0.0), 81.0),
        MeasurementRow::new("USC00514830", "2016-12-25", Some(1.2), 71.0),
        MeasurementRow::new("USC00519397", "2016-12-25", Some(0.4), 74.0),
        MeasurementRow::new("USC00519397", "2017-08-19", Some(0.09), 80.0),
        MeasurementRow::new("USC00513117", "2017-08-20", Some(0.0), 82.0),
    ]
}
