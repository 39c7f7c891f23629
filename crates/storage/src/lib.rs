//! Storage Layer
//!
//! Read-only access to the station and measurement tables of the weather
//! observation database. The store is opened once and never written to.

mod repository;
mod window;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use repository::{
    DateBounds, PrecipitationObservation, Repository, Station, TemperatureObservation,
    TemperatureStats,
};
pub use window::{DateWindow, TRAILING_YEAR_DAYS, TRAILING_YEAR_END};

use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database at {path} is unavailable: {source}")]
    Unavailable {
        path: String,
        #[source]
        source: sqlx::Error,
    },
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}
