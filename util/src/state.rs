//! Application state container shared across Axum route handlers and services.
//!
//! This struct holds the database connection together with the time
//! collaborators every attendance operation needs. It is cheap to clone and
//! is passed into route handlers via Axum's `State<T>` extractor.

use crate::config;
use crate::time::{Clock, DisplayZone, Normalizer, SharedClock, SystemClock, TimeError};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// Central application state shared across the server.
///
/// This includes:
/// - A cloned, thread-safe database connection for use with SeaORM.
/// - The injected clock that stamps scans and sessions.
/// - The normalizer (write boundary) and display zone (read boundary).
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    clock: SharedClock,
    normalizer: Normalizer,
    display: DisplayZone,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        clock: SharedClock,
        normalizer: Normalizer,
        display: DisplayZone,
    ) -> Self {
        Self {
            db,
            clock,
            normalizer,
            display,
        }
    }

    /// Builds state from `HOST_UTC_OFFSET` / `DISPLAY_TIMEZONE` with the system clock.
    pub fn from_config(db: DatabaseConnection) -> Result<Self, TimeError> {
        let normalizer = Normalizer::from_offset_str(&config::host_utc_offset())?;
        let display = DisplayZone::parse(&config::display_timezone())?;
        Ok(Self::new(db, Arc::new(SystemClock), normalizer, display))
    }

    /// Returns a shared reference to the internal `DatabaseConnection`.
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    pub fn display(&self) -> &DisplayZone {
        &self.display
    }
}

impl AppState {
    /// Returns a cloned copy of the database connection.
    ///
    /// Useful for async contexts or spawning tasks that require ownership.
    pub fn db_clone(&self) -> DatabaseConnection {
        self.db.clone()
    }

    pub fn clock_clone(&self) -> SharedClock {
        self.clock.clone()
    }
}
