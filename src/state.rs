//! Application state shared across handlers

use sea_orm::DatabaseConnection;
use std::path::PathBuf;

use crate::format::PriceFormat;

#[derive(Clone)]
pub struct AppState {
    /// Database connection
    db: DatabaseConnection,
    /// Price rendering configuration, passed to response building
    pub prices: PriceFormat,
    /// Where uploaded vehicle photos land
    pub upload_dir: PathBuf,
}

impl AppState {
    pub fn new(db: DatabaseConnection, prices: PriceFormat, upload_dir: PathBuf) -> Self {
        Self {
            db,
            prices,
            upload_dir,
        }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

// Lets handlers that only need the database extract State<DatabaseConnection>
impl axum::extract::FromRef<AppState> for DatabaseConnection {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}
