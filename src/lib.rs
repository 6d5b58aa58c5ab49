pub mod api;
pub mod api_docs;
pub mod auth;
pub mod config;
pub mod db;
pub mod domain;
pub mod format;
pub mod models;
pub mod seed;
pub mod state;

pub use state::AppState;
