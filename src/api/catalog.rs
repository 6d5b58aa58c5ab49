//! Generic CRUD component for the catalog hierarchy (brands, models, trims).
//!
//! The three catalog kinds share the same request cycle: public list and
//! detail reads, admin-gated create/update/delete, sibling uniqueness
//! checks on write and bottom-up delete guards. Each kind implements
//! [`CatalogStore`] with its own queries; the axum handlers below are
//! written once and registered three times in the router.

use async_trait::async_trait;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::DatabaseConnection;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::auth::AdminClaims;
use crate::domain::DomainError;

#[async_trait]
pub trait CatalogStore: Send + Sync + 'static {
    /// Display name used in messages ("Brand")
    const SINGULAR: &'static str;
    /// JSON key for a single row ("brand")
    const KEY: &'static str;
    /// JSON key for the list ("brands")
    const PLURAL: &'static str;

    type Row: Serialize + Send;
    type Input: DeserializeOwned + Send;

    async fn list(db: &DatabaseConnection) -> Result<Vec<Self::Row>, DomainError>;
    async fn find(db: &DatabaseConnection, id: i32) -> Result<Option<Self::Row>, DomainError>;
    /// Returns the created row and a one-shot confirmation message.
    async fn insert(
        db: &DatabaseConnection,
        input: Self::Input,
    ) -> Result<(Self::Row, String), DomainError>;
    async fn update(
        db: &DatabaseConnection,
        id: i32,
        input: Self::Input,
    ) -> Result<(Self::Row, String), DomainError>;
    /// Returns a confirmation message; delete guards surface as
    /// `DomainError::Conflict`.
    async fn delete(db: &DatabaseConnection, id: i32) -> Result<String, DomainError>;
}

/// Map a domain failure onto the HTTP surface. `kind` names the entity in
/// not-found messages.
pub(crate) fn error_response(kind: &str, err: DomainError) -> Response {
    match err {
        DomainError::NotFound => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": format!("{} not found", kind) })),
        )
            .into_response(),
        DomainError::Validation { field, message } => {
            let mut errors = Map::new();
            errors.insert(field, Value::String(message));
            (StatusCode::BAD_REQUEST, Json(json!({ "errors": errors }))).into_response()
        }
        DomainError::Conflict(message) => {
            (StatusCode::CONFLICT, Json(json!({ "error": message }))).into_response()
        }
        DomainError::Database(message) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": message })),
        )
            .into_response(),
    }
}

/// Trimmed, length-checked catalog name.
pub(crate) fn normalize_name(name: &str) -> Result<String, DomainError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DomainError::validation("name", "Name is required"));
    }
    if name.chars().count() > 100 {
        return Err(DomainError::validation(
            "name",
            "Name must be 100 characters or fewer",
        ));
    }
    Ok(name.to_string())
}

pub async fn list<S: CatalogStore>(State(db): State<DatabaseConnection>) -> Response {
    match S::list(&db).await {
        Ok(rows) => {
            let total = rows.len();
            let mut body = Map::new();
            body.insert(S::PLURAL.to_string(), json!(rows));
            body.insert("total".to_string(), json!(total));
            Json(Value::Object(body)).into_response()
        }
        Err(e) => error_response(S::SINGULAR, e),
    }
}

pub async fn get_one<S: CatalogStore>(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> Response {
    match S::find(&db, id).await {
        Ok(Some(row)) => {
            let mut body = Map::new();
            body.insert(S::KEY.to_string(), json!(row));
            Json(Value::Object(body)).into_response()
        }
        Ok(None) => error_response(S::SINGULAR, DomainError::NotFound),
        Err(e) => error_response(S::SINGULAR, e),
    }
}

pub async fn create<S: CatalogStore>(
    _admin: AdminClaims,
    State(db): State<DatabaseConnection>,
    Json(payload): Json<S::Input>,
) -> Response {
    match S::insert(&db, payload).await {
        Ok((row, message)) => {
            let mut body = Map::new();
            body.insert(S::KEY.to_string(), json!(row));
            body.insert("message".to_string(), Value::String(message));
            (StatusCode::CREATED, Json(Value::Object(body))).into_response()
        }
        Err(e) => error_response(S::SINGULAR, e),
    }
}

pub async fn update<S: CatalogStore>(
    _admin: AdminClaims,
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
    Json(payload): Json<S::Input>,
) -> Response {
    match S::update(&db, id, payload).await {
        Ok((row, message)) => {
            let mut body = Map::new();
            body.insert(S::KEY.to_string(), json!(row));
            body.insert("message".to_string(), Value::String(message));
            Json(Value::Object(body)).into_response()
        }
        Err(e) => error_response(S::SINGULAR, e),
    }
}

pub async fn delete<S: CatalogStore>(
    _admin: AdminClaims,
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> Response {
    match S::delete(&db, id).await {
        Ok(message) => Json(json!({ "message": message })).into_response(),
        Err(e) => error_response(S::SINGULAR, e),
    }
}
