use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use sea_orm::*;
use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::auth::AdminClaims;
use crate::models::repair::{self, Entity as Repair};

#[derive(Debug, Deserialize)]
pub struct RepairRequest {
    pub description: String,
    pub cost: f64,
    pub repair_date: Option<String>,
}

fn validate(payload: &RepairRequest) -> Result<(String, f64), (StatusCode, Json<Value>)> {
    let mut errors = Map::new();

    let description = payload.description.trim().to_string();
    if description.is_empty() {
        errors.insert("description".to_string(), json!("Description is required"));
    } else if description.chars().count() > 500 {
        errors.insert(
            "description".to_string(),
            json!("Description must be 500 characters or fewer"),
        );
    }

    if !(payload.cost > 0.0 && payload.cost <= 99_999.99) {
        errors.insert(
            "cost".to_string(),
            json!("Cost must be positive and at most 99999.99"),
        );
    }

    if !errors.is_empty() {
        return Err((StatusCode::BAD_REQUEST, Json(json!({ "errors": errors }))));
    }

    let cost = (payload.cost * 100.0).round() / 100.0;
    Ok((description, cost))
}

fn internal(e: DbErr) -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": e.to_string() })),
    )
}

// The vehicle id is taken as given; ownership is the caller's concern
pub async fn create_repair(
    _admin: AdminClaims,
    State(db): State<DatabaseConnection>,
    Path(vehicle_id): Path<i32>,
    Json(payload): Json<RepairRequest>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    let (description, cost) = validate(&payload)?;

    let now = chrono::Utc::now().to_rfc3339();
    let new_repair = repair::ActiveModel {
        vehicle_id: Set(vehicle_id),
        description: Set(description),
        cost: Set(cost),
        repair_date: Set(payload.repair_date),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };

    let created = new_repair.insert(&db).await.map_err(internal)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "repair": created,
            "message": "Repair added successfully",
        })),
    ))
}

pub async fn update_repair(
    _admin: AdminClaims,
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
    Json(payload): Json<RepairRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let existing = Repair::find_by_id(id)
        .one(&db)
        .await
        .map_err(internal)?
        .ok_or((
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Repair not found" })),
        ))?;

    let (description, cost) = validate(&payload)?;

    let mut active: repair::ActiveModel = existing.into();
    active.description = Set(description);
    active.cost = Set(cost);
    active.repair_date = Set(payload.repair_date);
    active.updated_at = Set(chrono::Utc::now().to_rfc3339());

    match active.update(&db).await {
        Ok(updated) => Ok(Json(json!({
            "repair": updated,
            "message": "Repair updated successfully",
        }))),
        Err(DbErr::RecordNotUpdated) => {
            // Concurrent writer: vanished row reads as not-found, a
            // surviving row re-raises the conflict
            match Repair::find_by_id(id).one(&db).await.map_err(internal)? {
                None => Err((
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "Repair not found" })),
                )),
                Some(_) => Err((
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "concurrent update conflict" })),
                )),
            }
        }
        Err(e) => Err(internal(e)),
    }
}

pub async fn delete_repair(
    _admin: AdminClaims,
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let existing = Repair::find_by_id(id)
        .one(&db)
        .await
        .map_err(internal)?
        .ok_or((
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Repair not found" })),
        ))?;

    match existing.delete(&db).await {
        Ok(_) => Ok(Json(json!({ "message": "Repair deleted successfully" }))),
        Err(e) => {
            tracing::warn!("Repair {} delete refused by storage: {}", id, e);
            Err((
                StatusCode::CONFLICT,
                Json(json!({ "error": "Unable to delete this repair." })),
            ))
        }
    }
}
