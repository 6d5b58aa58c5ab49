//! Read-only lookups backing the cascading brand → model → trim dropdowns.
//!
//! Result sets are tens of items at most; no caching, no pagination.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use sea_orm::*;
use serde::{Deserialize, Serialize};

use crate::models::car_model::{self, Entity as CarModel};
use crate::models::trim::{self, Entity as Trim};

#[derive(Debug, Serialize)]
pub struct LookupItem {
    pub id: i32,
    pub name: String,
}

#[derive(Deserialize)]
pub struct ModelsQuery {
    pub brand_id: i32,
}

#[derive(Deserialize)]
pub struct TrimsQuery {
    pub model_id: i32,
}

#[utoipa::path(
    get,
    path = "/api/lookup/models",
    params(("brand_id" = i32, Query, description = "Owning brand id")),
    responses(
        (status = 200, description = "Name-ordered models of the brand")
    )
)]
pub async fn models_by_brand(
    State(db): State<DatabaseConnection>,
    Query(query): Query<ModelsQuery>,
) -> Result<Json<Vec<LookupItem>>, (StatusCode, String)> {
    let models = CarModel::find()
        .filter(car_model::Column::BrandId.eq(query.brand_id))
        .order_by_asc(car_model::Column::Name)
        .all(&db)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(Json(
        models
            .into_iter()
            .map(|m| LookupItem {
                id: m.id,
                name: m.name,
            })
            .collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/api/lookup/trims",
    params(("model_id" = i32, Query, description = "Owning model id")),
    responses(
        (status = 200, description = "Name-ordered trims of the model")
    )
)]
pub async fn trims_by_model(
    State(db): State<DatabaseConnection>,
    Query(query): Query<TrimsQuery>,
) -> Result<Json<Vec<LookupItem>>, (StatusCode, String)> {
    let trims = Trim::find()
        .filter(trim::Column::ModelId.eq(query.model_id))
        .order_by_asc(trim::Column::Name)
        .all(&db)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(Json(
        trims
            .into_iter()
            .map(|t| LookupItem {
                id: t.id,
                name: t.name,
            })
            .collect(),
    ))
}
