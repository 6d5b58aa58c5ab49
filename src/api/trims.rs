use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::*;
use serde::{Deserialize, Serialize};

use crate::api::catalog::{normalize_name, CatalogStore};
use crate::domain::DomainError;
use crate::models::brand::{self, Entity as Brand};
use crate::models::car_model::{self, Entity as CarModel};
use crate::models::trim::{self, Entity as Trim};
use crate::models::vehicle::{self, Entity as Vehicle};

pub struct Trims;

#[derive(Debug, Deserialize)]
pub struct TrimInput {
    pub name: String,
    pub model_id: i32,
}

/// Trim row with its model and brand expanded.
#[derive(Debug, Serialize)]
pub struct TrimRow {
    pub id: i32,
    pub name: String,
    pub model_id: i32,
    pub model_name: String,
    pub brand_name: String,
}

async fn expand(
    db: &DatabaseConnection,
    pairs: Vec<(trim::Model, Option<car_model::Model>)>,
) -> Result<Vec<TrimRow>, DomainError> {
    let brand_ids: Vec<i32> = pairs
        .iter()
        .filter_map(|(_, m)| m.as_ref().map(|m| m.brand_id))
        .collect();

    let mut brand_names: HashMap<i32, String> = HashMap::new();
    if !brand_ids.is_empty() {
        for b in Brand::find()
            .filter(brand::Column::Id.is_in(brand_ids))
            .all(db)
            .await?
        {
            brand_names.insert(b.id, b.name);
        }
    }

    let mut rows: Vec<TrimRow> = pairs
        .into_iter()
        .map(|(t, m)| {
            let (model_name, brand_name) = match m {
                Some(m) => (
                    m.name,
                    brand_names
                        .get(&m.brand_id)
                        .cloned()
                        .unwrap_or_else(|| "Unknown".to_string()),
                ),
                None => ("Unknown".to_string(), "Unknown".to_string()),
            };
            TrimRow {
                id: t.id,
                name: t.name,
                model_id: t.model_id,
                model_name,
                brand_name,
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        (&a.brand_name, &a.model_name, &a.name).cmp(&(&b.brand_name, &b.model_name, &b.name))
    });

    Ok(rows)
}

#[async_trait]
impl CatalogStore for Trims {
    const SINGULAR: &'static str = "Trim";
    const KEY: &'static str = "trim";
    const PLURAL: &'static str = "trims";

    type Row = TrimRow;
    type Input = TrimInput;

    async fn list(db: &DatabaseConnection) -> Result<Vec<Self::Row>, DomainError> {
        let pairs = Trim::find().find_also_related(CarModel).all(db).await?;
        expand(db, pairs).await
    }

    async fn find(db: &DatabaseConnection, id: i32) -> Result<Option<Self::Row>, DomainError> {
        let found = Trim::find_by_id(id)
            .find_also_related(CarModel)
            .one(db)
            .await?;
        match found {
            Some(pair) => Ok(expand(db, vec![pair]).await?.into_iter().next()),
            None => Ok(None),
        }
    }

    async fn insert(
        db: &DatabaseConnection,
        input: Self::Input,
    ) -> Result<(Self::Row, String), DomainError> {
        let name = normalize_name(&input.name)?;

        let model = CarModel::find_by_id(input.model_id)
            .one(db)
            .await?
            .ok_or_else(|| DomainError::validation("model_id", "Unknown model"))?;

        // (name, model) must be unique among siblings
        let duplicate = Trim::find()
            .filter(trim::Column::Name.eq(&name))
            .filter(trim::Column::ModelId.eq(input.model_id))
            .count(db)
            .await?;
        if duplicate > 0 {
            return Err(DomainError::validation(
                "name",
                format!("Trim '{}' already exists for model {}.", name, model.name),
            ));
        }

        let now = chrono::Utc::now().to_rfc3339();
        let created = trim::ActiveModel {
            name: Set(name),
            model_id: Set(input.model_id),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await?;

        let message = format!(
            "Trim '{}' ({}) created successfully",
            created.name, model.name
        );
        let rows = expand(db, vec![(created, Some(model))]).await?;
        Ok((rows.into_iter().next().expect("row built above"), message))
    }

    async fn update(
        db: &DatabaseConnection,
        id: i32,
        input: Self::Input,
    ) -> Result<(Self::Row, String), DomainError> {
        let existing = Trim::find_by_id(id)
            .one(db)
            .await?
            .ok_or(DomainError::NotFound)?;

        let name = normalize_name(&input.name)?;

        let model = CarModel::find_by_id(input.model_id)
            .one(db)
            .await?
            .ok_or_else(|| DomainError::validation("model_id", "Unknown model"))?;

        let duplicate = Trim::find()
            .filter(trim::Column::Name.eq(&name))
            .filter(trim::Column::ModelId.eq(input.model_id))
            .filter(trim::Column::Id.ne(id))
            .count(db)
            .await?;
        if duplicate > 0 {
            return Err(DomainError::validation(
                "name",
                format!(
                    "Another trim '{}' already exists for model {}.",
                    name, model.name
                ),
            ));
        }

        let mut active: trim::ActiveModel = existing.into();
        active.name = Set(name);
        active.model_id = Set(input.model_id);
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());

        match active.update(db).await {
            Ok(updated) => {
                let message = format!(
                    "Trim '{}' ({}) updated successfully",
                    updated.name, model.name
                );
                let rows = expand(db, vec![(updated, Some(model))]).await?;
                Ok((rows.into_iter().next().expect("row built above"), message))
            }
            Err(DbErr::RecordNotUpdated) => {
                if Trim::find_by_id(id).one(db).await?.is_none() {
                    Err(DomainError::NotFound)
                } else {
                    Err(DomainError::Database("concurrent update conflict".into()))
                }
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(db: &DatabaseConnection, id: i32) -> Result<String, DomainError> {
        let existing = Trim::find_by_id(id)
            .one(db)
            .await?
            .ok_or(DomainError::NotFound)?;

        // Trims own nothing; only vehicle references block the delete
        let vehicle_count = Vehicle::find()
            .filter(vehicle::Column::TrimId.eq(id))
            .count(db)
            .await?;
        if vehicle_count > 0 {
            return Err(DomainError::Conflict(format!(
                "Cannot delete trim '{}': it is used by vehicles.",
                existing.name
            )));
        }

        let name = existing.name.clone();
        match existing.delete(db).await {
            Ok(_) => Ok(format!("Trim '{}' deleted successfully", name)),
            Err(_) => Err(DomainError::Conflict(format!(
                "Cannot delete trim '{}': it is still in use.",
                name
            ))),
        }
    }
}
