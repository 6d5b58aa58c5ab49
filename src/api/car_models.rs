use async_trait::async_trait;
use sea_orm::*;
use serde::{Deserialize, Serialize};

use crate::api::catalog::{normalize_name, CatalogStore};
use crate::domain::DomainError;
use crate::models::brand::{self, Entity as Brand};
use crate::models::car_model::{self, Entity as CarModel};
use crate::models::trim::{self, Entity as Trim};
use crate::models::vehicle::{self, Entity as Vehicle};

pub struct CarModels;

#[derive(Debug, Deserialize)]
pub struct CarModelInput {
    pub name: String,
    pub brand_id: i32,
}

/// Model row with its owning brand expanded.
#[derive(Debug, Serialize)]
pub struct CarModelRow {
    pub id: i32,
    pub name: String,
    pub brand_id: i32,
    pub brand_name: String,
}

fn row(model: car_model::Model, brand: Option<brand::Model>) -> CarModelRow {
    CarModelRow {
        id: model.id,
        name: model.name,
        brand_id: model.brand_id,
        brand_name: brand.map(|b| b.name).unwrap_or_else(|| "Unknown".to_string()),
    }
}

#[async_trait]
impl CatalogStore for CarModels {
    const SINGULAR: &'static str = "Model";
    const KEY: &'static str = "model";
    const PLURAL: &'static str = "models";

    type Row = CarModelRow;
    type Input = CarModelInput;

    async fn list(db: &DatabaseConnection) -> Result<Vec<Self::Row>, DomainError> {
        let models = CarModel::find()
            .order_by_asc(brand::Column::Name)
            .order_by_asc(car_model::Column::Name)
            .find_also_related(Brand)
            .all(db)
            .await?;

        Ok(models.into_iter().map(|(m, b)| row(m, b)).collect())
    }

    async fn find(db: &DatabaseConnection, id: i32) -> Result<Option<Self::Row>, DomainError> {
        let found = CarModel::find_by_id(id)
            .find_also_related(Brand)
            .one(db)
            .await?;
        Ok(found.map(|(m, b)| row(m, b)))
    }

    async fn insert(
        db: &DatabaseConnection,
        input: Self::Input,
    ) -> Result<(Self::Row, String), DomainError> {
        let name = normalize_name(&input.name)?;

        let brand = Brand::find_by_id(input.brand_id)
            .one(db)
            .await?
            .ok_or_else(|| DomainError::validation("brand_id", "Unknown brand"))?;

        // (name, brand) must be unique among siblings
        let duplicate = CarModel::find()
            .filter(car_model::Column::Name.eq(&name))
            .filter(car_model::Column::BrandId.eq(input.brand_id))
            .count(db)
            .await?;
        if duplicate > 0 {
            return Err(DomainError::validation(
                "name",
                format!("Model '{}' already exists for brand {}.", name, brand.name),
            ));
        }

        let now = chrono::Utc::now().to_rfc3339();
        let model = car_model::ActiveModel {
            name: Set(name),
            brand_id: Set(input.brand_id),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await?;

        let message = format!(
            "Model '{}' ({}) created successfully",
            model.name, brand.name
        );
        Ok((row(model, Some(brand)), message))
    }

    async fn update(
        db: &DatabaseConnection,
        id: i32,
        input: Self::Input,
    ) -> Result<(Self::Row, String), DomainError> {
        let existing = CarModel::find_by_id(id)
            .one(db)
            .await?
            .ok_or(DomainError::NotFound)?;

        let name = normalize_name(&input.name)?;

        let brand = Brand::find_by_id(input.brand_id)
            .one(db)
            .await?
            .ok_or_else(|| DomainError::validation("brand_id", "Unknown brand"))?;

        let duplicate = CarModel::find()
            .filter(car_model::Column::Name.eq(&name))
            .filter(car_model::Column::BrandId.eq(input.brand_id))
            .filter(car_model::Column::Id.ne(id))
            .count(db)
            .await?;
        if duplicate > 0 {
            return Err(DomainError::validation(
                "name",
                format!(
                    "Another model '{}' already exists for brand {}.",
                    name, brand.name
                ),
            ));
        }

        let mut active: car_model::ActiveModel = existing.into();
        active.name = Set(name);
        active.brand_id = Set(input.brand_id);
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());

        match active.update(db).await {
            Ok(model) => {
                let message = format!(
                    "Model '{}' ({}) updated successfully",
                    model.name, brand.name
                );
                Ok((row(model, Some(brand)), message))
            }
            Err(DbErr::RecordNotUpdated) => {
                if CarModel::find_by_id(id).one(db).await?.is_none() {
                    Err(DomainError::NotFound)
                } else {
                    Err(DomainError::Database("concurrent update conflict".into()))
                }
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(db: &DatabaseConnection, id: i32) -> Result<String, DomainError> {
        let existing = CarModel::find_by_id(id)
            .find_also_related(Brand)
            .one(db)
            .await?
            .ok_or(DomainError::NotFound)?;
        let (model, brand) = existing;
        let brand_name = brand.map(|b| b.name).unwrap_or_else(|| "Unknown".to_string());

        let trim_count = Trim::find()
            .filter(trim::Column::ModelId.eq(id))
            .count(db)
            .await?;
        if trim_count > 0 {
            return Err(DomainError::Conflict(format!(
                "Cannot delete model '{}' ({}): it is used by {} trim(s).",
                model.name, brand_name, trim_count
            )));
        }

        let vehicle_count = Vehicle::find()
            .filter(vehicle::Column::ModelId.eq(id))
            .count(db)
            .await?;
        if vehicle_count > 0 {
            return Err(DomainError::Conflict(format!(
                "Cannot delete model '{}' ({}): it is used by vehicles.",
                model.name, brand_name
            )));
        }

        let name = model.name.clone();
        match model.delete(db).await {
            Ok(_) => Ok(format!("Model '{}' deleted successfully", name)),
            Err(_) => Err(DomainError::Conflict(format!(
                "Cannot delete model '{}': it is still in use.",
                name
            ))),
        }
    }
}
