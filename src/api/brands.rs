use async_trait::async_trait;
use sea_orm::*;
use serde::Deserialize;

use crate::api::catalog::{normalize_name, CatalogStore};
use crate::domain::DomainError;
use crate::models::brand::{self, Entity as Brand};
use crate::models::car_model::{self, Entity as CarModel};
use crate::models::vehicle::{self, Entity as Vehicle};

pub struct Brands;

#[derive(Debug, Deserialize)]
pub struct BrandInput {
    pub name: String,
}

#[async_trait]
impl CatalogStore for Brands {
    const SINGULAR: &'static str = "Brand";
    const KEY: &'static str = "brand";
    const PLURAL: &'static str = "brands";

    type Row = brand::Model;
    type Input = BrandInput;

    async fn list(db: &DatabaseConnection) -> Result<Vec<Self::Row>, DomainError> {
        Ok(Brand::find()
            .order_by_asc(brand::Column::Name)
            .all(db)
            .await?)
    }

    async fn find(db: &DatabaseConnection, id: i32) -> Result<Option<Self::Row>, DomainError> {
        Ok(Brand::find_by_id(id).one(db).await?)
    }

    async fn insert(
        db: &DatabaseConnection,
        input: Self::Input,
    ) -> Result<(Self::Row, String), DomainError> {
        let name = normalize_name(&input.name)?;

        // Brand names are globally unique
        let duplicate = Brand::find()
            .filter(brand::Column::Name.eq(&name))
            .count(db)
            .await?;
        if duplicate > 0 {
            return Err(DomainError::validation("name", "This brand already exists."));
        }

        let now = chrono::Utc::now().to_rfc3339();
        let row = brand::ActiveModel {
            name: Set(name),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await?;

        let message = format!("Brand '{}' created successfully", row.name);
        Ok((row, message))
    }

    async fn update(
        db: &DatabaseConnection,
        id: i32,
        input: Self::Input,
    ) -> Result<(Self::Row, String), DomainError> {
        let existing = Brand::find_by_id(id)
            .one(db)
            .await?
            .ok_or(DomainError::NotFound)?;

        let name = normalize_name(&input.name)?;

        let duplicate = Brand::find()
            .filter(brand::Column::Name.eq(&name))
            .filter(brand::Column::Id.ne(id))
            .count(db)
            .await?;
        if duplicate > 0 {
            return Err(DomainError::validation(
                "name",
                "Another brand already has this name.",
            ));
        }

        let mut active: brand::ActiveModel = existing.into();
        active.name = Set(name);
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());

        match active.update(db).await {
            Ok(row) => {
                let message = format!("Brand '{}' updated successfully", row.name);
                Ok((row, message))
            }
            // Row changed underneath us: vanished means not-found, anything
            // else is re-raised
            Err(DbErr::RecordNotUpdated) => {
                if Brand::find_by_id(id).one(db).await?.is_none() {
                    Err(DomainError::NotFound)
                } else {
                    Err(DomainError::Database("concurrent update conflict".into()))
                }
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(db: &DatabaseConnection, id: i32) -> Result<String, DomainError> {
        let existing = Brand::find_by_id(id)
            .one(db)
            .await?
            .ok_or(DomainError::NotFound)?;

        let model_count = CarModel::find()
            .filter(car_model::Column::BrandId.eq(id))
            .count(db)
            .await?;
        if model_count > 0 {
            return Err(DomainError::Conflict(format!(
                "Cannot delete brand '{}': it is used by {} model(s).",
                existing.name, model_count
            )));
        }

        let vehicle_count = Vehicle::find()
            .filter(vehicle::Column::BrandId.eq(id))
            .count(db)
            .await?;
        if vehicle_count > 0 {
            return Err(DomainError::Conflict(format!(
                "Cannot delete brand '{}': it is used by vehicles.",
                existing.name
            )));
        }

        let name = existing.name.clone();
        match existing.delete(db).await {
            Ok(_) => Ok(format!("Brand '{}' deleted successfully", name)),
            // A dependent discovered only at the constraint layer still
            // surfaces as a recoverable message
            Err(_) => Err(DomainError::Conflict(format!(
                "Cannot delete brand '{}': it is still in use.",
                name
            ))),
        }
    }
}
