use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Fixed resale markup added on top of purchase price and repair costs (EUR).
pub const MARKUP_EUR: f64 = 500.0;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "vehicles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// 17-character chassis number. Optional; unique among vehicles that
    /// have one.
    pub vin: Option<String>,
    pub year: i32,
    /// Stored alongside model_id/trim_id; the chain is not re-derived, so
    /// the triple is taken as submitted.
    pub brand_id: i32,
    pub model_id: i32,
    pub trim_id: i32,
    /// ISO date (YYYY-MM-DD)
    pub purchase_date: String,
    /// EUR
    pub purchase_price: f64,
    pub available_date: Option<String>,
    pub sale_date: Option<String>,
    pub photo_url: Option<String>,
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::brand::Entity",
        from = "Column::BrandId",
        to = "super::brand::Column::Id"
    )]
    Brand,
    #[sea_orm(
        belongs_to = "super::car_model::Entity",
        from = "Column::ModelId",
        to = "super::car_model::Column::Id"
    )]
    CarModel,
    #[sea_orm(
        belongs_to = "super::trim::Entity",
        from = "Column::TrimId",
        to = "super::trim::Column::Id"
    )]
    Trim,
    #[sea_orm(has_many = "super::repair::Entity")]
    Repairs,
}

impl Related<super::brand::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Brand.def()
    }
}

impl Related<super::car_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CarModel.def()
    }
}

impl Related<super::trim::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Trim.def()
    }
}

impl Related<super::repair::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Repairs.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Lifecycle status derived from the two optional dates. A sale date
    /// wins over an availability date.
    pub fn status(&self) -> &'static str {
        if self.sale_date.is_some() {
            "sold"
        } else if self.available_date.is_some() {
            "available"
        } else {
            "in_repair"
        }
    }

    /// On the lot and not yet sold.
    pub fn is_available(&self) -> bool {
        self.available_date.is_some() && self.sale_date.is_none()
    }

    /// Asking price: purchase price plus repair costs plus the fixed markup.
    pub fn sale_price(&self, repairs_total: f64) -> f64 {
        self.purchase_price + repairs_total + MARKUP_EUR
    }
}
