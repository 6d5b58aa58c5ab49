use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "trims")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub model_id: i32,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::car_model::Entity",
        from = "Column::ModelId",
        to = "super::car_model::Column::Id"
    )]
    CarModel,
}

impl Related<super::car_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CarModel.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
