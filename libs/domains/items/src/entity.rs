use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::{NotSet, Set};
use serde::{Deserialize, Serialize};

/// Sea-ORM entity for the items table
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub available: bool,
    pub owner_id: i64,
    pub request_id: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// Conversion from Sea-ORM Model to domain Item
impl From<Model> for crate::models::Item {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            available: model.available,
            owner_id: model.owner_id,
            request_id: model.request_id,
        }
    }
}

impl From<crate::models::Item> for ActiveModel {
    fn from(item: crate::models::Item) -> Self {
        ActiveModel {
            id: Set(item.id),
            name: Set(item.name),
            description: Set(item.description),
            available: Set(item.available),
            owner_id: Set(item.owner_id),
            request_id: Set(item.request_id),
        }
    }
}

impl crate::models::CreateItem {
    /// Build an insertable record owned by the given user
    pub fn into_active_model(self, owner_id: i64) -> ActiveModel {
        ActiveModel {
            id: NotSet,
            name: Set(self.name),
            description: Set(self.description),
            available: Set(self.available),
            owner_id: Set(owner_id),
            request_id: Set(self.request_id),
        }
    }
}
