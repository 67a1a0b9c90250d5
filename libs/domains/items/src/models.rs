use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Item entity - something an owner offers for lending
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Item {
    /// Unique identifier
    pub id: i64,
    /// Short display name
    pub name: String,
    /// Free-form description, searched together with the name
    pub description: String,
    /// Whether the item can currently be booked
    pub available: bool,
    /// Owning user
    pub owner_id: i64,
    /// Request this item was listed in answer to, if any
    pub request_id: Option<i64>,
}

/// DTO for creating a new item
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateItem {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(min = 1))]
    pub description: String,
    pub available: bool,
    pub request_id: Option<i64>,
}

/// DTO for partially updating an item
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateItem {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[validate(length(min = 1))]
    pub description: Option<String>,
    pub available: Option<bool>,
}

/// DTO for item responses
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ItemResponse {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub available: bool,
    pub request_id: Option<i64>,
}

impl From<Item> for ItemResponse {
    fn from(item: Item) -> Self {
        Self {
            id: item.id,
            name: item.name,
            description: item.description,
            available: item.available,
            request_id: item.request_id,
        }
    }
}

impl Item {
    /// Apply updates from the UpdateItem DTO, leaving absent fields untouched
    pub fn apply_update(&mut self, update: UpdateItem) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(available) = update.available {
            self.available = available;
        }
    }
}
