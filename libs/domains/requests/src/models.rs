use chrono::{DateTime, Utc};
use domain_items::Item;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request entity - a wish for an item nobody has listed yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ItemRequest {
    pub id: i64,
    pub description: String,
    pub requestor_id: i64,
    pub created: DateTime<Utc>,
}

/// DTO for creating a request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateRequest {
    #[validate(length(min = 1))]
    pub description: String,
}

/// Insertable request row
#[derive(Debug, Clone)]
pub struct NewRequestRecord {
    pub description: String,
    pub requestor_id: i64,
    pub created: DateTime<Utc>,
}

/// Item listed in answer to a request
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RequestItem {
    pub id: i64,
    pub name: String,
    pub owner_id: i64,
}

impl From<Item> for RequestItem {
    fn from(item: Item) -> Self {
        Self {
            id: item.id,
            name: item.name,
            owner_id: item.owner_id,
        }
    }
}

/// DTO for request responses, answering items attached
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RequestResponse {
    pub id: i64,
    pub description: String,
    pub created: DateTime<Utc>,
    pub items: Vec<RequestItem>,
}

impl RequestResponse {
    pub fn new(request: ItemRequest, items: Vec<Item>) -> Self {
        Self {
            id: request.id,
            description: request.description,
            created: request.created,
            items: items.into_iter().map(Into::into).collect(),
        }
    }
}
