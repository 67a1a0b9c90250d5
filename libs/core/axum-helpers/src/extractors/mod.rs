//! Custom extractors for common request patterns.

mod sharer_id;
mod validated_json;

pub use sharer_id::{SharerId, SHARER_USER_HEADER};
pub use validated_json::ValidatedJson;
