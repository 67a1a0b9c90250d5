//! Items Domain
//!
//! Item catalog for the marketplace: owner-scoped CRUD, availability flag,
//! text search, and the request-board lookups used when attaching items to
//! the requests that asked for them.

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{ItemError, ItemResult};
pub use models::{CreateItem, Item, ItemResponse, UpdateItem};
pub use postgres::PgItemRepository;
pub use repository::ItemRepository;
pub use service::ItemService;
