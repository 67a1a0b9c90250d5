//! Requests Domain
//!
//! The request board: users post "I need an item like X" requests, and items
//! listed in answer to a request are attached when the request is read back.

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{RequestError, RequestResult};
pub use models::{CreateRequest, ItemRequest, RequestResponse};
pub use postgres::PgRequestRepository;
pub use repository::RequestRepository;
pub use service::RequestService;
