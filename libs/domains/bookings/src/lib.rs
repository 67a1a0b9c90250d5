//! Bookings Domain
//!
//! The marketplace core: the booking engine (creation rules and the one-shot
//! approval state machine), the item availability projection (last/next
//! booking markers), and the comment gate.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────┐
//! │  BookingService / ItemViews  │  ← Business rules, projections
//! └──────────────┬───────────────┘
//!                │
//! ┌──────────────▼───────────────┐
//! │  Booking/Comment repositories │  ← Data access (traits + Postgres)
//! │  + user/item collaborators    │
//! └──────────────┬───────────────┘
//!                │
//! ┌──────────────▼───────────────┐
//! │           Models              │  ← Entities, DTOs, state filters
//! └──────────────────────────────┘
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;
pub mod views;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use error::{BookingError, BookingResult};
pub use models::{
    Booking, BookingResponse, BookingStateQuery, BookingStatus, Comment, CommentResponse,
    CreateComment, ItemView, NewBooking,
};
pub use postgres::{PgBookingRepository, PgCommentRepository};
pub use repository::{BookingRepository, CommentRepository};
pub use service::BookingService;
pub use views::ItemViewService;
