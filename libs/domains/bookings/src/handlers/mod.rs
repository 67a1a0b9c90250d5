pub mod bookings;
pub mod views;

pub use bookings::router as bookings_router;
pub use views::router as item_views_router;
