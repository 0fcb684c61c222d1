pub mod auth_handlers;
pub mod booking_handlers;
