pub mod booking;
pub mod clinic;
pub mod table_filter;
pub mod user;
