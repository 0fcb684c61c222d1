pub mod types;
pub mod filter;
pub mod queries;

pub use types::*;
pub use filter::*;
pub use queries::*;
