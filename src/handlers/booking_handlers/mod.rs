pub mod export;
pub mod list;

pub use self::export::export_csv;
pub use self::list::{list, load_page};
