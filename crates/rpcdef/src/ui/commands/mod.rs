pub mod extract;
pub mod list;

pub use extract::{ExtractCommandConfig, extract_definition};
pub use list::list_services;
