pub mod page;
pub mod query;
pub mod types;

pub use query::{search_page, select_bible};
