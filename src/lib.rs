pub mod books;
pub mod config;
pub mod corpus;
pub mod focus;
pub mod models;
pub mod passage;
pub mod search;
pub mod utils;
