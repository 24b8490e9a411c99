//! Database schema, models, and data access

pub mod init;
pub mod models;
pub mod store;

pub use init::{create_schema, init_database, init_memory_database};
pub use store::Store;
