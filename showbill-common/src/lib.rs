//! # Showbill Common Library
//!
//! Shared code for the Showbill booking site:
//! - Database schema, models, and the `Store` data-access context
//! - Error types
//! - Configuration resolution
//! - Timestamp helpers

pub mod config;
pub mod db;
pub mod error;
pub mod time;

pub use error::{Error, Result};
