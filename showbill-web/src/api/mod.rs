//! HTTP API handlers for showbill-web

use serde::Serialize;

pub mod artists;
pub mod error;
pub mod health;
pub mod shows;
pub mod ui;
pub mod venues;

pub use error::ApiError;
pub use health::health_routes;
pub use ui::{not_found, serve_index, serve_new_artist, serve_new_venue};

/// Outcome of a create/update/delete, carried to the page as a flash-style
/// message. Persistence failures collapse into success=false with a generic
/// message naming the entity and action.
#[derive(Debug, Serialize)]
pub struct OutcomeResponse {
    pub success: bool,
    pub message: String,
}

impl OutcomeResponse {
    pub fn ok(message: String) -> Self {
        Self {
            success: true,
            message,
        }
    }

    pub fn failed(message: String) -> Self {
        Self {
            success: false,
            message,
        }
    }
}

/// Split a comma-separated form field into a genre list
pub(crate) fn split_genres(field: Option<String>) -> Vec<String> {
    field
        .map(|text| {
            text.split(',')
                .map(str::trim)
                .filter(|g| !g.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}
