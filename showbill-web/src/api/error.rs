//! Handler-boundary error mapping
//!
//! Lookups that miss render the static not-found page; anything else
//! unexpected renders the static error page. Persistence failures on
//! mutations never reach this type: the mutation handlers report them as
//! flash-style outcome messages instead.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use tracing::{debug, error};

use showbill_common::Error;

/// Error returned by read handlers
#[derive(Debug)]
pub struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            Error::NotFound(what) => {
                debug!("Not found: {}", what);
                (StatusCode::NOT_FOUND, Html(super::ui::NOT_FOUND_HTML)).into_response()
            }
            e => {
                error!("Request failed: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html(super::ui::SERVER_ERROR_HTML),
                )
                    .into_response()
            }
        }
    }
}
