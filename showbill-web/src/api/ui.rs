//! Static page serving
//!
//! The home page and the blank create forms are static HTML; everything
//! data-driven comes from the JSON endpoints. The 404/500 pages double as
//! the error bodies.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

const INDEX_HTML: &str = include_str!("../ui/index.html");
const NEW_VENUE_HTML: &str = include_str!("../ui/new_venue.html");
const NEW_ARTIST_HTML: &str = include_str!("../ui/new_artist.html");
pub(crate) const NOT_FOUND_HTML: &str = include_str!("../ui/404.html");
pub(crate) const SERVER_ERROR_HTML: &str = include_str!("../ui/500.html");

/// GET /
///
/// Serves the home page
pub async fn serve_index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// GET /venues/create
///
/// Serves the blank new-venue form
pub async fn serve_new_venue() -> Html<&'static str> {
    Html(NEW_VENUE_HTML)
}

/// GET /artists/create
///
/// Serves the blank new-artist form
pub async fn serve_new_artist() -> Html<&'static str> {
    Html(NEW_ARTIST_HTML)
}

/// Fallback for unmatched routes
pub async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Html(NOT_FOUND_HTML)).into_response()
}
