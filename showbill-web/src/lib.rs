//! showbill-web library - router and shared application state

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use showbill_common::db::Store;

pub mod api;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Data-access context, cloned into each handler
    pub store: Store,
}

impl AppState {
    /// Create new application state
    pub fn new(store: Store) -> Self {
        Self { store }
    }
}

/// Build application router
///
/// Delete endpoints are GET routes; the pages link to them directly.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(api::serve_index))
        .merge(api::health_routes())
        // venues
        .route("/venues", get(api::venues::list_venues))
        .route("/venues/search", post(api::venues::search_venues))
        .route(
            "/venues/create",
            get(api::serve_new_venue).post(api::venues::create_venue),
        )
        .route("/venues/:id", get(api::venues::venue_detail))
        .route(
            "/venues/:id/edit",
            get(api::venues::edit_venue).post(api::venues::update_venue),
        )
        .route("/venues/:id/del", get(api::venues::delete_venue))
        // artists
        .route("/artists", get(api::artists::list_artists))
        .route("/artists/search", post(api::artists::search_artists))
        .route(
            "/artists/create",
            get(api::serve_new_artist).post(api::artists::create_artist),
        )
        .route("/artists/:id", get(api::artists::artist_detail))
        .route(
            "/artists/:id/edit",
            get(api::artists::edit_artist).post(api::artists::update_artist),
        )
        .route("/artists/:id/del", get(api::artists::delete_artist))
        // shows
        .route("/shows", get(api::shows::list_shows))
        .route(
            "/shows/create",
            get(api::shows::create_show_form).post(api::shows::create_show),
        )
        .route("/shows/:id/del", get(api::shows::delete_show))
        .fallback(api::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
