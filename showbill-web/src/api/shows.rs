//! Show handlers
//!
//! A show links one artist to one venue at a start time. The create form
//! offers choice lists of every existing venue and artist; the insert
//! itself relies on the foreign-key constraints to reject dangling ids.

use axum::{
    extract::{Path, State},
    Form, Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use showbill_common::db::models::ShowListing;
use showbill_common::time::parse_timestamp;

use crate::api::{ApiError, OutcomeResponse};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ShowForm {
    pub venue_id: i64,
    pub artist_id: i64,
    pub start_time: String,
}

#[derive(Debug, Serialize)]
pub struct ShowListResponse {
    pub shows: Vec<ShowListing>,
}

/// One entry of a create-form choice list
#[derive(Debug, Serialize)]
pub struct Choice {
    pub id: i64,
    pub label: String,
}

/// Choice lists of all existing venues and artists
#[derive(Debug, Serialize)]
pub struct ShowFormResponse {
    pub venues: Vec<Choice>,
    pub artists: Vec<Choice>,
}

/// GET /shows
///
/// Flat listing of every show, venue and artist denormalized.
pub async fn list_shows(State(state): State<AppState>) -> Result<Json<ShowListResponse>, ApiError> {
    let shows = state.store.shows_all().await?;
    Ok(Json(ShowListResponse { shows }))
}

/// GET /shows/create
///
/// The data the new-show form needs: labelled choice lists of every venue
/// and artist.
pub async fn create_show_form(
    State(state): State<AppState>,
) -> Result<Json<ShowFormResponse>, ApiError> {
    let venues = state
        .store
        .venue_refs()
        .await?
        .into_iter()
        .map(|v| Choice {
            id: v.id,
            label: format!("(id: {}), Name: {}", v.id, v.name),
        })
        .collect();

    let artists = state
        .store
        .artist_refs()
        .await?
        .into_iter()
        .map(|a| Choice {
            id: a.id,
            label: format!("(id: {}), Name: {}", a.id, a.name),
        })
        .collect();

    Ok(Json(ShowFormResponse { venues, artists }))
}

/// POST /shows/create
///
/// Insert one show. A dangling venue_id/artist_id fails the foreign-key
/// check and is reported the same way as any other persistence failure.
pub async fn create_show(
    State(state): State<AppState>,
    Form(form): Form<ShowForm>,
) -> Json<OutcomeResponse> {
    let start_time = match parse_timestamp(&form.start_time) {
        Ok(ts) => ts,
        Err(e) => {
            error!("Rejected show start time {:?}: {}", form.start_time, e);
            return Json(OutcomeResponse::failed(
                "Sorry, an error occurred. Show could not be listed.".to_string(),
            ));
        }
    };

    match state
        .store
        .create_show(form.venue_id, form.artist_id, start_time)
        .await
    {
        Ok(id) => {
            info!(
                "Created show {} (venue {}, artist {})",
                id, form.venue_id, form.artist_id
            );
            Json(OutcomeResponse::ok("Show was successfully listed!".to_string()))
        }
        Err(e) => {
            error!("Failed to create show: {}", e);
            Json(OutcomeResponse::failed(
                "Sorry, an error occurred. Show could not be listed.".to_string(),
            ))
        }
    }
}

/// GET /shows/:id/del
///
/// Delete one show; nothing references shows, so no cascade.
pub async fn delete_show(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Json<OutcomeResponse> {
    match state.store.delete_show(id).await {
        Ok(()) => {
            info!("Deleted show {}", id);
            Json(OutcomeResponse::ok("Show was successfully deleted!".to_string()))
        }
        Err(e) => {
            error!("Failed to delete show {}: {}", id, e);
            Json(OutcomeResponse::failed(
                "Sorry, an error occurred. Show could not be deleted.".to_string(),
            ))
        }
    }
}
