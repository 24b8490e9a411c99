//! Venue handlers
//!
//! Listing groups venues by (city, state); search is a case-insensitive
//! substring match on name; the detail page partitions the venue's shows
//! into past and upcoming around the request instant.

use axum::{
    extract::{Path, State},
    Form, Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use showbill_common::db::models::{
    partition_shows, CityGroup, NewVenue, SearchMatch, Venue, VenueShow,
};

use crate::api::{split_genres, ApiError, OutcomeResponse};
use crate::AppState;

/// Venue create/edit form payload. `genres` arrives comma-separated.
#[derive(Debug, Deserialize)]
pub struct VenueForm {
    pub name: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub genres: Option<String>,
    pub website: Option<String>,
    pub seeking_talent: Option<String>,
    pub seeking_description: Option<String>,
}

impl From<VenueForm> for NewVenue {
    fn from(form: VenueForm) -> Self {
        NewVenue {
            name: form.name,
            city: form.city,
            state: form.state,
            address: form.address,
            phone: form.phone,
            image_link: form.image_link,
            facebook_link: form.facebook_link,
            genres: split_genres(form.genres),
            website: form.website,
            seeking_talent: form.seeking_talent,
            seeking_description: form.seeking_description,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub search_term: String,
}

#[derive(Debug, Serialize)]
pub struct VenueListResponse {
    pub areas: Vec<CityGroup>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub count: usize,
    pub data: Vec<SearchMatch>,
    pub search_term: String,
}

/// Venue detail with its shows partitioned around the request instant
#[derive(Debug, Serialize)]
pub struct VenueDetailResponse {
    #[serde(flatten)]
    pub venue: Venue,
    pub past_shows: Vec<VenueShow>,
    pub upcoming_shows: Vec<VenueShow>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

/// GET /venues
///
/// All venues grouped by (city, state).
pub async fn list_venues(
    State(state): State<AppState>,
) -> Result<Json<VenueListResponse>, ApiError> {
    let areas = state.store.venues_grouped().await?;
    Ok(Json(VenueListResponse { areas }))
}

/// POST /venues/search
///
/// Case-insensitive substring search on venue name. Each match carries the
/// count of its shows starting strictly after now.
pub async fn search_venues(
    State(state): State<AppState>,
    Form(form): Form<SearchForm>,
) -> Result<Json<SearchResponse>, ApiError> {
    let data = state
        .store
        .search_venues(&form.search_term, Utc::now())
        .await?;

    Ok(Json(SearchResponse {
        count: data.len(),
        data,
        search_term: form.search_term,
    }))
}

/// GET /venues/:id
///
/// One venue with its shows split into past and upcoming. A show starting
/// at exactly now is upcoming.
pub async fn venue_detail(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<VenueDetailResponse>, ApiError> {
    let venue = state.store.venue(id).await?;
    let shows = state.store.shows_for_venue(id).await?;

    let (past_shows, upcoming_shows) = partition_shows(shows, Utc::now());

    Ok(Json(VenueDetailResponse {
        venue,
        past_shows_count: past_shows.len(),
        upcoming_shows_count: upcoming_shows.len(),
        past_shows,
        upcoming_shows,
    }))
}

/// POST /venues/create
///
/// Insert one venue. Persistence failures are reported as a generic
/// message and the change is discarded.
pub async fn create_venue(
    State(state): State<AppState>,
    Form(form): Form<VenueForm>,
) -> Json<OutcomeResponse> {
    let name = form.name.clone();
    let venue = NewVenue::from(form);

    match state.store.create_venue(&venue).await {
        Ok(id) => {
            info!("Created venue {} ({})", id, name);
            Json(OutcomeResponse::ok(format!(
                "Venue {} was successfully listed!",
                name
            )))
        }
        Err(e) => {
            error!("Failed to create venue {}: {}", name, e);
            Json(OutcomeResponse::failed(format!(
                "Sorry, an error occurred. Venue {} could not be added.",
                name
            )))
        }
    }
}

/// GET /venues/:id/edit
///
/// Current values for the edit form.
pub async fn edit_venue(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Venue>, ApiError> {
    Ok(Json(state.store.venue(id).await?))
}

/// POST /venues/:id/edit
///
/// Apply an attribute-map update filtered by id.
pub async fn update_venue(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<VenueForm>,
) -> Json<OutcomeResponse> {
    let name = form.name.clone();
    let venue = NewVenue::from(form);

    match state.store.update_venue(id, &venue).await {
        Ok(()) => {
            info!("Updated venue {} ({})", id, name);
            Json(OutcomeResponse::ok(format!(
                "Venue {} was successfully updated!",
                name
            )))
        }
        Err(e) => {
            error!("Failed to update venue {}: {}", id, e);
            Json(OutcomeResponse::failed(format!(
                "Sorry, an error occurred. Venue {} could not be updated.",
                name
            )))
        }
    }
}

/// GET /venues/:id/del
///
/// Delete the venue and every show booked at it, in one transaction.
pub async fn delete_venue(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Json<OutcomeResponse> {
    match state.store.delete_venue(id).await {
        Ok(()) => {
            info!("Deleted venue {} and its shows", id);
            Json(OutcomeResponse::ok(
                "Venue was successfully deleted!".to_string(),
            ))
        }
        Err(e) => {
            error!("Failed to delete venue {}: {}", id, e);
            Json(OutcomeResponse::failed(
                "Sorry, an error occurred. The venue you selected cannot be deleted.".to_string(),
            ))
        }
    }
}
