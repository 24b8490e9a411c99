//! Artist handlers
//!
//! Mirrors the venue handlers: flat listing instead of city grouping, and
//! seeking_venue in place of seeking_talent. Search and the past/upcoming
//! boundary behave identically.

use axum::{
    extract::{Path, State},
    Form, Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use showbill_common::db::models::{
    partition_shows, Artist, ArtistShow, EntityRef, NewArtist, SearchMatch,
};

use crate::api::venues::SearchForm;
use crate::api::{split_genres, ApiError, OutcomeResponse};
use crate::AppState;

/// Artist create/edit form payload. `genres` arrives comma-separated.
#[derive(Debug, Deserialize)]
pub struct ArtistForm {
    pub name: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub phone: Option<String>,
    pub genres: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_venue: Option<String>,
    pub seeking_description: Option<String>,
}

impl From<ArtistForm> for NewArtist {
    fn from(form: ArtistForm) -> Self {
        NewArtist {
            name: form.name,
            city: form.city,
            state: form.state,
            phone: form.phone,
            genres: split_genres(form.genres),
            image_link: form.image_link,
            facebook_link: form.facebook_link,
            website: form.website,
            seeking_venue: form.seeking_venue,
            seeking_description: form.seeking_description,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ArtistListResponse {
    pub artists: Vec<EntityRef>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub count: usize,
    pub data: Vec<SearchMatch>,
    pub search_term: String,
}

/// Artist detail with its shows partitioned around the request instant
#[derive(Debug, Serialize)]
pub struct ArtistDetailResponse {
    #[serde(flatten)]
    pub artist: Artist,
    pub past_shows: Vec<ArtistShow>,
    pub upcoming_shows: Vec<ArtistShow>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

/// GET /artists
///
/// Flat (id, name) listing of every artist.
pub async fn list_artists(
    State(state): State<AppState>,
) -> Result<Json<ArtistListResponse>, ApiError> {
    let artists = state.store.artist_refs().await?;
    Ok(Json(ArtistListResponse { artists }))
}

/// POST /artists/search
///
/// Case-insensitive substring search on artist name.
pub async fn search_artists(
    State(state): State<AppState>,
    Form(form): Form<SearchForm>,
) -> Result<Json<SearchResponse>, ApiError> {
    let data = state
        .store
        .search_artists(&form.search_term, Utc::now())
        .await?;

    Ok(Json(SearchResponse {
        count: data.len(),
        data,
        search_term: form.search_term,
    }))
}

/// GET /artists/:id
///
/// One artist with their shows split into past and upcoming.
pub async fn artist_detail(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ArtistDetailResponse>, ApiError> {
    let artist = state.store.artist(id).await?;
    let shows = state.store.shows_for_artist(id).await?;

    let (past_shows, upcoming_shows) = partition_shows(shows, Utc::now());

    Ok(Json(ArtistDetailResponse {
        artist,
        past_shows_count: past_shows.len(),
        upcoming_shows_count: upcoming_shows.len(),
        past_shows,
        upcoming_shows,
    }))
}

/// POST /artists/create
///
/// Insert one artist.
pub async fn create_artist(
    State(state): State<AppState>,
    Form(form): Form<ArtistForm>,
) -> Json<OutcomeResponse> {
    let name = form.name.clone();
    let artist = NewArtist::from(form);

    match state.store.create_artist(&artist).await {
        Ok(id) => {
            info!("Created artist {} ({})", id, name);
            Json(OutcomeResponse::ok(format!(
                "Artist {} was successfully listed!",
                name
            )))
        }
        Err(e) => {
            error!("Failed to create artist {}: {}", name, e);
            Json(OutcomeResponse::failed(format!(
                "Sorry, an error occurred. Artist {} could not be added.",
                name
            )))
        }
    }
}

/// GET /artists/:id/edit
///
/// Current values for the edit form.
pub async fn edit_artist(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Artist>, ApiError> {
    Ok(Json(state.store.artist(id).await?))
}

/// POST /artists/:id/edit
///
/// Apply an attribute-map update filtered by id.
pub async fn update_artist(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<ArtistForm>,
) -> Json<OutcomeResponse> {
    let name = form.name.clone();
    let artist = NewArtist::from(form);

    match state.store.update_artist(id, &artist).await {
        Ok(()) => {
            info!("Updated artist {} ({})", id, name);
            Json(OutcomeResponse::ok(format!(
                "Artist {} was successfully updated!",
                name
            )))
        }
        Err(e) => {
            error!("Failed to update artist {}: {}", id, e);
            Json(OutcomeResponse::failed(format!(
                "Sorry, an error occurred. Artist {} could not be updated.",
                name
            )))
        }
    }
}

/// GET /artists/:id/del
///
/// Delete the artist and every show booking them, in one transaction.
pub async fn delete_artist(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Json<OutcomeResponse> {
    match state.store.delete_artist(id).await {
        Ok(()) => {
            info!("Deleted artist {} and their shows", id);
            Json(OutcomeResponse::ok(
                "Artist was successfully deleted!".to_string(),
            ))
        }
        Err(e) => {
            error!("Failed to delete artist {}: {}", id, e);
            Json(OutcomeResponse::failed(
                "Sorry, an error occurred. The artist you selected cannot be deleted.".to_string(),
            ))
        }
    }
}
