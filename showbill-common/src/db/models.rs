//! Database models and view shapes
//!
//! The `Venue`/`Artist`/`Show` structs mirror the tables; the remaining
//! types are the denormalized shapes the list and detail pages consume.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A place that can host shows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Venue {
    pub id: i64,
    pub name: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub genres: Vec<String>,
    pub website: Option<String>,
    pub seeking_talent: Option<String>,
    pub seeking_description: Option<String>,
}

/// Venue attributes as submitted by the create/edit forms
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewVenue {
    pub name: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub genres: Vec<String>,
    pub website: Option<String>,
    pub seeking_talent: Option<String>,
    pub seeking_description: Option<String>,
}

/// A performer that can be booked into shows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artist {
    pub id: i64,
    pub name: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub phone: Option<String>,
    pub genres: Vec<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_venue: Option<String>,
    pub seeking_description: Option<String>,
}

/// Artist attributes as submitted by the create/edit forms
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewArtist {
    pub name: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub phone: Option<String>,
    pub genres: Vec<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_venue: Option<String>,
    pub seeking_description: Option<String>,
}

/// A scheduled linking of one artist to one venue at a start time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Show {
    pub id: i64,
    pub start_time: DateTime<Utc>,
    pub venue_id: i64,
    pub artist_id: i64,
}

/// (id, name) pair used by grouped listings and choice lists
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityRef {
    pub id: i64,
    pub name: String,
}

/// Venues sharing one (city, state)
#[derive(Debug, Clone, Serialize)]
pub struct CityGroup {
    pub city: Option<String>,
    pub state: Option<String>,
    pub venues: Vec<EntityRef>,
}

/// A name-search match with its upcoming-show count
#[derive(Debug, Clone, Serialize)]
pub struct SearchMatch {
    pub id: i64,
    pub name: String,
    pub num_upcoming_shows: i64,
}

/// A show on a venue's detail page, with the booked artist denormalized
#[derive(Debug, Clone, Serialize)]
pub struct VenueShow {
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

/// A show on an artist's detail page, with the hosting venue denormalized
#[derive(Debug, Clone, Serialize)]
pub struct ArtistShow {
    pub venue_id: i64,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

/// A row of the flat all-shows listing
#[derive(Debug, Clone, Serialize)]
pub struct ShowListing {
    pub show_id: i64,
    pub venue_id: i64,
    pub venue_name: String,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

/// Anything classifiable as past or upcoming relative to an instant
pub trait Scheduled {
    fn start_time(&self) -> DateTime<Utc>;
}

impl Scheduled for VenueShow {
    fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }
}

impl Scheduled for ArtistShow {
    fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }
}

/// Partition shows into (past, upcoming) around `now`.
///
/// A show strictly before `now` is past; a show at exactly `now` counts as
/// upcoming.
pub fn partition_shows<S: Scheduled>(shows: Vec<S>, now: DateTime<Utc>) -> (Vec<S>, Vec<S>) {
    let mut past = Vec::new();
    let mut upcoming = Vec::new();
    for show in shows {
        if show.start_time() < now {
            past.push(show);
        } else {
            upcoming.push(show);
        }
    }
    (past, upcoming)
}
