//! Data-access context for the booking tables
//!
//! `Store` wraps the connection pool and is handed to each request handler,
//! so nothing reaches the database through hidden global state. Every method
//! returns `Result` and leaves presentation to the caller. Listings that
//! denormalize across tables run as single JOIN queries rather than a query
//! per row.

use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};

use crate::db::models::{
    Artist, ArtistShow, CityGroup, EntityRef, NewArtist, NewVenue, SearchMatch, ShowListing,
    Venue, VenueShow,
};
use crate::time::{format_timestamp, parse_timestamp};
use crate::{Error, Result};

/// Serialize a genre list into its JSON text column form
fn encode_genres(genres: &[String]) -> Result<String> {
    serde_json::to_string(genres).map_err(|e| Error::Internal(format!("genre encoding: {}", e)))
}

/// Deserialize a genres column; NULL or malformed text reads as empty
fn decode_genres(text: Option<String>) -> Vec<String> {
    text.and_then(|t| serde_json::from_str(&t).ok())
        .unwrap_or_default()
}

/// Data-access context, cloned cheaply into each handler
#[derive(Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    // ------------------------------------------------------------------
    // Venues
    // ------------------------------------------------------------------

    /// Insert one venue, returning its new id
    pub async fn create_venue(&self, venue: &NewVenue) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO venues
                (name, city, state, address, phone, image_link, facebook_link,
                 genres, website, seeking_talent, seeking_description)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&venue.name)
        .bind(&venue.city)
        .bind(&venue.state)
        .bind(&venue.address)
        .bind(&venue.phone)
        .bind(&venue.image_link)
        .bind(&venue.facebook_link)
        .bind(encode_genres(&venue.genres)?)
        .bind(&venue.website)
        .bind(&venue.seeking_talent)
        .bind(&venue.seeking_description)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Fetch one venue by id
    pub async fn venue(&self, id: i64) -> Result<Venue> {
        let row = sqlx::query(
            r#"
            SELECT id, name, city, state, address, phone, image_link,
                   facebook_link, genres, website, seeking_talent,
                   seeking_description
            FROM venues WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("venue {}", id)))?;

        Ok(Venue {
            id: row.get(0),
            name: row.get(1),
            city: row.get(2),
            state: row.get(3),
            address: row.get(4),
            phone: row.get(5),
            image_link: row.get(6),
            facebook_link: row.get(7),
            genres: decode_genres(row.get(8)),
            website: row.get(9),
            seeking_talent: row.get(10),
            seeking_description: row.get(11),
        })
    }

    /// All venues grouped by (city, state), in natural table order within
    /// each group
    pub async fn venues_grouped(&self) -> Result<Vec<CityGroup>> {
        let rows = sqlx::query_as::<_, (i64, String, Option<String>, Option<String>)>(
            "SELECT id, name, city, state FROM venues ORDER BY city, state, id",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut groups: Vec<CityGroup> = Vec::new();
        for (id, name, city, state) in rows {
            let matches_last = groups
                .last()
                .map(|g: &CityGroup| g.city == city && g.state == state)
                .unwrap_or(false);
            if !matches_last {
                groups.push(CityGroup {
                    city,
                    state,
                    venues: Vec::new(),
                });
            }
            if let Some(group) = groups.last_mut() {
                group.venues.push(EntityRef { id, name });
            }
        }

        Ok(groups)
    }

    /// Case-insensitive substring search on venue name, with each match's
    /// count of shows starting strictly after `now`
    pub async fn search_venues(&self, term: &str, now: DateTime<Utc>) -> Result<Vec<SearchMatch>> {
        self.search_entities("venues", "venue_id", term, now).await
    }

    /// All shows at one venue with the booked artist denormalized
    pub async fn shows_for_venue(&self, venue_id: i64) -> Result<Vec<VenueShow>> {
        let rows = sqlx::query_as::<_, (i64, String, Option<String>, String)>(
            r#"
            SELECT s.artist_id, a.name, a.image_link, s.start_time
            FROM shows s
            JOIN artists a ON a.id = s.artist_id
            WHERE s.venue_id = ?
            ORDER BY s.start_time
            "#,
        )
        .bind(venue_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|(artist_id, artist_name, artist_image_link, start_time)| {
                Ok(VenueShow {
                    artist_id,
                    artist_name,
                    artist_image_link,
                    start_time: parse_timestamp(&start_time)?,
                })
            })
            .collect()
    }

    /// Apply an attribute-map update filtered by id. Updating an id that
    /// matches zero rows is not an error.
    pub async fn update_venue(&self, id: i64, venue: &NewVenue) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE venues SET
                name = ?, city = ?, state = ?, address = ?, phone = ?,
                image_link = ?, facebook_link = ?, genres = ?, website = ?,
                seeking_talent = ?, seeking_description = ?,
                updated_at = CURRENT_TIMESTAMP
            WHERE id = ?
            "#,
        )
        .bind(&venue.name)
        .bind(&venue.city)
        .bind(&venue.state)
        .bind(&venue.address)
        .bind(&venue.phone)
        .bind(&venue.image_link)
        .bind(&venue.facebook_link)
        .bind(encode_genres(&venue.genres)?)
        .bind(&venue.website)
        .bind(&venue.seeking_talent)
        .bind(&venue.seeking_description)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Delete a venue and every show booked at it, in one transaction
    pub async fn delete_venue(&self, id: i64) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM shows WHERE venue_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM venues WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    /// (id, name) pairs for every venue, for the show-form choice list
    pub async fn venue_refs(&self) -> Result<Vec<EntityRef>> {
        let rows = sqlx::query_as::<_, (i64, String)>("SELECT id, name FROM venues ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(id, name)| EntityRef { id, name })
            .collect())
    }

    // ------------------------------------------------------------------
    // Artists
    // ------------------------------------------------------------------

    /// Insert one artist, returning its new id
    pub async fn create_artist(&self, artist: &NewArtist) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO artists
                (name, city, state, phone, genres, image_link, facebook_link,
                 website, seeking_venue, seeking_description)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&artist.name)
        .bind(&artist.city)
        .bind(&artist.state)
        .bind(&artist.phone)
        .bind(encode_genres(&artist.genres)?)
        .bind(&artist.image_link)
        .bind(&artist.facebook_link)
        .bind(&artist.website)
        .bind(&artist.seeking_venue)
        .bind(&artist.seeking_description)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Fetch one artist by id
    pub async fn artist(&self, id: i64) -> Result<Artist> {
        let row = sqlx::query(
            r#"
            SELECT id, name, city, state, phone, genres, image_link,
                   facebook_link, website, seeking_venue, seeking_description
            FROM artists WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("artist {}", id)))?;

        Ok(Artist {
            id: row.get(0),
            name: row.get(1),
            city: row.get(2),
            state: row.get(3),
            phone: row.get(4),
            genres: decode_genres(row.get(5)),
            image_link: row.get(6),
            facebook_link: row.get(7),
            website: row.get(8),
            seeking_venue: row.get(9),
            seeking_description: row.get(10),
        })
    }

    /// (id, name) pairs for every artist: the flat artist listing and the
    /// show-form choice list
    pub async fn artist_refs(&self) -> Result<Vec<EntityRef>> {
        let rows = sqlx::query_as::<_, (i64, String)>("SELECT id, name FROM artists ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(id, name)| EntityRef { id, name })
            .collect())
    }

    /// Case-insensitive substring search on artist name
    pub async fn search_artists(&self, term: &str, now: DateTime<Utc>) -> Result<Vec<SearchMatch>> {
        self.search_entities("artists", "artist_id", term, now).await
    }

    /// All shows an artist is booked into, with the hosting venue
    /// denormalized
    pub async fn shows_for_artist(&self, artist_id: i64) -> Result<Vec<ArtistShow>> {
        let rows = sqlx::query_as::<_, (i64, String, Option<String>, String)>(
            r#"
            SELECT s.venue_id, v.name, v.image_link, s.start_time
            FROM shows s
            JOIN venues v ON v.id = s.venue_id
            WHERE s.artist_id = ?
            ORDER BY s.start_time
            "#,
        )
        .bind(artist_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|(venue_id, venue_name, venue_image_link, start_time)| {
                Ok(ArtistShow {
                    venue_id,
                    venue_name,
                    venue_image_link,
                    start_time: parse_timestamp(&start_time)?,
                })
            })
            .collect()
    }

    /// Apply an attribute-map update filtered by id
    pub async fn update_artist(&self, id: i64, artist: &NewArtist) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE artists SET
                name = ?, city = ?, state = ?, phone = ?, genres = ?,
                image_link = ?, facebook_link = ?, website = ?,
                seeking_venue = ?, seeking_description = ?,
                updated_at = CURRENT_TIMESTAMP
            WHERE id = ?
            "#,
        )
        .bind(&artist.name)
        .bind(&artist.city)
        .bind(&artist.state)
        .bind(&artist.phone)
        .bind(encode_genres(&artist.genres)?)
        .bind(&artist.image_link)
        .bind(&artist.facebook_link)
        .bind(&artist.website)
        .bind(&artist.seeking_venue)
        .bind(&artist.seeking_description)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Delete an artist and every show booking it, in one transaction
    pub async fn delete_artist(&self, id: i64) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM shows WHERE artist_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM artists WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Shows
    // ------------------------------------------------------------------

    /// Insert one show. The foreign-key constraints reject ids that do not
    /// reference existing venue/artist rows.
    pub async fn create_show(
        &self,
        venue_id: i64,
        artist_id: i64,
        start_time: DateTime<Utc>,
    ) -> Result<i64> {
        let result = sqlx::query(
            "INSERT INTO shows (start_time, venue_id, artist_id) VALUES (?, ?, ?)",
        )
        .bind(format_timestamp(start_time))
        .bind(venue_id)
        .bind(artist_id)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// The flat all-shows listing, both sides denormalized in one query
    pub async fn shows_all(&self) -> Result<Vec<ShowListing>> {
        let rows = sqlx::query_as::<_, (i64, i64, String, i64, String, Option<String>, String)>(
            r#"
            SELECT s.id, s.venue_id, v.name, s.artist_id, a.name,
                   a.image_link, s.start_time
            FROM shows s
            JOIN venues v ON v.id = s.venue_id
            JOIN artists a ON a.id = s.artist_id
            ORDER BY s.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(
                |(show_id, venue_id, venue_name, artist_id, artist_name, artist_image_link, ts)| {
                    Ok(ShowListing {
                        show_id,
                        venue_id,
                        venue_name,
                        artist_id,
                        artist_name,
                        artist_image_link,
                        start_time: parse_timestamp(&ts)?,
                    })
                },
            )
            .collect()
    }

    /// Delete one show by id; nothing references shows, so no cascade
    pub async fn delete_show(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM shows WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    // ------------------------------------------------------------------

    /// Shared body of venue/artist search: substring match on name plus a
    /// per-match count of shows starting strictly after `now`, in a single
    /// LEFT JOIN so no per-row queries are issued.
    async fn search_entities(
        &self,
        table: &str,
        fk_column: &str,
        term: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<SearchMatch>> {
        let sql = format!(
            r#"
            SELECT e.id, e.name,
                   COUNT(CASE WHEN s.start_time > ?2 THEN 1 END)
            FROM {table} e
            LEFT JOIN shows s ON s.{fk_column} = e.id
            WHERE LOWER(e.name) LIKE ?1
            GROUP BY e.id, e.name
            ORDER BY e.id
            "#
        );

        let pattern = format!("%{}%", term.to_lowercase());
        let rows = sqlx::query_as::<_, (i64, String, i64)>(&sql)
            .bind(pattern)
            .bind(format_timestamp(now))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(id, name, num_upcoming_shows)| SearchMatch {
                id,
                name,
                num_upcoming_shows,
            })
            .collect())
    }
}
