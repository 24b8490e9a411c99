//! Integration tests for the showbill-web HTTP surface
//!
//! Each test builds the full router over a private in-memory database and
//! drives it with `tower::ServiceExt::oneshot`. Form bodies are sent
//! urlencoded, the way the pages submit them.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::util::ServiceExt; // for `oneshot` method

use showbill_common::db::{init_memory_database, Store};
use showbill_web::{build_router, AppState};

/// Test helper: app over a fresh in-memory database
async fn setup_app() -> Router {
    let pool = init_memory_database()
        .await
        .expect("Should create in-memory database");
    build_router(AppState::new(Store::new(pool)))
}

/// Test helper: GET request
fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Test helper: urlencoded form POST
fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Test helper: extract JSON body from response
async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

/// Test helper: create a venue through the API, asserting success
async fn create_venue(app: &Router, body: &str) {
    let response = app
        .clone()
        .oneshot(post_form("/venues/create", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = extract_json(response.into_body()).await;
    assert_eq!(json["success"], true);
}

/// Test helper: create an artist through the API, asserting success
async fn create_artist(app: &Router, body: &str) {
    let response = app
        .clone()
        .oneshot(post_form("/artists/create", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = extract_json(response.into_body()).await;
    assert_eq!(json["success"], true);
}

// =============================================================================
// Health and static pages
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let app = setup_app().await;

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "showbill-web");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_home_page() {
    let app = setup_app().await;

    let response = app.oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("Showbill"));
}

#[tokio::test]
async fn test_unknown_route_renders_404_page() {
    let app = setup_app().await;

    let response = app.oneshot(get("/no/such/page")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("404"));
}

#[tokio::test]
async fn test_create_form_pages_are_served() {
    let app = setup_app().await;

    for uri in ["/venues/create", "/artists/create"] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}

// =============================================================================
// Venues
// =============================================================================

#[tokio::test]
async fn test_create_venue_round_trip() {
    let app = setup_app().await;

    create_venue(
        &app,
        "name=The+Musical+Hop&city=San+Francisco&state=CA\
         &address=1015+Folsom+Street&phone=123-123-1234\
         &genres=Jazz,Reggae,Swing&website=https://themusicalhop.com\
         &facebook_link=https://facebook.com/themusicalhop\
         &image_link=https://example.com/hop.jpg\
         &seeking_talent=Yes&seeking_description=Looking+for+local+acts",
    )
    .await;

    let response = app.oneshot(get("/venues/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["id"], 1);
    assert_eq!(body["name"], "The Musical Hop");
    assert_eq!(body["city"], "San Francisco");
    assert_eq!(body["state"], "CA");
    assert_eq!(body["address"], "1015 Folsom Street");
    assert_eq!(body["phone"], "123-123-1234");
    assert_eq!(body["website"], "https://themusicalhop.com");
    assert_eq!(body["facebook_link"], "https://facebook.com/themusicalhop");
    assert_eq!(body["image_link"], "https://example.com/hop.jpg");
    assert_eq!(body["seeking_talent"], "Yes");
    assert_eq!(body["seeking_description"], "Looking for local acts");
    assert_eq!(
        body["genres"],
        serde_json::json!(["Jazz", "Reggae", "Swing"])
    );
    assert_eq!(body["past_shows_count"], 0);
    assert_eq!(body["upcoming_shows_count"], 0);
}

#[tokio::test]
async fn test_venue_detail_not_found() {
    let app = setup_app().await;

    let response = app.oneshot(get("/venues/42")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_venues_grouped_by_city() {
    let app = setup_app().await;

    create_venue(&app, "name=The+Musical+Hop&city=San+Francisco&state=CA").await;
    create_venue(
        &app,
        "name=Park+Square+Live+Music+%26+Coffee&city=San+Francisco&state=CA",
    )
    .await;
    create_venue(&app, "name=The+Dueling+Pianos+Bar&city=New+York&state=NY").await;

    let response = app.oneshot(get("/venues")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    let areas = body["areas"].as_array().unwrap();
    assert_eq!(areas.len(), 2);

    let sf = areas
        .iter()
        .find(|a| a["city"] == "San Francisco")
        .expect("San Francisco group");
    assert_eq!(sf["state"], "CA");
    assert_eq!(sf["venues"].as_array().unwrap().len(), 2);

    let ny = areas
        .iter()
        .find(|a| a["city"] == "New York")
        .expect("New York group");
    assert_eq!(ny["venues"].as_array().unwrap().len(), 1);
    assert_eq!(ny["venues"][0]["name"], "The Dueling Pianos Bar");
}

#[tokio::test]
async fn test_venue_search_substring_case_insensitive() {
    let app = setup_app().await;

    create_venue(&app, "name=The+Musical+Hop&city=San+Francisco&state=CA").await;
    create_venue(
        &app,
        "name=Park+Square+Live+Music+%26+Coffee&city=San+Francisco&state=CA",
    )
    .await;

    let response = app
        .clone()
        .oneshot(post_form("/venues/search", "search_term=Hop"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["name"], "The Musical Hop");
    assert_eq!(body["search_term"], "Hop");

    let response = app
        .clone()
        .oneshot(post_form("/venues/search", "search_term=music"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["count"], 2);

    let response = app
        .oneshot(post_form("/venues/search", "search_term=Opera"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn test_edit_venue_returns_current_values() {
    let app = setup_app().await;

    create_venue(&app, "name=The+Musical+Hop&city=San+Francisco&state=CA").await;

    let response = app.clone().oneshot(get("/venues/1/edit")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["name"], "The Musical Hop");

    let response = app.oneshot(get("/venues/9/edit")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_venue() {
    let app = setup_app().await;

    create_venue(&app, "name=The+Musical+Hop&city=San+Francisco&state=CA").await;

    let response = app
        .clone()
        .oneshot(post_form(
            "/venues/1/edit",
            "name=The+Musical+Hop+Annex&city=Oakland&state=CA&genres=Jazz",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["success"], true);

    let response = app.oneshot(get("/venues/1")).await.unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["name"], "The Musical Hop Annex");
    assert_eq!(body["city"], "Oakland");
    assert_eq!(body["genres"], serde_json::json!(["Jazz"]));
}

#[tokio::test]
async fn test_delete_venue_cascades_to_shows() {
    let app = setup_app().await;

    create_venue(&app, "name=The+Musical+Hop&city=San+Francisco&state=CA").await;
    create_artist(&app, "name=Guns+N+Petals&city=San+Francisco&state=CA").await;

    let response = app
        .clone()
        .oneshot(post_form(
            "/shows/create",
            "venue_id=1&artist_id=1&start_time=2026-09-01+20:00:00",
        ))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["success"], true);

    let response = app.clone().oneshot(get("/venues/1/del")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["success"], true);

    // the venue is gone
    let response = app.clone().oneshot(get("/venues/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // and so is its show
    let response = app.oneshot(get("/shows")).await.unwrap();
    let body = extract_json(response.into_body()).await;
    assert!(body["shows"].as_array().unwrap().is_empty());
}

// =============================================================================
// Artists
// =============================================================================

#[tokio::test]
async fn test_artist_round_trip_and_listing() {
    let app = setup_app().await;

    create_artist(
        &app,
        "name=Guns+N+Petals&city=San+Francisco&state=CA&phone=326-123-5000\
         &genres=Rock+n+Roll&image_link=https://example.com/gnp.jpg\
         &seeking_venue=Yes&seeking_description=Looking+for+shows",
    )
    .await;

    let response = app.clone().oneshot(get("/artists/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["name"], "Guns N Petals");
    assert_eq!(body["genres"], serde_json::json!(["Rock n Roll"]));
    assert_eq!(body["seeking_venue"], "Yes");

    let response = app.oneshot(get("/artists")).await.unwrap();
    let body = extract_json(response.into_body()).await;
    let artists = body["artists"].as_array().unwrap();
    assert_eq!(artists.len(), 1);
    assert_eq!(artists[0]["name"], "Guns N Petals");
}

#[tokio::test]
async fn test_artist_search() {
    let app = setup_app().await;

    create_artist(&app, "name=Guns+N+Petals&city=San+Francisco&state=CA").await;
    create_artist(&app, "name=Matt+Quevedo&city=New+York&state=NY").await;
    create_artist(&app, "name=The+Wild+Sax+Band&city=San+Francisco&state=CA").await;

    let response = app
        .clone()
        .oneshot(post_form("/artists/search", "search_term=band"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["name"], "The Wild Sax Band");

    let response = app
        .oneshot(post_form("/artists/search", "search_term=a"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["count"], 3);
}

#[tokio::test]
async fn test_update_artist_reflects_once() {
    let app = setup_app().await;

    create_artist(&app, "name=Guns+N+Petals&city=San+Francisco&state=CA").await;

    let response = app
        .clone()
        .oneshot(post_form("/artists/1/edit", "name=The+Wild+Sax+Band"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["success"], true);

    let response = app.oneshot(get("/artists")).await.unwrap();
    let body = extract_json(response.into_body()).await;
    let artists = body["artists"].as_array().unwrap();
    assert_eq!(artists.len(), 1);
    assert_eq!(artists[0]["name"], "The Wild Sax Band");
}

#[tokio::test]
async fn test_delete_artist_cascades_to_shows() {
    let app = setup_app().await;

    create_venue(&app, "name=The+Musical+Hop&city=San+Francisco&state=CA").await;
    create_artist(&app, "name=Guns+N+Petals&city=San+Francisco&state=CA").await;

    let response = app
        .clone()
        .oneshot(post_form(
            "/shows/create",
            "venue_id=1&artist_id=1&start_time=2026-09-01+20:00:00",
        ))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["success"], true);

    let response = app.clone().oneshot(get("/artists/1/del")).await.unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["success"], true);

    let response = app.clone().oneshot(get("/artists/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.oneshot(get("/shows")).await.unwrap();
    let body = extract_json(response.into_body()).await;
    assert!(body["shows"].as_array().unwrap().is_empty());
}

// =============================================================================
// Shows
// =============================================================================

#[tokio::test]
async fn test_show_form_choice_lists() {
    let app = setup_app().await;

    create_venue(&app, "name=The+Musical+Hop&city=San+Francisco&state=CA").await;
    create_artist(&app, "name=Guns+N+Petals&city=San+Francisco&state=CA").await;

    let response = app.oneshot(get("/shows/create")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["venues"][0]["id"], 1);
    assert_eq!(body["venues"][0]["label"], "(id: 1), Name: The Musical Hop");
    assert_eq!(body["artists"][0]["label"], "(id: 1), Name: Guns N Petals");
}

#[tokio::test]
async fn test_show_listing_denormalizes_both_sides() {
    let app = setup_app().await;

    create_venue(&app, "name=The+Musical+Hop&city=San+Francisco&state=CA").await;
    create_artist(
        &app,
        "name=Guns+N+Petals&image_link=https://example.com/gnp.jpg",
    )
    .await;

    let response = app
        .clone()
        .oneshot(post_form(
            "/shows/create",
            "venue_id=1&artist_id=1&start_time=2026-09-01T20:00:00Z",
        ))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["success"], true);

    let response = app.oneshot(get("/shows")).await.unwrap();
    let body = extract_json(response.into_body()).await;
    let shows = body["shows"].as_array().unwrap();
    assert_eq!(shows.len(), 1);
    assert_eq!(shows[0]["show_id"], 1);
    assert_eq!(shows[0]["venue_name"], "The Musical Hop");
    assert_eq!(shows[0]["artist_name"], "Guns N Petals");
    assert_eq!(shows[0]["artist_image_link"], "https://example.com/gnp.jpg");
}

#[tokio::test]
async fn test_show_with_dangling_references_is_rejected() {
    let app = setup_app().await;

    let response = app
        .clone()
        .oneshot(post_form(
            "/shows/create",
            "venue_id=7&artist_id=9&start_time=2026-09-01+20:00:00",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["success"], false);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("Show could not be listed"));

    let response = app.oneshot(get("/shows")).await.unwrap();
    let body = extract_json(response.into_body()).await;
    assert!(body["shows"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_show_with_bad_start_time_is_rejected() {
    let app = setup_app().await;

    create_venue(&app, "name=The+Musical+Hop&city=San+Francisco&state=CA").await;
    create_artist(&app, "name=Guns+N+Petals").await;

    let response = app
        .clone()
        .oneshot(post_form(
            "/shows/create",
            "venue_id=1&artist_id=1&start_time=next+tuesday",
        ))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["success"], false);

    let response = app.oneshot(get("/shows")).await.unwrap();
    let body = extract_json(response.into_body()).await;
    assert!(body["shows"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_past_and_upcoming_partition() {
    let app = setup_app().await;

    create_venue(&app, "name=The+Musical+Hop&city=San+Francisco&state=CA").await;
    create_artist(&app, "name=Guns+N+Petals").await;

    // one show far in the past, one far in the future
    for start in ["2001-01-01T20:00:00Z", "2101-01-01T20:00:00Z"] {
        let response = app
            .clone()
            .oneshot(post_form(
                "/shows/create",
                &format!("venue_id=1&artist_id=1&start_time={}", start),
            ))
            .await
            .unwrap();
        let body = extract_json(response.into_body()).await;
        assert_eq!(body["success"], true);
    }

    let response = app.clone().oneshot(get("/venues/1")).await.unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["past_shows_count"], 1);
    assert_eq!(body["upcoming_shows_count"], 1);
    assert_eq!(body["past_shows"][0]["artist_name"], "Guns N Petals");

    let response = app.oneshot(get("/artists/1")).await.unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["past_shows_count"], 1);
    assert_eq!(body["upcoming_shows_count"], 1);
    assert_eq!(body["upcoming_shows"][0]["venue_name"], "The Musical Hop");
}

#[tokio::test]
async fn test_delete_show() {
    let app = setup_app().await;

    create_venue(&app, "name=The+Musical+Hop&city=San+Francisco&state=CA").await;
    create_artist(&app, "name=Guns+N+Petals").await;

    let response = app
        .clone()
        .oneshot(post_form(
            "/shows/create",
            "venue_id=1&artist_id=1&start_time=2026-09-01+20:00:00",
        ))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["success"], true);

    let response = app.clone().oneshot(get("/shows/1/del")).await.unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["success"], true);

    let response = app.oneshot(get("/shows")).await.unwrap();
    let body = extract_json(response.into_body()).await;
    assert!(body["shows"].as_array().unwrap().is_empty());
}
