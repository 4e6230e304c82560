mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use serde_json::json;

use common::{listing_body, parse_time, spawn_app};

fn assert_close(actual: chrono::DateTime<Utc>, expected: chrono::DateTime<Utc>) {
    let drift = (actual - expected).num_seconds().abs();
    assert!(drift < 60, "{} is not close to {}", actual, expected);
}

#[tokio::test]
async fn create_without_dates_fills_defaults() {
    let app = spawn_app();
    let created = app.create_listing(&listing_body("Backend Engineer")).await;

    let now = Utc::now();
    assert_close(parse_time(&created["datePosted"]), now);
    assert_close(parse_time(&created["expiryDate"]), now + Duration::days(30));
    assert!(created["id"].as_str().is_some());
}

#[tokio::test]
async fn create_then_get_round_trips_every_field() {
    let app = spawn_app();
    let mut body = listing_body("Data Engineer");
    body["type"] = json!("Internship");
    body["datePosted"] = json!("2025-01-02T03:04:05Z");
    body["expiryDate"] = json!("2025-02-02T03:04:05Z");
    body["schema"] = json!({"@context": "https://schema.org", "@type": "JobPosting"});
    let created = app.create_listing(&body).await;

    let res = app
        .get(&format!("/jobs/{}", created["id"].as_str().unwrap()), false)
        .await;
    assert_eq!(res.status, StatusCode::OK);
    let fetched = res.json();
    for key in [
        "title",
        "company",
        "companyUrl",
        "companyLogo",
        "industry",
        "type",
        "location",
        "description",
        "responsibilities",
        "qualifications",
        "education",
        "experience",
        "schema",
    ] {
        assert_eq!(fetched[key], body[key], "field {}", key);
    }
    assert_eq!(parse_time(&fetched["datePosted"]), parse_time(&body["datePosted"]));
    assert_eq!(parse_time(&fetched["expiryDate"]), parse_time(&body["expiryDate"]));
}

#[tokio::test]
async fn update_omitting_expiry_resets_it() {
    let app = spawn_app();
    let mut body = listing_body("SRE");
    body["expiryDate"] = json!((Utc::now() + Duration::days(90)).to_rfc3339());
    let created = app.create_listing(&body).await;
    let id = created["id"].as_str().unwrap().to_string();

    let mut edit = listing_body("Senior SRE");
    edit["id"] = json!(uuid::Uuid::new_v4());
    let res = app.send_json("PUT", &format!("/jobs/{}", id), &edit).await;
    assert_eq!(res.status, StatusCode::OK);
    let updated = res.json();

    assert_eq!(updated["id"], json!(id));
    assert_eq!(updated["title"], "Senior SRE");
    assert_close(
        parse_time(&updated["expiryDate"]),
        Utc::now() + Duration::days(30),
    );
}

#[tokio::test]
async fn update_of_missing_listing_is_not_found() {
    let app = spawn_app();
    let res = app
        .send_json(
            "PUT",
            &format!("/jobs/{}", uuid::Uuid::new_v4()),
            &listing_body("Ghost"),
        )
        .await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_of_missing_listing_is_not_found_without_side_effects() {
    let app = spawn_app();
    app.create_listing(&listing_body("Keeper")).await;

    let res = app.delete(&format!("/jobs/{}", uuid::Uuid::new_v4())).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(app.get("/jobs/count", true).await.json()["count"], 1);
}

#[tokio::test]
async fn delete_removes_the_listing() {
    let app = spawn_app();
    let created = app.create_listing(&listing_body("Temp")).await;
    let uri = format!("/jobs/{}", created["id"].as_str().unwrap());

    let res = app.delete(&uri).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json()["message"], "Job deleted successfully");
    assert_eq!(app.get(&uri, false).await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn missing_fields_are_named_in_the_error() {
    let app = spawn_app();
    let mut body = listing_body("Incomplete");
    body.as_object_mut().unwrap().remove("company");
    body.as_object_mut().unwrap().remove("location");

    let res = app.send_json("POST", "/jobs", &body).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    let fields = res.json()["fields"].clone();
    assert!(fields.as_array().unwrap().contains(&json!("company")));
    assert!(fields.as_array().unwrap().contains(&json!("location")));
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let app = spawn_app();
    let req = axum::http::Request::builder()
        .method("POST")
        .uri("/jobs")
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", app.token))
        .body(axum::body::Body::from("{not json"))
        .unwrap();
    let res = app.send(req).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert!(res.json()["error"].is_string());
}

#[tokio::test]
async fn list_is_public_and_newest_posted_first() {
    let app = spawn_app();
    let mut older = listing_body("Older");
    older["datePosted"] = json!("2024-01-01T00:00:00Z");
    let mut newer = listing_body("Newer");
    newer["datePosted"] = json!("2024-06-01T00:00:00Z");
    app.create_listing(&older).await;
    app.create_listing(&newer).await;

    let res = app.get("/jobs", false).await;
    assert_eq!(res.status, StatusCode::OK);
    let titles: Vec<String> = res
        .json()
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["title"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(titles, vec!["Newer", "Older"]);
}

#[tokio::test]
async fn management_routes_require_a_token() {
    let app = spawn_app();
    let req = axum::http::Request::builder()
        .method("POST")
        .uri("/jobs")
        .header("content-type", "application/json")
        .body(axum::body::Body::from(listing_body("Nope").to_string()))
        .unwrap();
    assert_eq!(app.send(req).await.status, StatusCode::UNAUTHORIZED);
    assert_eq!(app.get("/jobs/count", false).await.status, StatusCode::UNAUTHORIZED);
    assert_eq!(app.get("/jobs/upcoming", false).await.status, StatusCode::UNAUTHORIZED);

    let forged = axum::http::Request::builder()
        .uri("/jobs/count")
        .header("authorization", "Bearer not.a.jwt")
        .body(axum::body::Body::empty())
        .unwrap();
    assert_eq!(app.send(forged).await.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn upcoming_lists_open_listings_soonest_first() {
    let app = spawn_app();
    let now = Utc::now();
    for days in [40, -1, 8, 1, 10, 2, 5] {
        let mut body = listing_body(&format!("Closes in {}", days));
        body["expiryDate"] = json!((now + Duration::days(days) - Duration::hours(1)).to_rfc3339());
        app.create_listing(&body).await;
    }

    let res = app.get("/jobs/upcoming", true).await;
    assert_eq!(res.status, StatusCode::OK);
    let jobs = res.json()["jobs"].as_array().unwrap().clone();
    let titles: Vec<&str> = jobs.iter().map(|j| j["title"].as_str().unwrap()).collect();
    assert_eq!(
        titles,
        vec!["Closes in 1", "Closes in 2", "Closes in 5", "Closes in 8", "Closes in 10"]
    );
    let days_left: Vec<i64> = jobs.iter().map(|j| j["daysLeft"].as_i64().unwrap()).collect();
    assert_eq!(days_left, vec![1, 2, 5, 8, 10]);
}
