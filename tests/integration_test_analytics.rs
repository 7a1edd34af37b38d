mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use chrono::{Duration, Utc};
use common::TestApp;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn post(app: &TestApp, uri: &str, payload: Value) -> Value {
    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK, "POST {} failed", uri);
    parse_body(res).await
}

async fn setup_event(app: &TestApp) -> (String, String) {
    let event = post(app, "/api/v1/events", json!({
        "name": "Analytics Night",
        "event_date": (Utc::now() + Duration::days(1)).to_rfc3339(),
        "access_mode": "standard"
    })).await;
    let event_id = event["id"].as_str().unwrap().to_string();
    let code = event["access_code"].as_str().unwrap().to_string();
    (event_id, code)
}

async fn add_wine(app: &TestApp, event_id: &str, name: &str) -> String {
    let wine = post(app, &format!("/api/v1/events/{}/wines", event_id), json!({
        "name": name,
        "producer": "Chateau Test"
    })).await;
    wine["id"].as_str().unwrap().to_string()
}

async fn join_as(app: &TestApp, code: &str, email: &str) -> String {
    let outcome = post(app, "/api/v1/join", json!({
        "code": code,
        "email": email,
        "mode": "standard"
    })).await;
    outcome["session"]["userId"].as_str().unwrap().to_string()
}

async fn rate(app: &TestApp, event_id: &str, wine_id: &str, profile_id: &str, stars: i32, payload_extra: Value) {
    let mut payload = json!({
        "wine_id": wine_id,
        "profile_id": profile_id,
        "stars": stars
    });
    if let Some(extra) = payload_extra.as_object() {
        for (k, v) in extra {
            payload[k] = v.clone();
        }
    }
    post(app, &format!("/api/v1/events/{}/ratings", event_id), payload).await;
}

async fn fetch_analytics(app: &TestApp, event_id: &str) -> Value {
    let res = app.router.clone().oneshot(
        Request::builder().method("GET")
            .uri(format!("/api/v1/events/{}/analytics", event_id))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    parse_body(res).await
}

#[tokio::test]
async fn test_empty_event_yields_zeroed_summary() {
    let app = TestApp::new().await;
    let (event_id, _) = setup_event(&app).await;

    let summary = fetch_analytics(&app, &event_id).await;
    assert_eq!(summary["totalRatings"], 0);
    assert_eq!(summary["averageRating"], 0.0);
    assert_eq!(summary["wines"].as_array().unwrap().len(), 0);
    assert_eq!(summary["attendees"].as_array().unwrap().len(), 0);
    assert_eq!(summary["topDescriptors"].as_array().unwrap().len(), 0);

    let distribution = summary["distribution"].as_array().unwrap();
    assert_eq!(distribution.len(), 5);
    for bucket in distribution {
        assert_eq!(bucket["count"], 0);
        assert_eq!(bucket["percentage"], 0.0);
    }

    assert_eq!(summary["hourlyActivity"].as_array().unwrap().len(), 24);
}

#[tokio::test]
async fn test_rollup_of_five_ratings_on_two_wines() {
    let app = TestApp::new().await;
    let (event_id, code) = setup_event(&app).await;
    let w1 = add_wine(&app, &event_id, "Merlot").await;
    let w2 = add_wine(&app, &event_id, "Syrah").await;
    let guest = join_as(&app, &code, "taster@example.com").await;

    for (wine, stars) in [(&w1, 5), (&w1, 4), (&w1, 3), (&w2, 5), (&w2, 2)] {
        rate(&app, &event_id, wine, &guest, stars, json!({})).await;
    }

    let summary = fetch_analytics(&app, &event_id).await;
    assert_eq!(summary["totalRatings"], 5);
    assert_eq!(summary["averageRating"], 3.8);

    let distribution = summary["distribution"].as_array().unwrap();
    let counts: Vec<i64> = distribution.iter().map(|b| b["count"].as_i64().unwrap()).collect();
    assert_eq!(counts, vec![0, 1, 1, 1, 2]);
    let percentages: Vec<f64> = distribution.iter().map(|b| b["percentage"].as_f64().unwrap()).collect();
    assert_eq!(percentages, vec![0.0, 20.0, 20.0, 20.0, 40.0]);

    // Totals line up across rollups.
    let per_wine: i64 = summary["wines"].as_array().unwrap()
        .iter().map(|w| w["ratings"].as_i64().unwrap()).sum();
    assert_eq!(per_wine, 5);
    let hourly: i64 = summary["hourlyActivity"].as_array().unwrap()
        .iter().map(|b| b["count"].as_i64().unwrap()).sum();
    assert_eq!(hourly, 5);

    let merlot = summary["wines"].as_array().unwrap()
        .iter().find(|w| w["name"] == "Merlot").unwrap();
    assert_eq!(merlot["ratings"], 3);
    assert_eq!(merlot["average"], 4.0);
}

#[tokio::test]
async fn test_percentages_sum_within_tolerance() {
    let app = TestApp::new().await;
    let (event_id, code) = setup_event(&app).await;
    let wine = add_wine(&app, &event_id, "Riesling").await;
    let guest = join_as(&app, &code, "taster@example.com").await;

    for stars in [1, 2, 3, 4, 5, 5, 3] {
        rate(&app, &event_id, &wine, &guest, stars, json!({})).await;
    }

    let summary = fetch_analytics(&app, &event_id).await;
    let pct_sum: f64 = summary["distribution"].as_array().unwrap()
        .iter().map(|b| b["percentage"].as_f64().unwrap()).sum();
    assert!((99.0..=101.0).contains(&pct_sum), "pct sum = {}", pct_sum);

    let count_sum: i64 = summary["distribution"].as_array().unwrap()
        .iter().map(|b| b["count"].as_i64().unwrap()).sum();
    assert_eq!(count_sum, summary["totalRatings"].as_i64().unwrap());
}

#[tokio::test]
async fn test_descriptor_ranking() {
    let app = TestApp::new().await;
    let (event_id, code) = setup_event(&app).await;
    let wine = add_wine(&app, &event_id, "Zinfandel").await;
    let guest = join_as(&app, &code, "taster@example.com").await;

    rate(&app, &event_id, &wine, &guest, 5, json!({
        "descriptors": [{"name": "cherry", "intensity": 3}, {"name": "oak", "intensity": 2}]
    })).await;
    rate(&app, &event_id, &wine, &guest, 4, json!({
        "descriptors": [{"name": "cherry", "intensity": 4}]
    })).await;
    rate(&app, &event_id, &wine, &guest, 4, json!({
        "descriptors": [{"name": "cherry", "intensity": 1}, {"name": "vanilla"}]
    })).await;

    let summary = fetch_analytics(&app, &event_id).await;
    let descriptors = summary["topDescriptors"].as_array().unwrap();
    assert_eq!(descriptors[0]["name"], "cherry");
    assert_eq!(descriptors[0]["count"], 3);
    assert_eq!(descriptors.len(), 3);
}

#[tokio::test]
async fn test_notes_and_sample_note() {
    let app = TestApp::new().await;
    let (event_id, code) = setup_event(&app).await;
    let wine = add_wine(&app, &event_id, "Pinot Noir").await;
    let guest = join_as(&app, &code, "taster@example.com").await;

    rate(&app, &event_id, &wine, &guest, 5, json!({"note": "silky tannins"})).await;
    rate(&app, &event_id, &wine, &guest, 3, json!({"note": "   "})).await;
    rate(&app, &event_id, &wine, &guest, 4, json!({})).await;

    let summary = fetch_analytics(&app, &event_id).await;
    let stats = &summary["wines"].as_array().unwrap()[0];
    assert_eq!(stats["notes"], 1); // blank note is not a note
    assert_eq!(stats["sampleNote"], "silky tannins");
}

#[tokio::test]
async fn test_attendee_rollup_synthesizes_missing_email() {
    let app = TestApp::new().await;
    let (event_id, code) = setup_event(&app).await;
    let wine = add_wine(&app, &event_id, "Gamay").await;
    let guest = join_as(&app, &code, "purged@example.com").await;

    rate(&app, &event_id, &wine, &guest, 5, json!({})).await;
    rate(&app, &event_id, &wine, &guest, 4, json!({})).await;

    // The external retention sweep removed the profile row; the rating rows
    // survive and must still roll up with an email-shaped fallback.
    sqlx::query("DELETE FROM profiles WHERE id = ?")
        .bind(&guest)
        .execute(&app.pool)
        .await
        .unwrap();

    let summary = fetch_analytics(&app, &event_id).await;
    let attendees = summary["attendees"].as_array().unwrap();
    assert_eq!(attendees.len(), 1);
    assert_eq!(attendees[0]["displayName"], "Guest");
    assert_eq!(attendees[0]["ratings"], 2);
    assert_eq!(attendees[0]["average"], 4.5);

    let short: String = guest.chars().take(8).collect();
    assert_eq!(attendees[0]["email"], format!("user-{}@example.com", short));
}
