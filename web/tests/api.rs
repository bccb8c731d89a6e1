//! HTTP-level coverage of the API surface: happy paths, error mapping,
//! rate limiting, and audit capture.

#![allow(clippy::unwrap_used)]

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use seatwise_core::model::{Attendee, Event, Registration};
use seatwise_runtime::FixedWindowLimiter;
use seatwise_testing::ServiceFixture;
use seatwise_web::{AppState, RATE_LIMITED_BODY, build_router};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

fn app(fixture: &ServiceFixture, limit: u32) -> Router {
    let state = AppState::new(
        Arc::clone(&fixture.catalog),
        Arc::clone(&fixture.directory),
        Arc::clone(&fixture.registration),
    );
    let limiter = Arc::new(FixedWindowLimiter::new(limit, Duration::from_secs(60)));
    build_router(state, limiter)
}

fn post(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn read_json<T: DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn create_event(app: &Router, capacity: u32) -> Event {
    let response = app
        .clone()
        .oneshot(post(
            "/api/events",
            &json!({
                "title": "RustConf",
                "starts_at": "2026-09-01T09:00:00Z",
                "capacity": capacity,
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    read_json(response).await
}

async fn create_attendee(app: &Router, email: &str) -> Attendee {
    let response = app
        .clone()
        .oneshot(post(
            "/api/attendees",
            &json!({"name": "Ada", "email": email}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    read_json(response).await
}

#[tokio::test]
async fn created_event_is_retrievable() {
    let fixture = ServiceFixture::new();
    let app = app(&fixture, 60);

    let event = create_event(&app, 10).await;

    let response = app
        .clone()
        .oneshot(get(&format!("/api/events/{}", event.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let fetched: Event = read_json(response).await;
    assert_eq!(fetched, event);
}

#[tokio::test]
async fn zero_capacity_is_unprocessable() {
    let fixture = ServiceFixture::new();
    let app = app(&fixture, 60);

    let response = app
        .clone()
        .oneshot(post(
            "/api/events",
            &json!({
                "title": "Empty",
                "starts_at": "2026-09-01T09:00:00Z",
                "capacity": 0,
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = read_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn unknown_event_is_404() {
    let fixture = ServiceFixture::new();
    let app = app(&fixture, 60);

    let response = app
        .clone()
        .oneshot(get(&format!(
            "/api/events/{}",
            uuid::Uuid::new_v4()
        )))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = read_json(response).await;
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn registration_flow_end_to_end() {
    let fixture = ServiceFixture::new();
    let app = app(&fixture, 60);

    let event = create_event(&app, 2).await;
    let attendee = create_attendee(&app, "ada@example.com").await;

    let response = app
        .clone()
        .oneshot(post(
            "/api/registrations",
            &json!({"event_id": event.id, "attendee_id": attendee.id}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let registration: Registration = read_json(response).await;
    assert_eq!(registration.event_id, event.id);
    assert_eq!(registration.attendee_id, attendee.id);

    let response = app
        .clone()
        .oneshot(get(&format!("/api/events/{}", event.id)))
        .await
        .unwrap();
    let updated: Event = read_json(response).await;
    assert_eq!(updated.reserved_seats, 1);

    let response = app.clone().oneshot(get("/api/registrations")).await.unwrap();
    let listed: Vec<Registration> = read_json(response).await;
    assert_eq!(listed, vec![registration]);

    // One record for the attendee creation, one for the registration.
    fixture.audit.flush().await;
    let records = fixture.changelog.records().await;
    let modules: Vec<_> = records.iter().map(|r| r.module.as_str()).collect();
    assert_eq!(modules, ["attendees", "registration"]);
}

#[tokio::test]
async fn sold_out_event_registration_is_409() {
    let fixture = ServiceFixture::new();
    let app = app(&fixture, 60);

    let event = create_event(&app, 1).await;
    let first = create_attendee(&app, "first@example.com").await;
    let second = create_attendee(&app, "second@example.com").await;

    let response = app
        .clone()
        .oneshot(post(
            "/api/registrations",
            &json!({"event_id": event.id, "attendee_id": first.id}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(post(
            "/api/registrations",
            &json!({"event_id": event.id, "attendee_id": second.id}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: Value = read_json(response).await;
    assert_eq!(body["code"], "CONFLICT");
}

#[tokio::test]
async fn registration_with_unknown_event_is_404() {
    let fixture = ServiceFixture::new();
    let app = app(&fixture, 60);
    let attendee = create_attendee(&app, "ada@example.com").await;

    let response = app
        .clone()
        .oneshot(post(
            "/api/registrations",
            &json!({"event_id": uuid::Uuid::new_v4(), "attendee_id": attendee.id}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn duplicate_email_is_409() {
    let fixture = ServiceFixture::new();
    let app = app(&fixture, 60);

    create_attendee(&app, "ada@example.com").await;
    let response = app
        .clone()
        .oneshot(post(
            "/api/attendees",
            &json!({"name": "Ada again", "email": "ada@example.com"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn rate_limited_client_gets_429_with_exact_body() {
    let fixture = ServiceFixture::new();
    let app = app(&fixture, 2);

    let request = |email: &str| {
        Request::builder()
            .method("POST")
            .uri("/api/attendees")
            .header(header::CONTENT_TYPE, "application/json")
            .header("X-Forwarded-For", "203.0.113.9")
            .body(Body::from(
                json!({"name": "Ada", "email": email}).to_string(),
            ))
            .unwrap()
    };

    for i in 0..2 {
        let response = app
            .clone()
            .oneshot(request(&format!("a{i}@example.com")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app
        .clone()
        .oneshot(request("late@example.com"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(body.as_ref(), RATE_LIMITED_BODY.as_bytes());

    // The rejected attendee was never created.
    let response = app.clone().oneshot(get("/api/attendees")).await.unwrap();
    let listed: Vec<Attendee> = read_json(response).await;
    assert_eq!(listed.len(), 2);

    // Catalog traffic is not gated, the same client can still browse.
    let response = app.clone().oneshot(get("/api/events")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn events_list_is_sorted_by_start_time() {
    let fixture = ServiceFixture::new();
    let app = app(&fixture, 60);

    for (title, starts_at) in [
        ("late", "2026-09-03T09:00:00Z"),
        ("early", "2026-09-01T09:00:00Z"),
        ("middle", "2026-09-02T09:00:00Z"),
    ] {
        let response = app
            .clone()
            .oneshot(post(
                "/api/events",
                &json!({"title": title, "starts_at": starts_at, "capacity": 5}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app.clone().oneshot(get("/api/events")).await.unwrap();
    let listed: Vec<Event> = read_json(response).await;
    let titles: Vec<_> = listed.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, ["early", "middle", "late"]);
}

#[tokio::test]
async fn health_endpoints_respond() {
    let fixture = ServiceFixture::new();
    let app = app(&fixture, 60);

    let response = app.clone().oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let response = app.clone().oneshot(get("/ready")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
