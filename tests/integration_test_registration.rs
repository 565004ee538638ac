mod common;

use axum::http::StatusCode;
use common::{authed_empty, authed_json, parse_body, TestApp};
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_register_for_published_event() {
    let app = TestApp::new().await;
    let coordinator = app.signup("reg-c1@example.com", "event_coordinator").await;
    let attendee = app.signup("reg-u1@example.com", "user").await;

    let event = app.create_event(&coordinator, json!({"status": "published"})).await;
    let event_id = event["id"].as_str().unwrap();

    let res = app.router.clone().oneshot(authed_json(
        "POST", &format!("/api/events/{}/register", event_id), &attendee.token,
        json!({"notes": "Vegetarian lunch please"}),
    )).await.unwrap();

    assert_eq!(res.status(), StatusCode::CREATED);
    let body = parse_body(res).await;
    assert_eq!(body["event_id"], event_id);
    assert_eq!(body["user_id"], attendee.id.as_str());
    assert_eq!(body["status"], "pending");
    assert_eq!(body["notes"], "Vegetarian lunch please");
    assert!(body["registration_date"].as_str().is_some());
}

#[tokio::test]
async fn test_register_without_body() {
    let app = TestApp::new().await;
    let coordinator = app.signup("reg-c2@example.com", "event_coordinator").await;
    let attendee = app.signup("reg-u2@example.com", "user").await;

    let event = app.create_event(&coordinator, json!({"status": "published"})).await;
    let event_id = event["id"].as_str().unwrap();

    let res = app.router.clone().oneshot(authed_empty(
        "POST", &format!("/api/events/{}/register", event_id), &attendee.token,
    )).await.unwrap();

    assert_eq!(res.status(), StatusCode::CREATED);
    let body = parse_body(res).await;
    assert!(body["notes"].is_null());
}

#[tokio::test]
async fn test_register_for_draft_event_rejected() {
    let app = TestApp::new().await;
    let coordinator = app.signup("reg-c3@example.com", "event_coordinator").await;
    let attendee = app.signup("reg-u3@example.com", "user").await;

    let event = app.create_event(&coordinator, json!({})).await;
    let event_id = event["id"].as_str().unwrap();

    let res = app.router.clone().oneshot(authed_empty(
        "POST", &format!("/api/events/{}/register", event_id), &attendee.token,
    )).await.unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = parse_body(res).await;
    assert_eq!(body["error"], "Event is not open for registration");
}

#[tokio::test]
async fn test_register_for_cancelled_event_rejected() {
    let app = TestApp::new().await;
    let coordinator = app.signup("reg-c4@example.com", "event_coordinator").await;
    let attendee = app.signup("reg-u4@example.com", "user").await;

    let event = app.create_event(&coordinator, json!({"status": "cancelled"})).await;
    let event_id = event["id"].as_str().unwrap();

    let res = app.router.clone().oneshot(authed_empty(
        "POST", &format!("/api/events/{}/register", event_id), &attendee.token,
    )).await.unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_duplicate_registration_rejected() {
    let app = TestApp::new().await;
    let coordinator = app.signup("reg-c5@example.com", "event_coordinator").await;
    let attendee = app.signup("reg-u5@example.com", "user").await;

    let event = app.create_event(&coordinator, json!({"status": "published"})).await;
    let event_id = event["id"].as_str().unwrap();

    let first = app.router.clone().oneshot(authed_empty(
        "POST", &format!("/api/events/{}/register", event_id), &attendee.token,
    )).await.unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app.router.clone().oneshot(authed_empty(
        "POST", &format!("/api/events/{}/register", event_id), &attendee.token,
    )).await.unwrap();
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);
    let body = parse_body(second).await;
    assert_eq!(body["error"], "Already registered for this event");
}

#[tokio::test]
async fn test_capacity_boundary() {
    let app = TestApp::new().await;
    let coordinator = app.signup("reg-c6@example.com", "event_coordinator").await;
    let first = app.signup("reg-u6a@example.com", "user").await;
    let second = app.signup("reg-u6b@example.com", "user").await;

    let event = app.create_event(&coordinator, json!({"status": "published", "capacity": 1})).await;
    let event_id = event["id"].as_str().unwrap();

    let res = app.router.clone().oneshot(authed_empty(
        "POST", &format!("/api/events/{}/register", event_id), &first.token,
    )).await.unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    // Pending registrations count against capacity, so the second user is
    // turned away immediately.
    let res = app.router.clone().oneshot(authed_empty(
        "POST", &format!("/api/events/{}/register", event_id), &second.token,
    )).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = parse_body(res).await;
    assert_eq!(body["error"], "Event is at capacity");
}

#[tokio::test]
async fn test_duplicate_takes_precedence_over_capacity() {
    let app = TestApp::new().await;
    let coordinator = app.signup("reg-c7@example.com", "event_coordinator").await;
    let attendee = app.signup("reg-u7@example.com", "user").await;

    let event = app.create_event(&coordinator, json!({"status": "published", "capacity": 1})).await;
    let event_id = event["id"].as_str().unwrap();

    app.router.clone().oneshot(authed_empty(
        "POST", &format!("/api/events/{}/register", event_id), &attendee.token,
    )).await.unwrap();

    // The event is now full, but the same user re-registering must see the
    // duplicate error, not the capacity one.
    let res = app.router.clone().oneshot(authed_empty(
        "POST", &format!("/api/events/{}/register", event_id), &attendee.token,
    )).await.unwrap();
    let body = parse_body(res).await;
    assert_eq!(body["error"], "Already registered for this event");
}

#[tokio::test]
async fn test_not_open_takes_precedence_over_capacity() {
    let app = TestApp::new().await;
    let coordinator = app.signup("reg-c8@example.com", "event_coordinator").await;
    let attendee = app.signup("reg-u8@example.com", "user").await;

    let event = app.create_event(&coordinator, json!({"status": "draft", "capacity": 1})).await;
    let event_id = event["id"].as_str().unwrap();

    let res = app.router.clone().oneshot(authed_empty(
        "POST", &format!("/api/events/{}/register", event_id), &attendee.token,
    )).await.unwrap();

    let body = parse_body(res).await;
    assert_eq!(body["error"], "Event is not open for registration");
}

#[tokio::test]
async fn test_register_for_nonexistent_event() {
    let app = TestApp::new().await;
    let attendee = app.signup("reg-u9@example.com", "user").await;

    let res = app.router.clone().oneshot(authed_empty(
        "POST", "/api/events/no-such-event/register", &attendee.token,
    )).await.unwrap();

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_capacity_enforced_at_storage_layer() {
    // Bypass the service's advisory count by inserting directly; the guarded
    // insert must still refuse once the event is full.
    let app = TestApp::new().await;
    let coordinator = app.signup("reg-c10@example.com", "event_coordinator").await;
    let first = app.signup("reg-u10a@example.com", "user").await;
    let second = app.signup("reg-u10b@example.com", "user").await;

    let event = app.create_event(&coordinator, json!({"status": "published", "capacity": 1})).await;
    let event_id = event["id"].as_str().unwrap().to_string();

    use eventhub_backend::domain::models::registration::Registration;
    use eventhub_backend::error::AppError;

    let reg_a = Registration::new(event_id.clone(), first.id.clone(), None);
    app.state.registration_repo.insert_if_capacity(&reg_a, 1).await.unwrap();

    let reg_b = Registration::new(event_id.clone(), second.id.clone(), None);
    let err = app.state.registration_repo.insert_if_capacity(&reg_b, 1).await.unwrap_err();
    assert!(matches!(err, AppError::CapacityExceeded));

    let count = app.state.registration_repo.count_active(&event_id).await.unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_unique_index_backs_duplicate_check() {
    // Two inserts for the same (event, user) pair aimed straight at the
    // repository: the second must surface the duplicate outcome even though
    // it never ran the application-level existence check.
    let app = TestApp::new().await;
    let coordinator = app.signup("reg-c11@example.com", "event_coordinator").await;
    let attendee = app.signup("reg-u11@example.com", "user").await;

    let event = app.create_event(&coordinator, json!({"status": "published", "capacity": 10})).await;
    let event_id = event["id"].as_str().unwrap().to_string();

    use eventhub_backend::domain::models::registration::Registration;
    use eventhub_backend::error::AppError;

    let reg_a = Registration::new(event_id.clone(), attendee.id.clone(), None);
    app.state.registration_repo.insert_if_capacity(&reg_a, 10).await.unwrap();

    let reg_b = Registration::new(event_id.clone(), attendee.id.clone(), None);
    let err = app.state.registration_repo.insert_if_capacity(&reg_b, 10).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}
