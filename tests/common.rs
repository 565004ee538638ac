use eventhub_backend::{
    api::router::create_router,
    config::Config,
    domain::services::{
        auth_service::AuthService,
        event_service::EventService,
        registration_service::RegistrationService,
    },
    infra::repositories::{
        sqlite_event_repo::SqliteEventRepo,
        sqlite_registration_repo::SqliteRegistrationRepo,
        sqlite_user_repo::SqliteUserRepo,
    },
    state::AppState,
};
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, Pool, Sqlite};
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;
use axum::{
    body::Body,
    http::{header, Request},
    Router,
};
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use tower::ServiceExt;

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

#[allow(dead_code)]
pub struct TestUser {
    pub id: String,
    pub token: String,
    pub email: String,
}

impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let priv_key_pem = include_str!("keys/test_private.pem");
        let pub_key_pem = include_str!("keys/test_public.pem");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            jwt_secret_key: priv_key_pem.to_string(),
            jwt_public_key: pub_key_pem.to_string(),
            auth_issuer: "test-issuer".to_string(),
        };

        let user_repo = Arc::new(SqliteUserRepo::new(pool.clone()));
        let event_repo = Arc::new(SqliteEventRepo::new(pool.clone()));
        let registration_repo = Arc::new(SqliteRegistrationRepo::new(pool.clone()));

        let state = Arc::new(AppState {
            config: config.clone(),
            user_repo: user_repo.clone(),
            event_repo: event_repo.clone(),
            registration_repo: registration_repo.clone(),
            auth_service: Arc::new(AuthService::new(config)),
            event_service: Arc::new(EventService::new(event_repo.clone(), user_repo)),
            registration_service: Arc::new(RegistrationService::new(
                event_repo,
                registration_repo,
            )),
        });

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }

    /// Registers a user through the API and returns their id + bearer token.
    pub async fn signup(&self, email: &str, role: &str) -> TestUser {
        let payload = json!({
            "email": email,
            "password": "correct horse battery staple",
            "first_name": "Test",
            "last_name": "User",
            "role": role,
        });

        let response = self.router.clone().oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/register")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap()
        ).await.unwrap();

        if !response.status().is_success() {
            panic!("Signup failed in test helper: status {}", response.status());
        }

        let body = parse_body(response).await;

        TestUser {
            id: body["user"]["id"].as_str().unwrap().to_string(),
            token: body["token"].as_str().unwrap().to_string(),
            email: email.to_string(),
        }
    }

    /// Creates an event as `user` and returns its parsed body. Defaults are
    /// fine for most tests; override status/capacity via the extra object.
    pub async fn create_event(&self, user: &TestUser, extra: Value) -> Value {
        let mut payload = json!({
            "title": "Rust Meetup",
            "description": "Monthly meetup",
            "date": (Utc::now() + Duration::days(14)).to_rfc3339(),
            "location": {
                "address": "1 Main St",
                "city": "Springfield",
                "state": "IL",
                "postal_code": "62701",
                "country": "US",
                "coordinates": null,
            },
            "capacity": 10,
        });

        if let (Some(base), Some(over)) = (payload.as_object_mut(), extra.as_object()) {
            for (k, v) in over {
                base.insert(k.clone(), v.clone());
            }
        }

        let response = self.router.clone().oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/events")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::AUTHORIZATION, format!("Bearer {}", user.token))
                .body(Body::from(payload.to_string()))
                .unwrap()
        ).await.unwrap();

        if !response.status().is_success() {
            panic!("create_event failed in test helper: status {}", response.status());
        }

        parse_body(response).await
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
    }
}

pub async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[allow(dead_code)]
pub fn authed_json(method: &str, uri: &str, token: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[allow(dead_code)]
pub fn authed_empty(method: &str, uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}
