use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::{postgres::{PgPoolOptions, PgConnectOptions}, sqlite::{SqlitePoolOptions, SqliteJournalMode, SqliteConnectOptions}};
use sqlx::{PgPool, SqlitePool, ConnectOptions};
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::state::AppState;
use crate::domain::services::{
    auth_service::AuthService,
    event_service::EventService,
    registration_service::RegistrationService,
};
use crate::infra::repositories::{
    postgres_event_repo::PostgresEventRepo, postgres_registration_repo::PostgresRegistrationRepo,
    postgres_user_repo::PostgresUserRepo,
    sqlite_event_repo::SqliteEventRepo, sqlite_registration_repo::SqliteRegistrationRepo,
    sqlite_user_repo::SqliteUserRepo,
};

pub async fn bootstrap_state(config: &Config) -> AppState {
    let database_url = &config.database_url;

    if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        info!("Initializing PostgreSQL connection...");

        let mut opts: PgConnectOptions = database_url.parse().expect("Invalid Postgres URL");
        opts = opts.log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_with(opts)
            .await
            .expect("Failed to connect to Postgres");

        run_postgres_migrations(&pool).await;

        let user_repo = Arc::new(PostgresUserRepo::new(pool.clone()));
        let event_repo = Arc::new(PostgresEventRepo::new(pool.clone()));
        let registration_repo = Arc::new(PostgresRegistrationRepo::new(pool.clone()));

        AppState {
            config: config.clone(),
            user_repo: user_repo.clone(),
            event_repo: event_repo.clone(),
            registration_repo: registration_repo.clone(),
            auth_service: Arc::new(AuthService::new(config.clone())),
            event_service: Arc::new(EventService::new(event_repo.clone(), user_repo)),
            registration_service: Arc::new(RegistrationService::new(event_repo, registration_repo)),
        }
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(database_url)
            .expect("Invalid SQLite connection string")
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await
            .expect("Failed to connect to SQLite");

        run_sqlite_migrations(&pool).await;

        let user_repo = Arc::new(SqliteUserRepo::new(pool.clone()));
        let event_repo = Arc::new(SqliteEventRepo::new(pool.clone()));
        let registration_repo = Arc::new(SqliteRegistrationRepo::new(pool.clone()));

        AppState {
            config: config.clone(),
            user_repo: user_repo.clone(),
            event_repo: event_repo.clone(),
            registration_repo: registration_repo.clone(),
            auth_service: Arc::new(AuthService::new(config.clone())),
            event_service: Arc::new(EventService::new(event_repo.clone(), user_repo)),
            registration_service: Arc::new(RegistrationService::new(event_repo, registration_repo)),
        }
    }
}

async fn run_postgres_migrations(pool: &PgPool) {
    sqlx::migrate!("./migrations/postgres")
        .run(pool)
        .await
        .expect("Failed to run Postgres migrations");
}

async fn run_sqlite_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .expect("Failed to run SQLite migrations");
}
