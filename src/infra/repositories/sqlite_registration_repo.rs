use crate::domain::{models::registration::Registration, ports::RegistrationRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{SqlitePool, Row};

pub struct SqliteRegistrationRepo {
    pool: SqlitePool,
}

impl SqliteRegistrationRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn map_insert_error(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        let code = db_err.code().unwrap_or_default();
        // 2067 = SQLITE_CONSTRAINT_UNIQUE, 1555 = SQLITE_CONSTRAINT_PRIMARYKEY
        if code == "2067" || code == "1555" {
            return AppError::Conflict("Already registered for this event".into());
        }
    }
    AppError::Database(e)
}

#[async_trait]
impl RegistrationRepository for SqliteRegistrationRepo {
    async fn find_by_event_and_user(
        &self,
        event_id: &str,
        user_id: &str,
    ) -> Result<Option<Registration>, AppError> {
        sqlx::query_as::<_, Registration>(
            "SELECT * FROM registrations WHERE event_id = ? AND user_id = ?",
        )
            .bind(event_id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn insert_if_capacity(
        &self,
        registration: &Registration,
        capacity: i32,
    ) -> Result<Registration, AppError> {
        // The count and the write happen in one statement; concurrent
        // registrations cannot both pass a separate count step.
        sqlx::query_as::<_, Registration>(
            "INSERT INTO registrations (id, event_id, user_id, status, registration_date, notes, created_at)
             SELECT ?1, ?2, ?3, ?4, ?5, ?6, ?7
             WHERE (SELECT COUNT(*) FROM registrations
                    WHERE event_id = ?2 AND status IN ('pending', 'approved')) < ?8
             RETURNING *"
        )
            .bind(&registration.id)
            .bind(&registration.event_id)
            .bind(&registration.user_id)
            .bind(registration.status)
            .bind(registration.registration_date)
            .bind(&registration.notes)
            .bind(registration.created_at)
            .bind(capacity as i64)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_insert_error)?
            .ok_or(AppError::CapacityExceeded)
    }

    async fn count_active(&self, event_id: &str) -> Result<i64, AppError> {
        let row = sqlx::query(
            "SELECT COUNT(*) as count FROM registrations WHERE event_id = ? AND status IN ('pending', 'approved')",
        )
            .bind(event_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(row.get::<i64, _>("count"))
    }
}
