use crate::domain::{models::event::{Event, EventFilter}, ports::EventRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteEventRepo {
    pool: SqlitePool,
}

impl SqliteEventRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRepository for SqliteEventRepo {
    async fn create(&self, event: &Event) -> Result<Event, AppError> {
        sqlx::query_as::<_, Event>(
            "INSERT INTO events (id, title, description, date, address, city, state, postal_code, country, latitude, longitude, capacity, coordinator_id, status, prerequisites_json, registration_deadline, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&event.id).bind(&event.title).bind(&event.description).bind(event.date)
            .bind(&event.address).bind(&event.city).bind(&event.state).bind(&event.postal_code)
            .bind(&event.country).bind(event.latitude).bind(event.longitude).bind(event.capacity)
            .bind(&event.coordinator_id).bind(event.status).bind(&event.prerequisites_json)
            .bind(event.registration_deadline).bind(event.created_at).bind(event.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Event>, AppError> {
        sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self, filter: &EventFilter) -> Result<Vec<Event>, AppError> {
        sqlx::query_as::<_, Event>(
            "SELECT * FROM events
             WHERE (?1 IS NULL OR status = ?1)
               AND (?2 IS NULL OR instr(lower(city), lower(?2)) > 0)
               AND (?3 IS NULL OR date >= ?3)
               AND (?4 IS NULL OR date <= ?4)
               AND (?5 IS NULL OR coordinator_id = ?5)
             ORDER BY date ASC"
        )
            .bind(filter.status.map(|s| s.as_str()))
            .bind(filter.city.as_deref())
            .bind(filter.start_date)
            .bind(filter.end_date)
            .bind(filter.coordinator_id.as_deref())
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, event: &Event) -> Result<Event, AppError> {
        sqlx::query_as::<_, Event>(
            "UPDATE events SET title=?, description=?, date=?, address=?, city=?, state=?, postal_code=?, country=?, latitude=?, longitude=?, capacity=?, status=?, prerequisites_json=?, registration_deadline=?, updated_at=?
             WHERE id=?
             RETURNING *"
        )
            .bind(&event.title).bind(&event.description).bind(event.date)
            .bind(&event.address).bind(&event.city).bind(&event.state).bind(&event.postal_code)
            .bind(&event.country).bind(event.latitude).bind(event.longitude).bind(event.capacity)
            .bind(event.status).bind(&event.prerequisites_json).bind(event.registration_deadline)
            .bind(event.updated_at).bind(&event.id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete_cascade(&self, id: &str) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        sqlx::query("DELETE FROM registrations WHERE event_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        let result = sqlx::query("DELETE FROM events WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Event not found".into()));
        }

        tx.commit().await.map_err(AppError::Database)?;
        Ok(())
    }
}
