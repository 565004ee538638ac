use crate::domain::{models::event::{Event, EventFilter}, ports::EventRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresEventRepo {
    pool: PgPool,
}

impl PostgresEventRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRepository for PostgresEventRepo {
    async fn create(&self, event: &Event) -> Result<Event, AppError> {
        sqlx::query_as::<_, Event>(
            "INSERT INTO events (id, title, description, date, address, city, state, postal_code, country, latitude, longitude, capacity, coordinator_id, status, prerequisites_json, registration_deadline, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
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
        sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self, filter: &EventFilter) -> Result<Vec<Event>, AppError> {
        sqlx::query_as::<_, Event>(
            "SELECT * FROM events
             WHERE ($1::text IS NULL OR status = $1)
               AND ($2::text IS NULL OR city ILIKE '%' || $2 || '%')
               AND ($3::timestamptz IS NULL OR date >= $3)
               AND ($4::timestamptz IS NULL OR date <= $4)
               AND ($5::text IS NULL OR coordinator_id = $5)
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
            "UPDATE events SET title=$1, description=$2, date=$3, address=$4, city=$5, state=$6, postal_code=$7, country=$8, latitude=$9, longitude=$10, capacity=$11, status=$12, prerequisites_json=$13, registration_deadline=$14, updated_at=$15
             WHERE id=$16
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

        sqlx::query("DELETE FROM registrations WHERE event_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        let result = sqlx::query("DELETE FROM events WHERE id = $1")
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
