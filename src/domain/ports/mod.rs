use crate::domain::models::{
    event::{Event, EventFilter},
    registration::Registration,
    user::User,
};
use crate::error::AppError;
use async_trait::async_trait;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> Result<User, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError>;
}

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn create(&self, event: &Event) -> Result<Event, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Event>, AppError>;
    async fn list(&self, filter: &EventFilter) -> Result<Vec<Event>, AppError>;
    async fn update(&self, event: &Event) -> Result<Event, AppError>;
    /// Deletes the event and every registration referencing it in one
    /// transaction. Partial application is not acceptable.
    async fn delete_cascade(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait RegistrationRepository: Send + Sync {
    async fn find_by_event_and_user(
        &self,
        event_id: &str,
        user_id: &str,
    ) -> Result<Option<Registration>, AppError>;

    /// Inserts the registration only if the event's active (pending or
    /// approved) registration count is still below `capacity`, as a single
    /// conditional statement. Returns `CapacityExceeded` when the guard
    /// fails and `Conflict` when the (event, user) unique index rejects a
    /// duplicate.
    async fn insert_if_capacity(
        &self,
        registration: &Registration,
        capacity: i32,
    ) -> Result<Registration, AppError>;

    async fn count_active(&self, event_id: &str) -> Result<i64, AppError>;
}
