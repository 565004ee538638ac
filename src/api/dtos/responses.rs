use crate::domain::models::{
    event::{Event, EventLocation, EventStatus},
    user::User,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserProfile,
}

#[derive(Serialize)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: crate::domain::models::user::UserRole,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            role: user.role,
        }
    }
}

/// The coordinator reference resolved for display, never the full user record.
#[derive(Serialize)]
pub struct CoordinatorProfile {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl From<&User> for CoordinatorProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
        }
    }
}

#[derive(Serialize)]
pub struct EventResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub location: EventLocation,
    pub capacity: i32,
    pub coordinator: Option<CoordinatorProfile>,
    pub status: EventStatus,
    pub prerequisites: Vec<String>,
    pub registration_deadline: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl EventResponse {
    pub fn new(event: Event, coordinator: Option<&User>) -> Self {
        Self {
            location: event.location(),
            prerequisites: event.prerequisites(),
            coordinator: coordinator.map(CoordinatorProfile::from),
            id: event.id,
            title: event.title,
            description: event.description,
            date: event.date,
            capacity: event.capacity,
            status: event.status,
            registration_deadline: event.registration_deadline,
            created_at: event.created_at,
            updated_at: event.updated_at,
        }
    }
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}
