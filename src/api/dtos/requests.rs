use crate::domain::models::event::{
    EventFilter, EventLocation, EventStatus, NewEvent, UpdateEventFields,
};
use crate::domain::models::user::UserRole;
use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Deserialize)]
pub struct RegisterUserRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Option<UserRole>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub location: EventLocation,
    pub capacity: i32,
    pub status: Option<EventStatus>,
    pub prerequisites: Option<Vec<String>>,
    pub registration_deadline: Option<DateTime<Utc>>,
}

impl From<CreateEventRequest> for NewEvent {
    fn from(req: CreateEventRequest) -> Self {
        NewEvent {
            title: req.title,
            description: req.description,
            date: req.date,
            location: req.location,
            capacity: req.capacity,
            status: req.status,
            prerequisites: req.prerequisites.unwrap_or_default(),
            registration_deadline: req.registration_deadline,
        }
    }
}

#[derive(Deserialize)]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub location: Option<EventLocation>,
    pub capacity: Option<i32>,
    pub status: Option<EventStatus>,
    pub prerequisites: Option<Vec<String>>,
    pub registration_deadline: Option<DateTime<Utc>>,
}

impl From<UpdateEventRequest> for UpdateEventFields {
    fn from(req: UpdateEventRequest) -> Self {
        UpdateEventFields {
            title: req.title,
            description: req.description,
            date: req.date,
            location: req.location,
            capacity: req.capacity,
            status: req.status,
            prerequisites: req.prerequisites,
            // An absent field leaves the deadline untouched; a provided one
            // replaces it. Clearing requires a dedicated value we don't model.
            registration_deadline: req.registration_deadline.map(Some),
        }
    }
}

#[derive(Deserialize)]
pub struct EventListQuery {
    pub status: Option<EventStatus>,
    pub city: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub coordinator: Option<String>,
}

impl From<EventListQuery> for EventFilter {
    fn from(query: EventListQuery) -> Self {
        EventFilter {
            status: query.status,
            city: query.city,
            start_date: query.start_date,
            end_date: query.end_date,
            coordinator_id: query.coordinator,
        }
    }
}

#[derive(Deserialize, Default)]
pub struct RegisterForEventRequest {
    pub notes: Option<String>,
}
