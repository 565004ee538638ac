use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Draft,
    Published,
    Cancelled,
    Completed,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Draft => "draft",
            EventStatus::Published => "published",
            EventStatus::Cancelled => "cancelled",
            EventStatus::Completed => "completed",
        }
    }
}

impl std::str::FromStr for EventStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(EventStatus::Draft),
            "published" => Ok(EventStatus::Published),
            "cancelled" => Ok(EventStatus::Cancelled),
            "completed" => Ok(EventStatus::Completed),
            other => Err(format!("unknown event status: {other}")),
        }
    }
}

super::text_enum!(EventStatus);

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct GeoCoordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EventLocation {
    pub address: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    pub coordinates: Option<GeoCoordinates>,
}

/// Events store the location flattened into columns; prerequisites are kept
/// as a JSON array in `prerequisites_json`.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub capacity: i32,
    pub coordinator_id: String,
    pub status: EventStatus,
    pub prerequisites_json: String,
    pub registration_deadline: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub location: EventLocation,
    pub capacity: i32,
    pub status: Option<EventStatus>,
    pub prerequisites: Vec<String>,
    pub registration_deadline: Option<DateTime<Utc>>,
}

/// The only event fields a caller may patch. `id` and `coordinator_id` are
/// deliberately absent so an update can never reassign ownership.
#[derive(Debug, Default)]
pub struct UpdateEventFields {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub location: Option<EventLocation>,
    pub capacity: Option<i32>,
    pub status: Option<EventStatus>,
    pub prerequisites: Option<Vec<String>>,
    pub registration_deadline: Option<Option<DateTime<Utc>>>,
}

/// Independently optional list filters; an unset field imposes no constraint.
#[derive(Debug, Default, Clone)]
pub struct EventFilter {
    pub status: Option<EventStatus>,
    pub city: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub coordinator_id: Option<String>,
}

impl Event {
    pub fn new(coordinator_id: String, params: NewEvent) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            title: params.title,
            description: params.description,
            date: params.date,
            address: params.location.address,
            city: params.location.city,
            state: params.location.state,
            postal_code: params.location.postal_code,
            country: params.location.country,
            latitude: params.location.coordinates.map(|c| c.latitude),
            longitude: params.location.coordinates.map(|c| c.longitude),
            capacity: params.capacity,
            coordinator_id,
            status: params.status.unwrap_or(EventStatus::Draft),
            prerequisites_json: serde_json::to_string(&params.prerequisites)
                .unwrap_or_else(|_| "[]".to_string()),
            registration_deadline: params.registration_deadline,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn location(&self) -> EventLocation {
        let coordinates = match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(GeoCoordinates { latitude, longitude }),
            _ => None,
        };
        EventLocation {
            address: self.address.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            postal_code: self.postal_code.clone(),
            country: self.country.clone(),
            coordinates,
        }
    }

    pub fn prerequisites(&self) -> Vec<String> {
        serde_json::from_str(&self.prerequisites_json).unwrap_or_default()
    }

    pub fn apply(&mut self, patch: UpdateEventFields) {
        if let Some(val) = patch.title { self.title = val; }
        if let Some(val) = patch.description { self.description = val; }
        if let Some(val) = patch.date { self.date = val; }
        if let Some(loc) = patch.location {
            self.address = loc.address;
            self.city = loc.city;
            self.state = loc.state;
            self.postal_code = loc.postal_code;
            self.country = loc.country;
            self.latitude = loc.coordinates.map(|c| c.latitude);
            self.longitude = loc.coordinates.map(|c| c.longitude);
        }
        if let Some(val) = patch.capacity { self.capacity = val; }
        if let Some(val) = patch.status { self.status = val; }
        if let Some(val) = patch.prerequisites {
            self.prerequisites_json =
                serde_json::to_string(&val).unwrap_or_else(|_| "[]".to_string());
        }
        if let Some(val) = patch.registration_deadline { self.registration_deadline = val; }
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // The schema stores status as a TEXT column on both backends, so the
    // enum must advertise the builtin text type, not a user-defined one.
    #[test]
    fn status_maps_to_text_on_both_backends() {
        assert_eq!(
            <EventStatus as sqlx::Type<sqlx::Postgres>>::type_info(),
            <String as sqlx::Type<sqlx::Postgres>>::type_info(),
        );
        assert_eq!(
            <EventStatus as sqlx::Type<sqlx::Sqlite>>::type_info(),
            <String as sqlx::Type<sqlx::Sqlite>>::type_info(),
        );
    }

    #[test]
    fn status_text_round_trips() {
        let all = [
            EventStatus::Draft,
            EventStatus::Published,
            EventStatus::Cancelled,
            EventStatus::Completed,
        ];
        for status in all {
            assert_eq!(status.as_str().parse::<EventStatus>().unwrap(), status);
        }
        assert!("bogus".parse::<EventStatus>().is_err());
    }
}
