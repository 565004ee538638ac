use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::models::{
    auth::Principal,
    event::{Event, EventFilter, NewEvent, UpdateEventFields},
    user::User,
};
use crate::domain::ports::{EventRepository, UserRepository};
use crate::domain::services::authorization;
use crate::error::AppError;
use tracing::info;

/// Owns the Event lifecycle: creation, gated mutation, cascading deletion
/// and filtered listing with the coordinator profile resolved per row.
pub struct EventService {
    events: Arc<dyn EventRepository>,
    users: Arc<dyn UserRepository>,
}

impl EventService {
    pub fn new(events: Arc<dyn EventRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { events, users }
    }

    pub async fn create(&self, principal: &Principal, params: NewEvent) -> Result<Event, AppError> {
        if !authorization::can_create_event(principal) {
            return Err(AppError::Forbidden(
                "Only event coordinators can create events".into(),
            ));
        }

        validate_capacity(params.capacity)?;

        let event = Event::new(principal.user_id.clone(), params);
        let created = self.events.create(&event).await?;

        info!("Event created: {} by {}", created.id, principal.user_id);
        Ok(created)
    }

    pub async fn update(
        &self,
        principal: &Principal,
        event_id: &str,
        patch: UpdateEventFields,
    ) -> Result<Event, AppError> {
        let mut event = self
            .events
            .find_by_id(event_id)
            .await?
            .ok_or(AppError::NotFound("Event not found".into()))?;

        if !authorization::can_mutate_event(principal, &event) {
            return Err(AppError::Forbidden("Not authorized to update this event".into()));
        }

        if let Some(capacity) = patch.capacity {
            validate_capacity(capacity)?;
        }

        event.apply(patch);
        let updated = self.events.update(&event).await?;

        info!("Event updated: {}", updated.id);
        Ok(updated)
    }

    pub async fn delete(&self, principal: &Principal, event_id: &str) -> Result<(), AppError> {
        let event = self
            .events
            .find_by_id(event_id)
            .await?
            .ok_or(AppError::NotFound("Event not found".into()))?;

        if !authorization::can_mutate_event(principal, &event) {
            return Err(AppError::Forbidden("Not authorized to delete this event".into()));
        }

        self.events.delete_cascade(&event.id).await?;

        info!("Event deleted: {}", event.id);
        Ok(())
    }

    pub async fn get(&self, event_id: &str) -> Result<(Event, Option<User>), AppError> {
        let event = self
            .events
            .find_by_id(event_id)
            .await?
            .ok_or(AppError::NotFound("Event not found".into()))?;

        let coordinator = self.users.find_by_id(&event.coordinator_id).await?;
        Ok((event, coordinator))
    }

    pub async fn list(
        &self,
        filter: &EventFilter,
    ) -> Result<Vec<(Event, Option<User>)>, AppError> {
        let events = self.events.list(filter).await?;

        let mut coordinators: HashMap<String, Option<User>> = HashMap::new();
        let mut results = Vec::with_capacity(events.len());

        for event in events {
            let coordinator = match coordinators.get(&event.coordinator_id) {
                Some(cached) => cached.clone(),
                None => {
                    let fetched = self.users.find_by_id(&event.coordinator_id).await?;
                    coordinators.insert(event.coordinator_id.clone(), fetched.clone());
                    fetched
                }
            };
            results.push((event, coordinator));
        }

        Ok(results)
    }
}

fn validate_capacity(capacity: i32) -> Result<(), AppError> {
    if capacity < 1 {
        return Err(AppError::Validation("Capacity must be at least 1".into()));
    }
    Ok(())
}
