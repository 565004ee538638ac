use std::sync::Arc;

use crate::domain::models::{
    auth::Principal,
    event::EventStatus,
    registration::Registration,
};
use crate::domain::ports::{EventRepository, RegistrationRepository};
use crate::error::AppError;
use tracing::info;

/// Owns Registration records and the checks that gate their creation. The
/// check order is fixed: existence, open-for-registration, duplicate,
/// capacity. Reordering would change which error a caller observes.
pub struct RegistrationService {
    events: Arc<dyn EventRepository>,
    registrations: Arc<dyn RegistrationRepository>,
}

impl RegistrationService {
    pub fn new(
        events: Arc<dyn EventRepository>,
        registrations: Arc<dyn RegistrationRepository>,
    ) -> Self {
        Self { events, registrations }
    }

    pub async fn register(
        &self,
        principal: &Principal,
        event_id: &str,
        notes: Option<String>,
    ) -> Result<Registration, AppError> {
        let event = self
            .events
            .find_by_id(event_id)
            .await?
            .ok_or(AppError::NotFound("Event not found".into()))?;

        if event.status != EventStatus::Published {
            return Err(AppError::InvalidState(
                "Event is not open for registration".into(),
            ));
        }

        // Duplicate check matches any prior registration for the pair,
        // whatever its status. The unique index backs this up under
        // concurrent inserts.
        if self
            .registrations
            .find_by_event_and_user(event_id, &principal.user_id)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict("Already registered for this event".into()));
        }

        let registration =
            Registration::new(event.id.clone(), principal.user_id.clone(), notes);

        let created = self
            .registrations
            .insert_if_capacity(&registration, event.capacity)
            .await?;

        info!(
            "Registration created: {} (event {}, user {})",
            created.id, created.event_id, created.user_id
        );
        Ok(created)
    }
}
