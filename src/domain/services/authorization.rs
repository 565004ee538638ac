use crate::domain::models::{auth::Principal, event::Event, user::UserRole};

/// Pure role/ownership decisions. No I/O; callers translate a denial into
/// the transport-level outcome after they have resolved the resource, so
/// "not found" and "forbidden" stay distinguishable.

pub fn can_create_event(principal: &Principal) -> bool {
    matches!(principal.role, UserRole::EventCoordinator | UserRole::Admin)
}

pub fn can_mutate_event(principal: &Principal, event: &Event) -> bool {
    principal.role == UserRole::Admin || principal.user_id == event.coordinator_id
}
