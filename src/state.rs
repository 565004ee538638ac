use std::sync::Arc;
use crate::domain::ports::{EventRepository, RegistrationRepository, UserRepository};
use crate::domain::services::{
    auth_service::AuthService,
    event_service::EventService,
    registration_service::RegistrationService,
};
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub user_repo: Arc<dyn UserRepository>,
    pub event_repo: Arc<dyn EventRepository>,
    pub registration_repo: Arc<dyn RegistrationRepository>,
    pub auth_service: Arc<AuthService>,
    pub event_service: Arc<EventService>,
    pub registration_service: Arc<RegistrationService>,
}
