pub mod auth_service;
pub mod authorization;
pub mod event_service;
pub mod registration_service;
