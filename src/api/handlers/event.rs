use axum::{extract::{State, Path, Query}, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::{
    requests::{CreateEventRequest, EventListQuery, UpdateEventRequest},
    responses::{EventResponse, MessageResponse},
};
use crate::error::AppError;
use std::sync::Arc;

pub async fn create_event(
    State(state): State<Arc<AppState>>,
    AuthUser(principal): AuthUser,
    Json(payload): Json<CreateEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.event_service.create(&principal, payload.into()).await?;
    let coordinator = state.user_repo.find_by_id(&event.coordinator_id).await?;

    Ok((
        StatusCode::CREATED,
        Json(EventResponse::new(event, coordinator.as_ref())),
    ))
}

pub async fn list_events(
    State(state): State<Arc<AppState>>,
    Query(query): Query<EventListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let results = state.event_service.list(&query.into()).await?;

    let body: Vec<EventResponse> = results
        .into_iter()
        .map(|(event, coordinator)| EventResponse::new(event, coordinator.as_ref()))
        .collect();

    Ok(Json(body))
}

pub async fn get_event(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let (event, coordinator) = state.event_service.get(&event_id).await?;
    Ok(Json(EventResponse::new(event, coordinator.as_ref())))
}

pub async fn update_event(
    State(state): State<Arc<AppState>>,
    AuthUser(principal): AuthUser,
    Path(event_id): Path<String>,
    Json(payload): Json<UpdateEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.event_service.update(&principal, &event_id, payload.into()).await?;
    let coordinator = state.user_repo.find_by_id(&event.coordinator_id).await?;

    Ok(Json(EventResponse::new(event, coordinator.as_ref())))
}

pub async fn delete_event(
    State(state): State<Arc<AppState>>,
    AuthUser(principal): AuthUser,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.event_service.delete(&principal, &event_id).await?;

    Ok(Json(MessageResponse {
        message: "Event deleted successfully".to_string(),
    }))
}
