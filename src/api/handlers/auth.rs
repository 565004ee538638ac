use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::error::AppError;
use crate::api::dtos::{
    requests::{LoginRequest, RegisterUserRequest},
    responses::{AuthResponse, UserProfile},
};
use crate::domain::models::user::{User, UserRole};
use std::sync::Arc;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2, PasswordHash, PasswordVerifier,
};
use tracing::info;

pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.email.trim().is_empty() || !payload.email.contains('@') {
        return Err(AppError::Validation("A valid email is required".into()));
    }
    if payload.password.len() < 8 {
        return Err(AppError::Validation("Password must be at least 8 characters".into()));
    }

    if state.user_repo.find_by_email(&payload.email).await?.is_some() {
        return Err(AppError::Conflict("Email already exists".into()));
    }

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(payload.password.as_bytes(), &salt)
        .map_err(|_| AppError::Internal)?
        .to_string();

    let user = User::new(
        payload.email,
        password_hash,
        payload.first_name,
        payload.last_name,
        payload.role.unwrap_or(UserRole::User),
    );

    let created = state.user_repo.create(&user).await?;
    let token = state.auth_service.issue_access_token(&created)?;

    info!("User registered: {}", created.id);

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: UserProfile::from(&created),
        }),
    ))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    // Unknown email and wrong password are indistinguishable to the caller.
    let user = state.user_repo.find_by_email(&payload.email).await?
        .ok_or(AppError::Unauthorized)?;

    let parsed_hash = PasswordHash::new(&user.password_hash)
        .map_err(|_| AppError::Internal)?;

    Argon2::default().verify_password(payload.password.as_bytes(), &parsed_hash)
        .map_err(|_| AppError::Unauthorized)?;

    let token = state.auth_service.issue_access_token(&user)?;

    info!("User logged in: {}", user.id);

    Ok(Json(AuthResponse {
        token,
        user: UserProfile::from(&user),
    }))
}
