use serde::{Deserialize, Serialize};
use crate::domain::models::user::UserRole;

/// The authenticated actor, resolved from a bearer token. Every core
/// operation takes this explicitly; nothing reads ambient request state.
#[derive(Debug, Clone)]
pub struct Principal {
    pub user_id: String,
    pub role: UserRole,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub iss: String,
    pub sub: String,
    pub aud: String,
    pub exp: usize,
    pub iat: usize,
    pub role: UserRole,
}
