use crate::domain::models::{auth::Claims, user::User};
use crate::error::AppError;
use crate::config::Config;
use jsonwebtoken::{encode, EncodingKey, Header, Algorithm};
use chrono::{Utc, Duration};

pub const TOKEN_AUDIENCE: &str = "eventhub-web";

/// Issues EdDSA-signed access tokens carrying the principal's id and role.
/// Credential verification stays in the auth handler; this only signs.
pub struct AuthService {
    config: Config,
    encoding_key: EncodingKey,
}

impl AuthService {
    pub fn new(config: Config) -> Self {
        let encoding_key = EncodingKey::from_ed_pem(config.jwt_secret_key.as_bytes())
            .expect("Invalid JWT Private Key PEM");

        Self { config, encoding_key }
    }

    pub fn issue_access_token(&self, user: &User) -> Result<String, AppError> {
        let now = Utc::now();

        let claims = Claims {
            iss: self.config.auth_issuer.clone(),
            sub: user.id.clone(),
            aud: TOKEN_AUDIENCE.to_string(),
            exp: (now + Duration::hours(24)).timestamp() as usize,
            iat: now.timestamp() as usize,
            role: user.role,
        };

        encode(&Header::new(Algorithm::EdDSA), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("JWT encoding failed: {}", e);
            AppError::Internal
        })
    }
}
