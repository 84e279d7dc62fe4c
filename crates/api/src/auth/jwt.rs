use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use onboard_core::types::EmployeeId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

const DEFAULT_ACCESS_EXPIRY_MINS: i64 = 30;

/// Service tokens are short-lived regardless of the access-token expiry.
pub const SERVICE_TOKEN_EXPIRY_SECS: i64 = 3600;

/// JWT claims carried by every issued token.
///
/// For employee tokens `sub` is the employee UUID; for service tokens it is
/// the service name and `service` is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
    pub jti: String,
    #[serde(default)]
    pub service: bool,
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expiry_mins: i64,
}

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is missing or empty. A guessable default
    /// would silently break token security.
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET").expect("JWT_SECRET must be set");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let access_token_expiry_mins: i64 = std::env::var("JWT_ACCESS_EXPIRY_MINS")
            .unwrap_or_else(|_| DEFAULT_ACCESS_EXPIRY_MINS.to_string())
            .parse()
            .expect("JWT_ACCESS_EXPIRY_MINS must be a valid i64");

        Self {
            secret,
            access_token_expiry_mins,
        }
    }
}

/// Generate an access token for an authenticated employee.
pub fn generate_access_token(
    employee_id: EmployeeId,
    role: &str,
    config: &JwtConfig,
) -> AppResult<String> {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: employee_id.to_string(),
        role: role.to_string(),
        exp: now + config.access_token_expiry_mins * 60,
        iat: now,
        jti: Uuid::new_v4().to_string(),
        service: false,
    };
    sign(&claims, config)
}

/// Generate a token for a named service integration acting with `role`.
pub fn generate_service_token(
    service_name: &str,
    role: &str,
    config: &JwtConfig,
) -> AppResult<String> {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: service_name.to_string(),
        role: role.to_string(),
        exp: now + SERVICE_TOKEN_EXPIRY_SECS,
        iat: now,
        jti: Uuid::new_v4().to_string(),
        service: true,
    };
    sign(&claims, config)
}

fn sign(claims: &Claims, config: &JwtConfig) -> AppResult<String> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .map_err(|e| AppError::InternalError(format!("failed to sign token: {e}")))
}

/// Validate a token and return its claims. Expiry is checked by the decoder.
pub fn validate_token(token: &str, config: &JwtConfig) -> Result<Claims, jsonwebtoken::errors::Error> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(data.claims)
}
