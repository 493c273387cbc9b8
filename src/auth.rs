//! Password hashing, session tokens and the authentication middleware.
//!
//! Tokens are HS256 JWTs carrying the account id, the role captured at login
//! time and an expiry. Role captured in the token is advisory only: the
//! admin gate re-reads the account before letting a request through, so a
//! demoted account cannot keep using an old token for `/admin` routes.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use axum::{
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::Next,
    response::Response,
};
use bcrypt::{DEFAULT_COST, hash, verify};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    dao::models::{Role, UserEntity},
    error::{AppError, ServiceError},
    state::SharedState,
};

/// Claims embedded in an issued session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Account id the token was issued to.
    pub sub: Uuid,
    /// Role held by the account at login time.
    pub role: Role,
    /// Expiry as seconds since the unix epoch.
    pub exp: usize,
}

/// Caller identity, inserted into request extensions by [`require_auth`].
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    /// Authenticated account id.
    pub id: Uuid,
    /// Role carried in the token.
    pub role: Role,
}

/// Hash a clear-text password for storage.
pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
    hash(password, DEFAULT_COST)
}

/// Check a clear-text password against a stored hash.
pub fn verify_password(password: &str, hashed: &str) -> Result<bool, bcrypt::BcryptError> {
    verify(password, hashed)
}

/// Issue a signed session token for `user`, valid for `ttl`.
pub fn issue_token(
    secret: &[u8],
    ttl: Duration,
    user: &UserEntity,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as usize;
    let claims = Claims {
        sub: user.id,
        role: user.role,
        exp: now + ttl.as_secs() as usize,
    };

    encode(&Header::default(), &claims, &EncodingKey::from_secret(secret))
}

/// Decode and verify a session token, returning its claims.
pub fn verify_token(secret: &[u8], token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret),
        &Validation::new(Algorithm::HS256),
    )?;
    Ok(data.claims)
}

/// Middleware requiring a valid bearer token. Exposes the caller to handlers
/// as an [`AuthUser`] request extension.
pub async fn require_auth(
    State(state): State<SharedState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("missing authorization header".into()))?;

    let token = header_value
        .strip_prefix("Bearer ")
        .ok_or_else(|| {
            AppError::Unauthorized("authorization header must use the Bearer scheme".into())
        })?;

    let claims = verify_token(state.config().jwt_secret.as_bytes(), token)
        .map_err(|_| AppError::Unauthorized("invalid or expired token".into()))?;

    req.extensions_mut().insert(AuthUser {
        id: claims.sub,
        role: claims.role,
    });

    Ok(next.run(req).await)
}

/// Middleware requiring the authenticated account to hold the admin role.
///
/// Runs after [`require_auth`] and checks the role stored today, not the one
/// baked into the token.
pub async fn require_admin(
    State(state): State<SharedState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let auth = req
        .extensions()
        .get::<AuthUser>()
        .copied()
        .ok_or_else(|| AppError::Unauthorized("authentication required".into()))?;

    let store = state.require_store().await.map_err(AppError::from)?;

    let user = store
        .find_user(auth.id)
        .await
        .map_err(ServiceError::from)
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::Unauthorized("unknown account".into()))?;

    if user.role != Role::Admin {
        return Err(AppError::Forbidden("admin role required".into()));
    }

    Ok(next.run(req).await)
}
