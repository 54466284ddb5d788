use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use sqlx::PgPool;

use crate::api::errors::ApiError;
use crate::auth::jwt::{secret_from_env, verify_token, TokenKind};
use crate::domain::repositories::account_repository::{Account, AccountRepository};
use crate::infrastructure::repositories::PostgresAccountRepository;

/// Authenticated-caller extractor for protected routes
///
/// Verifies the bearer access token and resolves the full account record,
/// so every handler receives the caller identity as an explicit parameter.
///
/// Usage:
/// ```ignore
/// async fn protected_handler(
///     CurrentUser(account): CurrentUser,
/// ) -> Result<String, ApiError> {
///     Ok(format!("Hello {}", account.name))
/// }
/// ```
pub struct CurrentUser(pub Account);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
    PgPool: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ApiError::unauthorized("Missing authorization header"))?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            ApiError::unauthorized("Invalid authorization format. Use: Bearer <token>")
        })?;

        let claims = verify_token(token, &secret_from_env(), TokenKind::Access)
            .map_err(|e| ApiError::unauthorized(format!("Invalid token: {}", e)))?;

        let pool = PgPool::from_ref(state);
        let account = PostgresAccountRepository::new(pool)
            .find_by_id(claims.sub)
            .await
            .map_err(|e| ApiError::internal_server_error(format!("Database error: {}", e)))?
            .ok_or_else(|| ApiError::unauthorized("Invalid token: unknown account"))?;

        Ok(CurrentUser(account))
    }
}
