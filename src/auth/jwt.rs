// JWT token creation and verification
// Issues an access/refresh pair; access tokens expire after 1 hour,
// refresh tokens after 7 days.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which half of the credential pair a token is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Access => "access",
            TokenKind::Refresh => "refresh",
        }
    }
}

/// JWT claims structure
///
/// # Fields
/// * `sub` - Subject (account id)
/// * `exp` - Expiry time (seconds since epoch)
/// * `token_type` - "access" or "refresh"
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: Uuid,
    pub exp: usize,
    pub token_type: String,
}

/// Access + refresh tokens issued together on signup and login
#[derive(Debug, Serialize)]
pub struct TokenPair {
    pub refresh: String,
    pub access: String,
}

/// Reads the signing secret from the environment
pub fn secret_from_env() -> String {
    std::env::var("JWT_SECRET").unwrap_or_else(|_| "dev-secret-key".to_string())
}

/// Creates a single token of the given kind
///
/// # Arguments
/// * `account_id` - The account to encode in the 'sub' claim
/// * `secret` - The secret key for signing
/// * `kind` - Access (1h expiry) or Refresh (7d expiry)
pub fn create_token(account_id: Uuid, secret: &str, kind: TokenKind) -> Result<String, String> {
    let ttl = match kind {
        TokenKind::Access => Duration::hours(1),
        TokenKind::Refresh => Duration::days(7),
    };
    let claims = Claims {
        sub: account_id,
        exp: (Utc::now() + ttl).timestamp() as usize,
        token_type: kind.as_str().to_string(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )
    .map_err(|e| e.to_string())
}

/// Creates the access/refresh pair issued on signup and login
///
/// # Example
/// ```
/// use medify_api::auth::jwt::{create_token_pair, verify_token, TokenKind};
/// use uuid::Uuid;
///
/// let account_id = Uuid::new_v4();
/// let pair = create_token_pair(account_id, "your-secret-key").expect("valid pair");
/// let claims = verify_token(&pair.access, "your-secret-key", TokenKind::Access).unwrap();
/// assert_eq!(claims.sub, account_id);
/// ```
pub fn create_token_pair(account_id: Uuid, secret: &str) -> Result<TokenPair, String> {
    Ok(TokenPair {
        refresh: create_token(account_id, secret, TokenKind::Refresh)?,
        access: create_token(account_id, secret, TokenKind::Access)?,
    })
}

/// Verifies and decodes a token, enforcing the expected kind
///
/// # Returns
/// * `Ok(Claims)` - If the token is valid, unexpired and of the right kind
/// * `Err(String)` - Otherwise
pub fn verify_token(token: &str, secret: &str, expected: TokenKind) -> Result<Claims, String> {
    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| e.to_string())?;

    if claims.token_type != expected.as_str() {
        return Err(format!(
            "Expected {} token, got {}",
            expected.as_str(),
            claims.token_type
        ));
    }

    Ok(claims)
}
