use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sqlx::PgPool;
use uuid::Uuid;

use crate::api::errors::{ApiError, FieldErrors};
use crate::api::middleware::auth::CurrentUser;
use crate::auth::jwt::{
    create_token, create_token_pair, secret_from_env, verify_token, TokenKind, TokenPair,
};
use crate::auth::password::{hash_password, verify_password};
use crate::domain::account::{BusinessType, Email};
use crate::domain::repositories::account_repository::{Account, AccountRepository, NewAccount};
use crate::infrastructure::repositories::PostgresAccountRepository;

/// Lower bound of the password policy; the rest is delegated to the client
const MIN_PASSWORD_LEN: usize = 8;

const REQUIRED_MSG: &str = "This field is required.";

/// Request body for user registration
///
/// Every field is optional at the parse stage so that missing values surface
/// as field-keyed validation errors rather than a deserialization failure.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub password_confirm: Option<String>,
    pub name: Option<String>,
    pub business_type: Option<String>,
}

/// Public projection of an account; the password hash is never serialized
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub business_type: BusinessType,
    pub created_at: DateTime<Utc>,
}

impl From<&Account> for UserResponse {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            email: account.email.to_string(),
            name: account.name.clone(),
            business_type: account.business_type,
            created_at: account.created_at,
        }
    }
}

/// Response from successful registration
#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub user: UserResponse,
    pub tokens: TokenPair,
    pub website_setup_id: Uuid,
}

/// Request body for user login
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Response from successful login
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: UserResponse,
    pub tokens: TokenPair,
}

/// Request body for the credential refresh exchange
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh: Option<String>,
}

/// Response carrying a fresh access token
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub access: String,
}

#[derive(Debug)]
struct ValidatedSignup {
    email: Email,
    password: String,
    name: String,
    business_type: BusinessType,
}

fn validate_signup(req: &SignupRequest) -> Result<ValidatedSignup, FieldErrors> {
    let mut errors = FieldErrors::new();

    let email = match req.email.as_deref() {
        None | Some("") => {
            errors.add("email", REQUIRED_MSG);
            None
        }
        Some(raw) => match Email::new(raw) {
            Ok(email) => Some(email),
            Err(_) => {
                errors.add("email", "Enter a valid email address.");
                None
            }
        },
    };

    let password = match req.password.as_deref() {
        None | Some("") => {
            errors.add("password", REQUIRED_MSG);
            None
        }
        Some(raw) if raw.len() < MIN_PASSWORD_LEN => {
            errors.add(
                "password",
                format!(
                    "This password is too short. It must contain at least {} characters.",
                    MIN_PASSWORD_LEN
                ),
            );
            None
        }
        Some(raw) => Some(raw.to_string()),
    };

    match req.password_confirm.as_deref() {
        None | Some("") => errors.add("password_confirm", REQUIRED_MSG),
        Some(confirm) => {
            if let Some(password) = &password {
                if password != confirm {
                    errors.add("password", "Password fields didn't match.");
                }
            }
        }
    }

    let name = match req.name.as_deref() {
        None | Some("") => {
            errors.add("name", REQUIRED_MSG);
            None
        }
        Some(raw) => Some(raw.to_string()),
    };

    let business_type = match req.business_type.as_deref() {
        None | Some("") => {
            errors.add("business_type", REQUIRED_MSG);
            None
        }
        Some(raw) => match raw.parse::<BusinessType>() {
            Ok(bt) => Some(bt),
            Err(_) => {
                errors.add("business_type", format!("\"{}\" is not a valid choice.", raw));
                None
            }
        },
    };

    if !errors.is_empty() {
        return Err(errors);
    }

    // All four are present once the error map is empty
    Ok(ValidatedSignup {
        email: email.unwrap(),
        password: password.unwrap(),
        name: name.unwrap(),
        business_type: business_type.unwrap(),
    })
}

/// Register a new account and its companion website setup
///
/// POST /api/auth/signup/
pub async fn signup(
    State(pool): State<PgPool>,
    Json(req): Json<SignupRequest>,
) -> Result<(StatusCode, Json<SignupResponse>), ApiError> {
    let valid = validate_signup(&req).map_err(ApiError::validation)?;

    let password_hash = hash_password(&valid.password)
        .map_err(|e| ApiError::internal_server_error(format!("Failed to hash password: {}", e)))?;

    let repo = PostgresAccountRepository::new(pool);
    let (account, setup) = repo
        .create_with_setup(NewAccount {
            email: valid.email,
            password_hash,
            name: valid.name,
            business_type: valid.business_type,
        })
        .await
        .map_err(|e| {
            if e.contains("duplicate") || e.contains("unique") {
                ApiError::validation(FieldErrors::single(
                    "email",
                    "user with this email already exists.",
                ))
            } else {
                ApiError::internal_server_error(format!("Failed to create account: {}", e))
            }
        })?;

    let tokens = create_token_pair(account.id, &secret_from_env())
        .map_err(|e| ApiError::internal_server_error(format!("Failed to create tokens: {}", e)))?;

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            user: UserResponse::from(&account),
            tokens,
            website_setup_id: setup.id,
        }),
    ))
}

/// Login with email and password
///
/// POST /api/auth/login/
pub async fn login(
    State(pool): State<PgPool>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let (email, password) = match (req.email.as_deref(), req.password.as_deref()) {
        (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
            (email, password)
        }
        _ => return Err(ApiError::bad_request("Email and password are required")),
    };

    // Unknown email, malformed email and wrong password all produce the same
    // response so callers cannot probe which addresses are registered.
    let invalid_credentials = || ApiError::unauthorized("Invalid email or password");

    let email = match Email::new(email) {
        Ok(email) => email,
        Err(_) => return Err(invalid_credentials()),
    };

    let repo = PostgresAccountRepository::new(pool);
    let account = repo
        .find_by_email(&email)
        .await
        .map_err(|e| ApiError::internal_server_error(format!("Database error: {}", e)))?
        .ok_or_else(invalid_credentials)?;

    let valid = verify_password(password, &account.password_hash).map_err(|e| {
        ApiError::internal_server_error(format!("Password verification failed: {}", e))
    })?;

    if !valid {
        return Err(invalid_credentials());
    }

    let tokens = create_token_pair(account.id, &secret_from_env())
        .map_err(|e| ApiError::internal_server_error(format!("Failed to create tokens: {}", e)))?;

    Ok(Json(LoginResponse {
        user: UserResponse::from(&account),
        tokens,
    }))
}

/// Get the authenticated caller's account
///
/// GET /api/auth/me/
pub async fn me(CurrentUser(account): CurrentUser) -> Json<UserResponse> {
    Json(UserResponse::from(&account))
}

/// Exchange a refresh token for a fresh access token
///
/// POST /api/auth/refresh/
pub async fn refresh(Json(req): Json<RefreshRequest>) -> Result<Json<RefreshResponse>, ApiError> {
    let token = req
        .refresh
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::validation(FieldErrors::single("refresh", REQUIRED_MSG)))?;

    let secret = secret_from_env();
    let claims = verify_token(&token, &secret, TokenKind::Refresh)
        .map_err(|_| ApiError::unauthorized("Invalid or expired refresh token"))?;

    let access = create_token(claims.sub, &secret, TokenKind::Access)
        .map_err(|e| ApiError::internal_server_error(format!("Failed to create token: {}", e)))?;

    Ok(Json(RefreshResponse { access }))
}

/// Root endpoint showing API information
///
/// GET /api/
pub async fn api_root() -> Json<Value> {
    Json(json!({
        "message": "Medify Backend API",
        "version": "1.0.0",
        "endpoints": {
            "authentication": {
                "signup": "/api/auth/signup/",
                "login": "/api/auth/login/",
                "me": "/api/auth/me/",
                "refresh": "/api/auth/refresh/",
            },
            "website_setup": {
                "get": "/api/website-setups/",
                "update": "/api/website-setups/",
            },
            "business_info": {
                "get": "/api/business-info/",
                "create": "/api/business-info/",
                "update": "/api/business-info/",
                "publish": "/api/business-info/publish/",
            },
            "admin": "/admin/",
        },
        "documentation": "See README.md for detailed API documentation",
    }))
}

/// Health check endpoint
///
/// GET /health
pub async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_request() -> SignupRequest {
        SignupRequest {
            email: Some("clinic@example.com".to_string()),
            password: Some("hunter2hunter2".to_string()),
            password_confirm: Some("hunter2hunter2".to_string()),
            name: Some("City Clinic".to_string()),
            business_type: Some("hospital".to_string()),
        }
    }

    fn error_fields(errors: FieldErrors) -> std::collections::HashMap<String, Vec<String>> {
        match ApiError::validation(errors).fields {
            Some(fields) => fields,
            None => panic!("validation error without fields"),
        }
    }

    #[test]
    fn valid_signup_passes() {
        let valid = validate_signup(&full_request()).expect("valid signup");
        assert_eq!(valid.email.as_str(), "clinic@example.com");
        assert_eq!(valid.business_type, BusinessType::Hospital);
    }

    #[test]
    fn mismatched_passwords_keyed_under_password() {
        let mut req = full_request();
        req.password_confirm = Some("something-else".to_string());

        let fields = error_fields(validate_signup(&req).unwrap_err());
        assert_eq!(fields["password"], vec!["Password fields didn't match."]);
    }

    #[test]
    fn missing_fields_are_all_reported() {
        let req = SignupRequest {
            email: None,
            password: None,
            password_confirm: None,
            name: None,
            business_type: None,
        };

        let fields = error_fields(validate_signup(&req).unwrap_err());
        for key in ["email", "password", "password_confirm", "name", "business_type"] {
            assert_eq!(fields[key], vec![REQUIRED_MSG], "missing {}", key);
        }
    }

    #[test]
    fn short_password_rejected() {
        let mut req = full_request();
        req.password = Some("short".to_string());
        req.password_confirm = Some("short".to_string());

        let fields = error_fields(validate_signup(&req).unwrap_err());
        assert!(fields["password"][0].contains("too short"));
    }

    #[test]
    fn invalid_email_rejected() {
        let mut req = full_request();
        req.email = Some("not-an-email".to_string());

        let fields = error_fields(validate_signup(&req).unwrap_err());
        assert_eq!(fields["email"], vec!["Enter a valid email address."]);
    }

    #[test]
    fn unknown_business_type_rejected() {
        let mut req = full_request();
        req.business_type = Some("clinic".to_string());

        let fields = error_fields(validate_signup(&req).unwrap_err());
        assert_eq!(fields["business_type"], vec!["\"clinic\" is not a valid choice."]);
    }
}
