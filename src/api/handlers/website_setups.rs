use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::api::middleware::auth::CurrentUser;
use crate::domain::repositories::account_repository::Account;
use crate::domain::repositories::website_setup_repository::{
    WebsiteSetup, WebsiteSetupPatch, WebsiteSetupRepository,
};
use crate::infrastructure::repositories::PostgresWebsiteSetupRepository;

use super::auth::UserResponse;

/// Full website setup projection with nested account summary
#[derive(Debug, Serialize)]
pub struct WebsiteSetupResponse {
    pub id: Uuid,
    pub user: UserResponse,
    pub review_system: bool,
    pub ai_chatbot: bool,
    pub ambulance_ordering: bool,
    pub patient_portal: bool,
    pub prescription_refill: bool,
    pub template_id: Option<i32>,
    pub is_paid: bool,
    pub total_price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WebsiteSetupResponse {
    fn new(setup: WebsiteSetup, account: &Account) -> Self {
        Self {
            id: setup.id,
            user: UserResponse::from(account),
            review_system: setup.review_system,
            ai_chatbot: setup.ai_chatbot,
            ambulance_ordering: setup.ambulance_ordering,
            patient_portal: setup.patient_portal,
            prescription_refill: setup.prescription_refill,
            template_id: setup.template_id,
            is_paid: setup.is_paid,
            total_price: setup.total_price,
            created_at: setup.created_at,
            updated_at: setup.updated_at,
        }
    }
}

/// Get the caller's website setup, creating a default one if absent
///
/// GET /api/website-setups/
pub async fn get_website_setup(
    State(pool): State<PgPool>,
    CurrentUser(account): CurrentUser,
) -> Result<Json<WebsiteSetupResponse>, ApiError> {
    let repo = PostgresWebsiteSetupRepository::new(pool);
    let setup = repo
        .get_or_create(account.id)
        .await
        .map_err(|e| ApiError::internal_server_error(format!("Database error: {}", e)))?;

    Ok(Json(WebsiteSetupResponse::new(setup, &account)))
}

/// Merge the supplied fields onto the caller's website setup
///
/// PATCH/PUT /api/website-setups/
pub async fn update_website_setup(
    State(pool): State<PgPool>,
    CurrentUser(account): CurrentUser,
    Json(patch): Json<WebsiteSetupPatch>,
) -> Result<Json<WebsiteSetupResponse>, ApiError> {
    let repo = PostgresWebsiteSetupRepository::new(pool);
    let setup = repo
        .get_or_create(account.id)
        .await
        .map_err(|e| ApiError::internal_server_error(format!("Database error: {}", e)))?;

    let updated = repo
        .update(setup.id, &patch)
        .await
        .map_err(|e| ApiError::internal_server_error(format!("Failed to update website setup: {}", e)))?;

    Ok(Json(WebsiteSetupResponse::new(updated, &account)))
}
