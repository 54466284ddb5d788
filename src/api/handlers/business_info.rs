use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::api::errors::{ApiError, FieldErrors};
use crate::api::middleware::auth::CurrentUser;
use crate::domain::business_info::WorkingHours;
use crate::domain::repositories::business_info_repository::{
    BusinessInfo, BusinessInfoPatch, BusinessInfoRepository,
};
use crate::domain::repositories::website_setup_repository::WebsiteSetupRepository;
use crate::infrastructure::repositories::{
    PostgresBusinessInfoRepository, PostgresWebsiteSetupRepository,
};

const ALREADY_EXISTS_MSG: &str = "Business info already exists. Use update endpoint.";

/// Base URL prefixed to stored logo paths when building absolute URLs
fn media_base_url() -> String {
    std::env::var("MEDIA_BASE_URL").unwrap_or_else(|_| "http://localhost:8000".to_string())
}

/// Full business info projection
///
/// `logo_url` is computed from the stored path reference; the writable
/// field set never includes it.
#[derive(Debug, Serialize)]
pub struct BusinessInfoResponse {
    pub id: Uuid,
    pub name: String,
    pub logo: Option<String>,
    pub logo_url: Option<String>,
    pub about: String,
    pub address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub contact_phone: String,
    pub contact_email: String,
    pub website: String,
    pub working_hours: WorkingHours,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<BusinessInfo> for BusinessInfoResponse {
    fn from(info: BusinessInfo) -> Self {
        let logo_url = info
            .logo
            .as_ref()
            .map(|path| format!("{}/media/{}", media_base_url().trim_end_matches('/'), path));

        Self {
            id: info.id,
            name: info.name,
            logo: info.logo,
            logo_url,
            about: info.about,
            address: info.address,
            latitude: info.latitude,
            longitude: info.longitude,
            contact_phone: info.contact_phone,
            contact_email: info.contact_email,
            website: info.website,
            working_hours: info.working_hours,
            is_published: info.is_published,
            created_at: info.created_at,
            updated_at: info.updated_at,
        }
    }
}

/// Get the caller's business info, creating an empty one if absent.
/// Returns null when the caller has no website setup at all.
///
/// GET /api/business-info/
pub async fn get_business_info(
    State(pool): State<PgPool>,
    CurrentUser(account): CurrentUser,
) -> Result<Json<Option<BusinessInfoResponse>>, ApiError> {
    let setups = PostgresWebsiteSetupRepository::new(pool.clone());
    let setup = match setups
        .find_by_account(account.id)
        .await
        .map_err(|e| ApiError::internal_server_error(format!("Database error: {}", e)))?
    {
        Some(setup) => setup,
        None => return Ok(Json(None)),
    };

    let info = PostgresBusinessInfoRepository::new(pool)
        .get_or_create(setup.id)
        .await
        .map_err(|e| ApiError::internal_server_error(format!("Database error: {}", e)))?;

    Ok(Json(Some(info.into())))
}

/// Create the caller's business info; rejected if one already exists
///
/// POST /api/business-info/
pub async fn create_business_info(
    State(pool): State<PgPool>,
    CurrentUser(account): CurrentUser,
    Json(fields): Json<BusinessInfoPatch>,
) -> Result<(StatusCode, Json<BusinessInfoResponse>), ApiError> {
    let setup = PostgresWebsiteSetupRepository::new(pool.clone())
        .get_or_create(account.id)
        .await
        .map_err(|e| ApiError::internal_server_error(format!("Database error: {}", e)))?;

    let repo = PostgresBusinessInfoRepository::new(pool);
    let existing = repo
        .find_by_setup(setup.id)
        .await
        .map_err(|e| ApiError::internal_server_error(format!("Database error: {}", e)))?;
    if existing.is_some() {
        return Err(ApiError::bad_request(ALREADY_EXISTS_MSG));
    }

    if fields.name.as_deref().map_or(true, str::is_empty) {
        return Err(ApiError::validation(FieldErrors::single(
            "name",
            "This field is required.",
        )));
    }

    let info = repo.create(setup.id, &fields).await.map_err(|e| {
        if e.contains("duplicate") || e.contains("unique") {
            // Lost a concurrent create race to the unique constraint
            ApiError::bad_request(ALREADY_EXISTS_MSG)
        } else {
            ApiError::internal_server_error(format!("Failed to create business info: {}", e))
        }
    })?;

    Ok((StatusCode::CREATED, Json(info.into())))
}

/// Merge the supplied fields onto the caller's business info
///
/// PATCH/PUT /api/business-info/
pub async fn update_business_info(
    State(pool): State<PgPool>,
    CurrentUser(account): CurrentUser,
    Json(patch): Json<BusinessInfoPatch>,
) -> Result<Json<BusinessInfoResponse>, ApiError> {
    let setup = PostgresWebsiteSetupRepository::new(pool.clone())
        .get_or_create(account.id)
        .await
        .map_err(|e| ApiError::internal_server_error(format!("Database error: {}", e)))?;

    let repo = PostgresBusinessInfoRepository::new(pool);
    let info = repo
        .get_or_create(setup.id)
        .await
        .map_err(|e| ApiError::internal_server_error(format!("Database error: {}", e)))?;

    let updated = repo
        .update(info.id, &patch)
        .await
        .map_err(|e| ApiError::internal_server_error(format!("Failed to update business info: {}", e)))?;

    Ok(Json(updated.into()))
}

/// Publish the caller's website; safe to call repeatedly
///
/// POST /api/business-info/publish/
pub async fn publish_business_info(
    State(pool): State<PgPool>,
    CurrentUser(account): CurrentUser,
) -> Result<Json<BusinessInfoResponse>, ApiError> {
    let setup = PostgresWebsiteSetupRepository::new(pool.clone())
        .get_or_create(account.id)
        .await
        .map_err(|e| ApiError::internal_server_error(format!("Database error: {}", e)))?;

    let repo = PostgresBusinessInfoRepository::new(pool);
    let info = repo
        .get_or_create(setup.id)
        .await
        .map_err(|e| ApiError::internal_server_error(format!("Database error: {}", e)))?;

    let published = repo
        .publish(info.id)
        .await
        .map_err(|e| ApiError::internal_server_error(format!("Failed to publish business info: {}", e)))?;

    Ok(Json(published.into()))
}
