use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::business_info::WorkingHours;

/// Public business profile, one per website setup
#[derive(Debug, Clone)]
pub struct BusinessInfo {
    pub id: Uuid,
    pub website_setup_id: Uuid,
    pub name: String,
    pub logo: Option<String>,
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

/// Writable business info fields
///
/// Used both for the initial create (absent fields fall back to defaults)
/// and for partial updates (absent fields keep the stored value). The
/// computed logo URL is read-side only and deliberately not accepted here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BusinessInfoPatch {
    pub name: Option<String>,
    pub logo: Option<String>,
    pub about: Option<String>,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
    pub website: Option<String>,
    pub working_hours: Option<WorkingHours>,
    pub is_published: Option<bool>,
}

/// Repository trait for the BusinessInfo aggregate
#[async_trait]
pub trait BusinessInfoRepository: Send + Sync {
    /// Find the profile attached to a website setup
    async fn find_by_setup(&self, website_setup_id: Uuid)
        -> Result<Option<BusinessInfo>, String>;

    /// Find the profile attached to a website setup, inserting an empty
    /// unpublished one if absent. Concurrent first reads are resolved by the
    /// unique constraint on `website_setup_id`.
    async fn get_or_create(&self, website_setup_id: Uuid) -> Result<BusinessInfo, String>;

    /// Create the profile for a website setup.
    ///
    /// Fails with an error mentioning the unique constraint when one already
    /// exists; callers translate that into the "already exists" rejection.
    async fn create(
        &self,
        website_setup_id: Uuid,
        fields: &BusinessInfoPatch,
    ) -> Result<BusinessInfo, String>;

    /// Merge the supplied fields onto an existing profile
    async fn update(&self, id: Uuid, patch: &BusinessInfoPatch) -> Result<BusinessInfo, String>;

    /// Set the published flag, leaving every other field untouched.
    /// Safe to call repeatedly.
    async fn publish(&self, id: Uuid) -> Result<BusinessInfo, String>;
}
