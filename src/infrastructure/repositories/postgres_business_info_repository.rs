use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::business_info::WorkingHours;
use crate::domain::repositories::business_info_repository::{
    BusinessInfo, BusinessInfoPatch, BusinessInfoRepository,
};

const INFO_COLUMNS: &str = "id, website_setup_id, name, logo, about, address, latitude, \
     longitude, contact_phone, contact_email, website, working_hours, is_published, \
     created_at, updated_at";

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct BusinessInfoRow {
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
    pub working_hours: Json<WorkingHours>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<BusinessInfoRow> for BusinessInfo {
    fn from(row: BusinessInfoRow) -> Self {
        BusinessInfo {
            id: row.id,
            website_setup_id: row.website_setup_id,
            name: row.name,
            logo: row.logo,
            about: row.about,
            address: row.address,
            latitude: row.latitude,
            longitude: row.longitude,
            contact_phone: row.contact_phone,
            contact_email: row.contact_email,
            website: row.website,
            working_hours: row.working_hours.0,
            is_published: row.is_published,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// PostgreSQL implementation of BusinessInfoRepository
pub struct PostgresBusinessInfoRepository {
    pool: PgPool,
}

impl PostgresBusinessInfoRepository {
    /// Creates a new PostgresBusinessInfoRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BusinessInfoRepository for PostgresBusinessInfoRepository {
    async fn find_by_setup(
        &self,
        website_setup_id: Uuid,
    ) -> Result<Option<BusinessInfo>, String> {
        let row: Option<BusinessInfoRow> = sqlx::query_as(&format!(
            "SELECT {INFO_COLUMNS} FROM business_info WHERE website_setup_id = $1"
        ))
        .bind(website_setup_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| format!("Failed to find business info: {}", e))?;

        Ok(row.map(BusinessInfo::from))
    }

    async fn get_or_create(&self, website_setup_id: Uuid) -> Result<BusinessInfo, String> {
        if let Some(info) = self.find_by_setup(website_setup_id).await? {
            return Ok(info);
        }

        sqlx::query(
            "INSERT INTO business_info (id, website_setup_id)
             VALUES ($1, $2)
             ON CONFLICT (website_setup_id) DO NOTHING",
        )
        .bind(Uuid::new_v4())
        .bind(website_setup_id)
        .execute(&self.pool)
        .await
        .map_err(|e| format!("Failed to create business info: {}", e))?;

        self.find_by_setup(website_setup_id)
            .await?
            .ok_or_else(|| "Business info missing after insert".to_string())
    }

    async fn create(
        &self,
        website_setup_id: Uuid,
        fields: &BusinessInfoPatch,
    ) -> Result<BusinessInfo, String> {
        let working_hours = fields.working_hours.clone().unwrap_or_default();

        let row: BusinessInfoRow = sqlx::query_as(&format!(
            "INSERT INTO business_info (
                id, website_setup_id, name, logo, about, address, latitude,
                longitude, contact_phone, contact_email, website, working_hours,
                is_published
             )
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
             RETURNING {INFO_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(website_setup_id)
        .bind(fields.name.clone().unwrap_or_default())
        .bind(fields.logo.as_deref())
        .bind(fields.about.clone().unwrap_or_default())
        .bind(fields.address.clone().unwrap_or_default())
        .bind(fields.latitude)
        .bind(fields.longitude)
        .bind(fields.contact_phone.clone().unwrap_or_default())
        .bind(fields.contact_email.clone().unwrap_or_default())
        .bind(fields.website.clone().unwrap_or_default())
        .bind(Json(working_hours))
        .bind(fields.is_published.unwrap_or(false))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| format!("Failed to create business info: {}", e))?;

        Ok(row.into())
    }

    async fn update(&self, id: Uuid, patch: &BusinessInfoPatch) -> Result<BusinessInfo, String> {
        let row: BusinessInfoRow = sqlx::query_as(&format!(
            "UPDATE business_info SET
                name = COALESCE($2, name),
                logo = COALESCE($3, logo),
                about = COALESCE($4, about),
                address = COALESCE($5, address),
                latitude = COALESCE($6, latitude),
                longitude = COALESCE($7, longitude),
                contact_phone = COALESCE($8, contact_phone),
                contact_email = COALESCE($9, contact_email),
                website = COALESCE($10, website),
                working_hours = COALESCE($11, working_hours),
                is_published = COALESCE($12, is_published),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {INFO_COLUMNS}"
        ))
        .bind(id)
        .bind(patch.name.as_deref())
        .bind(patch.logo.as_deref())
        .bind(patch.about.as_deref())
        .bind(patch.address.as_deref())
        .bind(patch.latitude)
        .bind(patch.longitude)
        .bind(patch.contact_phone.as_deref())
        .bind(patch.contact_email.as_deref())
        .bind(patch.website.as_deref())
        .bind(patch.working_hours.clone().map(Json))
        .bind(patch.is_published)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| format!("Failed to update business info: {}", e))?;

        Ok(row.into())
    }

    async fn publish(&self, id: Uuid) -> Result<BusinessInfo, String> {
        let row: BusinessInfoRow = sqlx::query_as(&format!(
            "UPDATE business_info SET is_published = TRUE, updated_at = NOW()
             WHERE id = $1
             RETURNING {INFO_COLUMNS}"
        ))
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| format!("Failed to publish business info: {}", e))?;

        Ok(row.into())
    }
}
