use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::repositories::website_setup_repository::{
    WebsiteSetup, WebsiteSetupPatch, WebsiteSetupRepository,
};

const SETUP_COLUMNS: &str = "id, account_id, review_system, ai_chatbot, ambulance_ordering, \
     patient_portal, prescription_refill, template_id, is_paid, total_price, \
     created_at, updated_at";

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct WebsiteSetupRow {
    pub id: Uuid,
    pub account_id: Uuid,
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

impl From<WebsiteSetupRow> for WebsiteSetup {
    fn from(row: WebsiteSetupRow) -> Self {
        WebsiteSetup {
            id: row.id,
            account_id: row.account_id,
            review_system: row.review_system,
            ai_chatbot: row.ai_chatbot,
            ambulance_ordering: row.ambulance_ordering,
            patient_portal: row.patient_portal,
            prescription_refill: row.prescription_refill,
            template_id: row.template_id,
            is_paid: row.is_paid,
            total_price: row.total_price,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// PostgreSQL implementation of WebsiteSetupRepository
pub struct PostgresWebsiteSetupRepository {
    pool: PgPool,
}

impl PostgresWebsiteSetupRepository {
    /// Creates a new PostgresWebsiteSetupRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WebsiteSetupRepository for PostgresWebsiteSetupRepository {
    async fn find_by_account(&self, account_id: Uuid) -> Result<Option<WebsiteSetup>, String> {
        let row: Option<WebsiteSetupRow> = sqlx::query_as(&format!(
            "SELECT {SETUP_COLUMNS} FROM website_setups WHERE account_id = $1"
        ))
        .bind(account_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| format!("Failed to find website setup: {}", e))?;

        Ok(row.map(WebsiteSetup::from))
    }

    async fn get_or_create(&self, account_id: Uuid) -> Result<WebsiteSetup, String> {
        if let Some(setup) = self.find_by_account(account_id).await? {
            return Ok(setup);
        }

        // Insert with defaults; a concurrent insert for the same account is
        // absorbed by the unique constraint and resolved by the refetch.
        sqlx::query(
            "INSERT INTO website_setups (id, account_id)
             VALUES ($1, $2)
             ON CONFLICT (account_id) DO NOTHING",
        )
        .bind(Uuid::new_v4())
        .bind(account_id)
        .execute(&self.pool)
        .await
        .map_err(|e| format!("Failed to create website setup: {}", e))?;

        self.find_by_account(account_id)
            .await?
            .ok_or_else(|| "Website setup missing after insert".to_string())
    }

    async fn update(&self, id: Uuid, patch: &WebsiteSetupPatch) -> Result<WebsiteSetup, String> {
        let row: WebsiteSetupRow = sqlx::query_as(&format!(
            "UPDATE website_setups SET
                review_system = COALESCE($2, review_system),
                ai_chatbot = COALESCE($3, ai_chatbot),
                ambulance_ordering = COALESCE($4, ambulance_ordering),
                patient_portal = COALESCE($5, patient_portal),
                prescription_refill = COALESCE($6, prescription_refill),
                template_id = COALESCE($7, template_id),
                is_paid = COALESCE($8, is_paid),
                total_price = COALESCE($9, total_price),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {SETUP_COLUMNS}"
        ))
        .bind(id)
        .bind(patch.review_system)
        .bind(patch.ai_chatbot)
        .bind(patch.ambulance_ordering)
        .bind(patch.patient_portal)
        .bind(patch.prescription_refill)
        .bind(patch.template_id)
        .bind(patch.is_paid)
        .bind(patch.total_price)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| format!("Failed to update website setup: {}", e))?;

        Ok(row.into())
    }
}
