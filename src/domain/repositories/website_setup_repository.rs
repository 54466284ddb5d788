use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

/// Website configuration record, one per account
///
/// Created by the system when the account is registered; clients can only
/// read it and merge partial updates onto it.
#[derive(Debug, Clone)]
pub struct WebsiteSetup {
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

/// Partial update for a website setup
///
/// Absent fields leave the stored value untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebsiteSetupPatch {
    pub review_system: Option<bool>,
    pub ai_chatbot: Option<bool>,
    pub ambulance_ordering: Option<bool>,
    pub patient_portal: Option<bool>,
    pub prescription_refill: Option<bool>,
    pub template_id: Option<i32>,
    pub is_paid: Option<bool>,
    pub total_price: Option<Decimal>,
}

/// Repository trait for the WebsiteSetup aggregate
#[async_trait]
pub trait WebsiteSetupRepository: Send + Sync {
    /// Find the setup owned by an account
    async fn find_by_account(&self, account_id: Uuid) -> Result<Option<WebsiteSetup>, String>;

    /// Find the setup owned by an account, inserting a default one if absent.
    ///
    /// Concurrent first reads are resolved by the unique constraint on
    /// `account_id`: the losing insert is absorbed and the winner's row is
    /// refetched.
    async fn get_or_create(&self, account_id: Uuid) -> Result<WebsiteSetup, String>;

    /// Merge the supplied fields onto an existing setup
    async fn update(&self, id: Uuid, patch: &WebsiteSetupPatch) -> Result<WebsiteSetup, String>;
}
