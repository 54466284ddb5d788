use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::account::{BusinessType, Email};
use crate::domain::repositories::website_setup_repository::WebsiteSetup;

/// Account data for persistence
///
/// One record per registered user; the email doubles as the login
/// identifier and is unique at the store level.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: Uuid,
    pub email: Email,
    pub password_hash: String,
    pub name: String,
    pub business_type: BusinessType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to register a new account
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: Email,
    pub password_hash: String,
    pub name: String,
    pub business_type: BusinessType,
}

/// Repository trait for the Account aggregate
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Create an account together with its companion website setup.
    ///
    /// Both rows are written in one transaction so an account can never be
    /// observed without its setup. A duplicate email surfaces as an error
    /// mentioning the store's unique constraint.
    async fn create_with_setup(&self, account: NewAccount)
        -> Result<(Account, WebsiteSetup), String>;

    /// Find an account by ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, String>;

    /// Find an account by email address
    async fn find_by_email(&self, email: &Email) -> Result<Option<Account>, String>;
}
