use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::account::{BusinessType, Email};
use crate::domain::repositories::account_repository::{Account, AccountRepository, NewAccount};
use crate::domain::repositories::website_setup_repository::WebsiteSetup;
use crate::infrastructure::repositories::postgres_website_setup_repository::WebsiteSetupRow;

const ACCOUNT_COLUMNS: &str =
    "id, email, password_hash, name, business_type, created_at, updated_at";

/// Raw accounts row; converted into the domain record after
/// re-validating the stored email and business type.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct AccountRow {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub business_type: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<AccountRow> for Account {
    type Error = String;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        let email = Email::new(&row.email)
            .map_err(|e| format!("Invalid email from database: {}", e))?;
        let business_type = row
            .business_type
            .parse::<BusinessType>()
            .map_err(|e| format!("Invalid business type from database: {}", e))?;

        Ok(Account {
            id: row.id,
            email,
            password_hash: row.password_hash,
            name: row.name,
            business_type,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// PostgreSQL implementation of AccountRepository
pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    /// Creates a new PostgresAccountRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn create_with_setup(
        &self,
        account: NewAccount,
    ) -> Result<(Account, WebsiteSetup), String> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| format!("Failed to start transaction: {}", e))?;

        let account_row: AccountRow = sqlx::query_as(&format!(
            "INSERT INTO accounts (id, email, password_hash, name, business_type)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {ACCOUNT_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(account.email.as_str())
        .bind(&account.password_hash)
        .bind(&account.name)
        .bind(account.business_type.as_str())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| format!("Failed to create account: {}", e))?;

        let setup_row: WebsiteSetupRow = sqlx::query_as(
            "INSERT INTO website_setups (id, account_id)
             VALUES ($1, $2)
             RETURNING id, account_id, review_system, ai_chatbot, ambulance_ordering,
                       patient_portal, prescription_refill, template_id, is_paid,
                       total_price, created_at, updated_at",
        )
        .bind(Uuid::new_v4())
        .bind(account_row.id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| format!("Failed to create website setup: {}", e))?;

        tx.commit()
            .await
            .map_err(|e| format!("Failed to commit signup transaction: {}", e))?;

        Ok((account_row.try_into()?, setup_row.into()))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, String> {
        let row: Option<AccountRow> =
            sqlx::query_as(&format!("SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| format!("Failed to find account by id: {}", e))?;

        row.map(Account::try_from).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<Account>, String> {
        let row: Option<AccountRow> =
            sqlx::query_as(&format!("SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE email = $1"))
                .bind(email.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| format!("Failed to find account by email: {}", e))?;

        row.map(Account::try_from).transpose()
    }
}
