//! Integration tests for the repository layer
//!
//! These tests verify that the Postgres repositories correctly interact with
//! the database: the transactional signup pair, one-to-one uniqueness,
//! get-or-create behavior, partial-update merges and cascade deletes.
//!
//! They need a PostgreSQL database; when DATABASE_URL is not set each test
//! skips with a notice so the suite stays runnable without one.

use medify_api::auth::password::hash_password;
use medify_api::domain::account::{BusinessType, Email};
use medify_api::domain::business_info::DayHours;
use medify_api::domain::repositories::account_repository::{
    Account, AccountRepository, NewAccount,
};
use medify_api::domain::repositories::business_info_repository::{
    BusinessInfoPatch, BusinessInfoRepository,
};
use medify_api::domain::repositories::website_setup_repository::{
    WebsiteSetup, WebsiteSetupPatch, WebsiteSetupRepository,
};
use medify_api::infrastructure::repositories::{
    PostgresAccountRepository, PostgresBusinessInfoRepository, PostgresWebsiteSetupRepository,
};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

/// Set up the test database pool; None when no database is configured
async fn try_setup_db() -> Option<PgPool> {
    let database_url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("skipping: DATABASE_URL not set");
            return None;
        }
    };

    let pool = PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to test database");

    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    Some(pool)
}

fn new_account(email: &str) -> NewAccount {
    NewAccount {
        email: Email::new(email).expect("valid email"),
        password_hash: hash_password("testpass123").expect("hash password"),
        name: "Test Clinic".to_string(),
        business_type: BusinessType::Hospital,
    }
}

async fn create_test_account(pool: &PgPool) -> (Account, WebsiteSetup) {
    let email = format!("repo-{}@test.com", Uuid::new_v4());
    PostgresAccountRepository::new(pool.clone())
        .create_with_setup(new_account(&email))
        .await
        .expect("Failed to create test account")
}

/// Cascade delete removes the setup and business info as well
async fn cleanup_account(pool: &PgPool, account_id: Uuid) {
    sqlx::query("DELETE FROM accounts WHERE id = $1")
        .bind(account_id)
        .execute(pool)
        .await
        .expect("Failed to cleanup test account");
}

#[tokio::test]
async fn test_create_with_setup_creates_both_records() {
    let Some(pool) = try_setup_db().await else { return };

    let (account, setup) = create_test_account(&pool).await;

    assert_eq!(setup.account_id, account.id);
    assert!(!setup.review_system);
    assert!(!setup.ai_chatbot);
    assert!(!setup.ambulance_ordering);
    assert!(!setup.patient_portal);
    assert!(!setup.prescription_refill);
    assert!(!setup.is_paid);
    assert_eq!(setup.template_id, None);
    assert_eq!(setup.total_price, Decimal::new(0, 2));

    let repo = PostgresAccountRepository::new(pool.clone());
    let found = repo
        .find_by_email(&account.email)
        .await
        .unwrap()
        .expect("account should exist");
    assert_eq!(found.id, account.id);
    assert_eq!(found.business_type, BusinessType::Hospital);

    cleanup_account(&pool, account.id).await;
}

#[tokio::test]
async fn test_duplicate_email_rejected_by_store() {
    let Some(pool) = try_setup_db().await else { return };

    let email = format!("repo-dup-{}@test.com", Uuid::new_v4());
    let repo = PostgresAccountRepository::new(pool.clone());
    let (account, _) = repo
        .create_with_setup(new_account(&email))
        .await
        .expect("first create succeeds");

    let err = repo
        .create_with_setup(new_account(&email))
        .await
        .expect_err("second create must fail");
    assert!(
        err.contains("duplicate") || err.contains("unique"),
        "unexpected error: {}",
        err
    );

    cleanup_account(&pool, account.id).await;
}

#[tokio::test]
async fn test_website_setup_get_or_create_is_stable() {
    let Some(pool) = try_setup_db().await else { return };

    let (account, setup) = create_test_account(&pool).await;
    let repo = PostgresWebsiteSetupRepository::new(pool.clone());

    let first = repo.get_or_create(account.id).await.unwrap();
    let second = repo.get_or_create(account.id).await.unwrap();

    // Reads return the signup-created row, never a new one
    assert_eq!(first.id, setup.id);
    assert_eq!(second.id, setup.id);

    cleanup_account(&pool, account.id).await;
}

#[tokio::test]
async fn test_website_setup_partial_update_merges() {
    let Some(pool) = try_setup_db().await else { return };

    let (account, setup) = create_test_account(&pool).await;
    let repo = PostgresWebsiteSetupRepository::new(pool.clone());

    let first_patch = WebsiteSetupPatch {
        review_system: Some(true),
        total_price: Some(Decimal::new(15000, 2)),
        template_id: Some(3),
        ..Default::default()
    };
    let updated = repo.update(setup.id, &first_patch).await.unwrap();
    assert!(updated.review_system);
    assert_eq!(updated.total_price, Decimal::new(15000, 2));
    assert_eq!(updated.template_id, Some(3));

    // Omitted fields keep the values the first patch set
    let second_patch = WebsiteSetupPatch {
        ai_chatbot: Some(true),
        ..Default::default()
    };
    let updated = repo.update(setup.id, &second_patch).await.unwrap();
    assert!(updated.ai_chatbot);
    assert!(updated.review_system);
    assert_eq!(updated.total_price, Decimal::new(15000, 2));
    assert_eq!(updated.template_id, Some(3));
    assert!(!updated.is_paid);

    cleanup_account(&pool, account.id).await;
}

#[tokio::test]
async fn test_business_info_get_or_create_defaults() {
    let Some(pool) = try_setup_db().await else { return };

    let (account, setup) = create_test_account(&pool).await;
    let repo = PostgresBusinessInfoRepository::new(pool.clone());

    let info = repo.get_or_create(setup.id).await.unwrap();
    assert_eq!(info.website_setup_id, setup.id);
    assert_eq!(info.name, "");
    assert_eq!(info.logo, None);
    assert!(info.working_hours.is_empty());
    assert!(!info.is_published);

    let again = repo.get_or_create(setup.id).await.unwrap();
    assert_eq!(again.id, info.id);

    cleanup_account(&pool, account.id).await;
}

#[tokio::test]
async fn test_business_info_second_create_hits_unique_constraint() {
    let Some(pool) = try_setup_db().await else { return };

    let (account, setup) = create_test_account(&pool).await;
    let repo = PostgresBusinessInfoRepository::new(pool.clone());

    let fields = BusinessInfoPatch {
        name: Some("City Pharmacy".to_string()),
        ..Default::default()
    };
    repo.create(setup.id, &fields).await.expect("first create succeeds");

    let err = repo
        .create(setup.id, &fields)
        .await
        .expect_err("second create must fail");
    assert!(
        err.contains("duplicate") || err.contains("unique"),
        "unexpected error: {}",
        err
    );

    cleanup_account(&pool, account.id).await;
}

#[tokio::test]
async fn test_business_info_update_merges_supplied_fields() {
    let Some(pool) = try_setup_db().await else { return };

    let (account, setup) = create_test_account(&pool).await;
    let repo = PostgresBusinessInfoRepository::new(pool.clone());

    let mut hours = std::collections::HashMap::new();
    hours.insert(
        "monday".to_string(),
        DayHours {
            open: Some("09:00".to_string()),
            close: Some("17:00".to_string()),
            closed: false,
        },
    );

    let created = repo
        .create(
            setup.id,
            &BusinessInfoPatch {
                name: Some("City Pharmacy".to_string()),
                about: Some("Open late".to_string()),
                working_hours: Some(hours.clone()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(created.working_hours, hours);

    let updated = repo
        .update(
            created.id,
            &BusinessInfoPatch {
                address: Some("1 Main St".to_string()),
                latitude: Some(47.6),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.address, "1 Main St");
    assert_eq!(updated.latitude, Some(47.6));
    assert_eq!(updated.longitude, None);
    assert_eq!(updated.about, "Open late");
    assert_eq!(updated.name, "City Pharmacy");
    assert_eq!(updated.working_hours, hours);

    cleanup_account(&pool, account.id).await;
}

#[tokio::test]
async fn test_publish_sets_only_the_flag() {
    let Some(pool) = try_setup_db().await else { return };

    let (account, setup) = create_test_account(&pool).await;
    let repo = PostgresBusinessInfoRepository::new(pool.clone());

    let created = repo
        .create(
            setup.id,
            &BusinessInfoPatch {
                name: Some("City Pharmacy".to_string()),
                about: Some("Open late".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(!created.is_published);

    let published = repo.publish(created.id).await.unwrap();
    assert!(published.is_published);
    assert_eq!(published.name, created.name);
    assert_eq!(published.about, created.about);
    assert_eq!(published.created_at, created.created_at);

    let republished = repo.publish(created.id).await.unwrap();
    assert!(republished.is_published);
    assert_eq!(republished.name, published.name);

    cleanup_account(&pool, account.id).await;
}

#[tokio::test]
async fn test_cascade_delete_from_account() {
    let Some(pool) = try_setup_db().await else { return };

    let (account, setup) = create_test_account(&pool).await;
    let info_repo = PostgresBusinessInfoRepository::new(pool.clone());
    let info = info_repo.get_or_create(setup.id).await.unwrap();

    cleanup_account(&pool, account.id).await;

    let setups = PostgresWebsiteSetupRepository::new(pool.clone());
    assert!(setups.find_by_account(account.id).await.unwrap().is_none());
    assert!(info_repo.find_by_setup(setup.id).await.unwrap().is_none());
    assert!(info_repo.find_by_setup(info.website_setup_id).await.unwrap().is_none());
}
