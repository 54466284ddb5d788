// Repository implementations (data access layer)
// Adapters that implement domain repository interfaces

pub mod postgres_account_repository;
pub mod postgres_business_info_repository;
pub mod postgres_website_setup_repository;

pub use postgres_account_repository::PostgresAccountRepository;
pub use postgres_business_info_repository::PostgresBusinessInfoRepository;
pub use postgres_website_setup_repository::PostgresWebsiteSetupRepository;
