// Repository interfaces (ports)
// Implemented by the infrastructure layer

pub mod account_repository;
pub mod business_info_repository;
pub mod website_setup_repository;

pub use account_repository::AccountRepository;
pub use business_info_repository::BusinessInfoRepository;
pub use website_setup_repository::WebsiteSetupRepository;
