// Request handlers, one module per capability group

pub mod auth;
pub mod business_info;
pub mod website_setups;
