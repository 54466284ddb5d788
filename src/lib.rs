//! Medify Backend API Library
//!
//! Backend for the Medify website builder: accounts, per-account website
//! setups and business profiles, served as JSON over HTTP with JWT
//! bearer authentication.

pub mod api;
pub mod auth;
pub mod domain;
pub mod infrastructure;

use axum::{
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use api::handlers::{auth as auth_handlers, business_info, website_setups};

/// Builds the application router over a database pool.
///
/// Shared by the binary and the integration tests so both exercise the
/// same route table.
pub fn app(pool: PgPool) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(auth_handlers::health_check))
        // Discovery
        .route("/api/", get(auth_handlers::api_root))
        // Auth routes
        .route("/api/auth/signup/", post(auth_handlers::signup))
        .route("/api/auth/login/", post(auth_handlers::login))
        .route("/api/auth/me/", get(auth_handlers::me))
        .route("/api/auth/refresh/", post(auth_handlers::refresh))
        // Website setup (caller-scoped, no path parameters)
        .route(
            "/api/website-setups/",
            get(website_setups::get_website_setup)
                .patch(website_setups::update_website_setup)
                .put(website_setups::update_website_setup),
        )
        // Business info
        .route(
            "/api/business-info/",
            get(business_info::get_business_info)
                .post(business_info::create_business_info)
                .patch(business_info::update_business_info)
                .put(business_info::update_business_info),
        )
        .route(
            "/api/business-info/publish/",
            post(business_info::publish_business_info),
        )
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Shared state
        .with_state(pool)
}
