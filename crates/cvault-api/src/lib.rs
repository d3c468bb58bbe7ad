//! Axum HTTP API server.
//!
//! This crate provides:
//! - Bearer-token authentication (HS256, users from the environment)
//! - Folder and video endpoints over the catalog
//! - Rate limiting and security headers
//! - Prometheus metrics

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod state;

pub use auth::{AuthUser, TokenAuth};
pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
