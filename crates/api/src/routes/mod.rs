//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod closing;
pub mod codes;
pub mod execution;
pub mod health;
pub mod projects;
pub mod report;
pub mod sap;
pub mod services;
pub mod utils;
pub mod vendors;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(vendors::routes())
        .merge(services::routes())
        .merge(codes::routes())
        .merge(projects::routes())
        .merge(execution::routes())
        .merge(sap::routes())
        .merge(closing::routes())
        .merge(report::routes())
        .merge(utils::routes())
}
