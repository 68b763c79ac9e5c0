//! Utility routes.

use axum::{Json, Router, routing::get};
use chrono::Datelike;

use crate::AppState;

/// First year the budget system manages.
const MIN_MANAGEMENT_YEAR: i32 = 2022;

/// Creates the utility routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/utils/years", get(available_years))
}

/// GET `/utils/years` - manageable years, 2022 through current year + 2.
async fn available_years() -> Json<Vec<i32>> {
    let current_year = chrono::Utc::now().year();
    let max_year = current_year + 2;
    Json((MIN_MANAGEMENT_YEAR..=max_year).collect())
}
