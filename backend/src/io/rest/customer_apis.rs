use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use tracing::{error, info};

use super::AppState;

/// Query parameter for the filtered customers table.
#[derive(Debug, Deserialize)]
pub struct CustomerSearchQuery {
    #[serde(default)]
    pub query: String,
}

/// Axum handler for GET /api/customers
pub async fn list_customer_names(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/customers");

    match state.dashboard.customer_names().await {
        Ok(customers) => (StatusCode::OK, Json(customers)).into_response(),
        Err(e) => {
            error!("customer list failed: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch all customers.",
            )
                .into_response()
        }
    }
}

/// Axum handler for GET /api/customers/filtered
pub async fn list_filtered_customers(
    State(state): State<AppState>,
    Query(search): Query<CustomerSearchQuery>,
) -> impl IntoResponse {
    info!("GET /api/customers/filtered - search: {:?}", search);

    match state.dashboard.filtered_customers(&search.query).await {
        Ok(rows) => (StatusCode::OK, Json(rows)).into_response(),
        Err(e) => {
            error!("customer table failed: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch customer table.",
            )
                .into_response()
        }
    }
}
