use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use tracing::{error, info};

use super::AppState;

/// Axum handler for GET /api/dashboard/revenue
pub async fn get_revenue(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/dashboard/revenue");

    match state.dashboard.revenue().await {
        Ok(revenue) => (StatusCode::OK, Json(revenue)).into_response(),
        Err(e) => {
            error!("revenue fetch failed: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch revenue data.",
            )
                .into_response()
        }
    }
}

/// Axum handler for GET /api/dashboard/latest-invoices
pub async fn get_latest_invoices(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/dashboard/latest-invoices");

    match state.dashboard.latest_invoices().await {
        Ok(invoices) => (StatusCode::OK, Json(invoices)).into_response(),
        Err(e) => {
            error!("latest invoices fetch failed: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch the latest invoices.",
            )
                .into_response()
        }
    }
}

/// Axum handler for GET /api/dashboard/cards
pub async fn get_card_data(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/dashboard/cards");

    match state.dashboard.card_data().await {
        Ok(cards) => (StatusCode::OK, Json(cards)).into_response(),
        Err(e) => {
            error!("card data fetch failed: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to load card data.").into_response()
        }
    }
}
