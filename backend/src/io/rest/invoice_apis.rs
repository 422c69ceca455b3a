use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use shared::{FormOutcome, InvoiceForm};
use tracing::{error, info};

use crate::domain::revalidation::INVOICES_VIEW;
use crate::domain::validation;

use super::AppState;

/// Query parameters for the filtered invoice endpoints.
#[derive(Debug, Deserialize)]
pub struct InvoiceSearchQuery {
    #[serde(default)]
    pub query: String,
    pub page: Option<u32>,
}

/// Axum handler for GET /api/invoices
pub async fn list_invoices(
    State(state): State<AppState>,
    Query(search): Query<InvoiceSearchQuery>,
) -> impl IntoResponse {
    info!("GET /api/invoices - search: {:?}", search);

    match state
        .dashboard
        .filtered_invoices(&search.query, search.page.unwrap_or(1))
        .await
    {
        Ok(page) => {
            // the list was just re-fetched, so any stale mark is satisfied
            state.views.clear(INVOICES_VIEW);
            (StatusCode::OK, Json(page)).into_response()
        }
        Err(e) => {
            error!("invoice search failed: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch invoices.").into_response()
        }
    }
}

/// Axum handler for GET /api/invoices/pages
pub async fn get_invoice_pages(
    State(state): State<AppState>,
    Query(search): Query<InvoiceSearchQuery>,
) -> impl IntoResponse {
    info!("GET /api/invoices/pages - search: {:?}", search);

    match state.dashboard.invoice_pages(&search.query).await {
        Ok(pages) => (StatusCode::OK, Json(pages)).into_response(),
        Err(e) => {
            error!("invoice page count failed: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch total number of invoices.",
            )
                .into_response()
        }
    }
}

/// Axum handler for GET /api/invoices/:id
pub async fn get_invoice(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/invoices/{}", id);

    match state.dashboard.invoice_by_id(&id).await {
        Ok(invoice) => (StatusCode::OK, Json(invoice)).into_response(),
        Err(e) => {
            error!("invoice fetch failed: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch invoice.").into_response()
        }
    }
}

/// Axum handler for POST /api/invoices — the create-invoice form action.
///
/// Validation failures answer 422 with the field-level error set; once a
/// form passes, the response is always the tri-state outcome.
pub async fn create_invoice(
    State(state): State<AppState>,
    Json(form): Json<InvoiceForm>,
) -> impl IntoResponse {
    info!("POST /api/invoices - customer: {}", form.customer_id);

    let input = match validation::validate_invoice_create(&form) {
        Ok(input) => input,
        Err(failure) => return (StatusCode::UNPROCESSABLE_ENTITY, Json(failure)).into_response(),
    };

    match state.invoices.create_invoice(&input).await {
        Ok(invoice) => (StatusCode::OK, Json(FormOutcome::success(invoice))).into_response(),
        Err(e) => {
            error!("invoice create failed: {:?}", e);
            (StatusCode::OK, Json(FormOutcome::failure(e.form_message()))).into_response()
        }
    }
}

/// Axum handler for PUT /api/invoices/:id — the update-invoice form action.
pub async fn update_invoice(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(form): Json<InvoiceForm>,
) -> impl IntoResponse {
    info!("PUT /api/invoices/{} - customer: {}", id, form.customer_id);

    let update = match validation::validate_invoice_update(&id, &form) {
        Ok(update) => update,
        Err(failure) => return (StatusCode::UNPROCESSABLE_ENTITY, Json(failure)).into_response(),
    };

    match state.invoices.update_invoice(&update).await {
        Ok(invoice) => (StatusCode::OK, Json(FormOutcome::success(invoice))).into_response(),
        Err(e) => {
            error!("invoice update failed: {:?}", e);
            (StatusCode::OK, Json(FormOutcome::failure(e.form_message()))).into_response()
        }
    }
}
