//! REST interface of the dashboard backend.
//!
//! This layer is pure translation: it deserializes form submissions and
//! query parameters, runs validation, calls into the domain services, and
//! maps every [`crate::error::DashboardError`] onto the wire contract —
//! tri-state outcomes for form endpoints, generic failure responses for
//! reads. No business logic lives here.

pub mod auth_apis;
pub mod customer_apis;
pub mod dashboard_apis;
pub mod invoice_apis;

use axum::routing::{get, post};
use axum::Router;

use crate::config::DashboardConfig;
use crate::domain::auth_service::{AuthService, CmsCredentialProvider};
use crate::domain::dashboard_service::DashboardService;
use crate::domain::invoice_service::InvoiceService;
use crate::domain::revalidation::ViewMarker;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub dashboard: DashboardService,
    pub invoices: InvoiceService,
    pub auth: AuthService<CmsCredentialProvider>,
    pub views: ViewMarker,
    pub config: DashboardConfig,
}

/// Build the `/api` router over the shared state.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/dashboard/revenue", get(dashboard_apis::get_revenue))
        .route(
            "/dashboard/latest-invoices",
            get(dashboard_apis::get_latest_invoices),
        )
        .route("/dashboard/cards", get(dashboard_apis::get_card_data))
        .route(
            "/invoices",
            get(invoice_apis::list_invoices).post(invoice_apis::create_invoice),
        )
        .route("/invoices/pages", get(invoice_apis::get_invoice_pages))
        .route(
            "/invoices/:id",
            get(invoice_apis::get_invoice).put(invoice_apis::update_invoice),
        )
        .route("/customers", get(customer_apis::list_customer_names))
        .route(
            "/customers/filtered",
            get(customer_apis::list_filtered_customers),
        )
        .route("/users/lookup", get(auth_apis::get_user_by_email))
        .route("/auth/login", post(auth_apis::login))
        .route("/auth/logout", post(auth_apis::logout))
}
