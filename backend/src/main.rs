use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, Level};

use invoice_dashboard_backend::config::DashboardConfig;
use invoice_dashboard_backend::domain::auth_service::{AuthService, CmsCredentialProvider};
use invoice_dashboard_backend::domain::dashboard_service::DashboardService;
use invoice_dashboard_backend::domain::invoice_service::InvoiceService;
use invoice_dashboard_backend::domain::revalidation::ViewMarker;
use invoice_dashboard_backend::io::cms::client::CmsClient;
use invoice_dashboard_backend::io::rest::{api_router, AppState};
use invoice_dashboard_backend::storage::{
    CustomerRepository, DbConnection, InvoiceRepository, UserRepository,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    let config = DashboardConfig::from_env();

    info!("Setting up database");
    let db = DbConnection::new(&config.database_url).await?;

    let cms = CmsClient::new(config.cms_base_url.clone());
    let views = ViewMarker::new();
    let state = AppState {
        dashboard: DashboardService::new(
            cms.clone(),
            InvoiceRepository::new(db.clone()),
            CustomerRepository::new(db.clone()),
            UserRepository::new(db),
            config.clone(),
        ),
        invoices: InvoiceService::new(cms.clone(), views.clone()),
        auth: AuthService::new(CmsCredentialProvider::new(cms)),
        views,
        config: config.clone(),
    };

    // CORS setup so the dashboard frontend can make requests
    let cors = CorsLayer::new()
        .allow_origin(config.allowed_origin.parse::<HeaderValue>()?)
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers(Any);

    let app = Router::new()
        .route("/", get(|| async { "invoice-dashboard-backend" }))
        .nest("/api", api_router())
        .layer(cors)
        .with_state(state);

    info!("Starting server on {}", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
