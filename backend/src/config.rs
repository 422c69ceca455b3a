use std::env;

/// Runtime configuration for the dashboard service.
///
/// Every page size the read paths use is injected here rather than hidden in
/// a module constant, so tests can vary them.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Base URL of the upstream content API.
    pub cms_base_url: String,
    /// Address the REST server binds to.
    pub bind_addr: String,
    /// Database URL for the direct-SQL read paths.
    pub database_url: String,
    /// Page size of the filtered invoices table.
    pub invoices_page_size: u32,
    /// Page size of the latest-invoices card.
    pub latest_invoices_page_size: u32,
    /// Page size of the revenue chart.
    pub revenue_page_size: u32,
    /// Name of the HTTP-only session cookie.
    pub session_cookie: String,
    /// Route the client is sent to after a successful login.
    pub login_redirect: String,
    /// Origin allowed by the CORS layer.
    pub allowed_origin: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            cms_base_url: "http://localhost:1337".to_string(),
            bind_addr: "127.0.0.1:3000".to_string(),
            database_url: "sqlite:dashboard.db".to_string(),
            invoices_page_size: 6,
            latest_invoices_page_size: 5,
            revenue_page_size: 12,
            session_cookie: "jwt".to_string(),
            login_redirect: "/dashboard".to_string(),
            allowed_origin: "http://localhost:8080".to_string(),
        }
    }
}

impl DashboardConfig {
    /// Build a config from the environment, falling back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cms_base_url: env_or("CMS_URL", defaults.cms_base_url),
            bind_addr: env_or("BIND_ADDR", defaults.bind_addr),
            database_url: env_or("DATABASE_URL", defaults.database_url),
            invoices_page_size: env_or_parse("INVOICES_PAGE_SIZE", defaults.invoices_page_size),
            latest_invoices_page_size: env_or_parse(
                "LATEST_INVOICES_PAGE_SIZE",
                defaults.latest_invoices_page_size,
            ),
            revenue_page_size: env_or_parse("REVENUE_PAGE_SIZE", defaults.revenue_page_size),
            session_cookie: env_or("SESSION_COOKIE", defaults.session_cookie),
            login_redirect: env_or("LOGIN_REDIRECT", defaults.login_redirect),
            allowed_origin: env_or("ALLOWED_ORIGIN", defaults.allowed_origin),
        }
    }
}

fn env_or(key: &str, default: String) -> String {
    env::var(key).unwrap_or(default)
}

fn env_or_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}
