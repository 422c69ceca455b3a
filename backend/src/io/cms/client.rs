//! HTTP client for the upstream content API.
//!
//! One method per endpoint. Each issues exactly one request, separates the
//! error envelope from the success envelope, flattens the payload, and
//! extracts typed records. No retries, no backoff.

use serde::Deserialize;
use serde_json::Value;
use shared::{AuthSession, AuthUser, CustomerName, Invoice, InvoicePage, PaginationMeta, Revenue};

use crate::error::DashboardError;
use crate::io::cms::envelope::{CmsDocument, CmsErrorBody, InvoiceWrite, StatusAggregate};
use crate::io::cms::query::CmsQuery;

#[derive(Debug, Clone)]
pub struct CmsClient {
    http: reqwest::Client,
    base_url: String,
}

impl CmsClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_document(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<(Value, Option<PaginationMeta>), DashboardError> {
        let response = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .query(query)
            .send()
            .await?;
        let status = response.status();
        let document: CmsDocument = response.json().await?;
        document.into_result(status)
    }

    fn from_value<T: serde::de::DeserializeOwned>(value: Value) -> Result<T, DashboardError> {
        serde_json::from_value(value).map_err(|err| DashboardError::Payload(err.to_string()))
    }

    /// Ascending-by-date page of revenue records.
    pub async fn list_revenues(&self, page_size: u32) -> Result<Vec<Revenue>, DashboardError> {
        let query = CmsQuery::new()
            .sort("date:asc")
            .page_size(page_size)
            .page(1)
            .into_pairs();
        let (data, _) = self.get_document("/api/revenues", &query).await?;
        Self::from_value(data)
    }

    /// Ascending-by-date page of invoices with the customer relation and its
    /// image populated.
    pub async fn list_latest_invoices(
        &self,
        page_size: u32,
    ) -> Result<Vec<Invoice>, DashboardError> {
        let query = CmsQuery::new()
            .sort("date:asc")
            .populate_customer_image()
            .page_size(page_size)
            .page(1)
            .into_pairs();
        let (data, _) = self.get_document("/api/invoices", &query).await?;
        Self::from_value(data)
    }

    /// One page of invoices matching `term` across status, amount as text,
    /// customer name and customer email.
    pub async fn search_invoices(
        &self,
        term: &str,
        page: u32,
        page_size: u32,
    ) -> Result<InvoicePage, DashboardError> {
        let query = CmsQuery::new()
            .sort("date:asc")
            .populate_customer_image()
            .page_size(page_size)
            .page(page)
            .or_contains(&["status"], term)
            .or_contains(&["amount"], term)
            .or_contains(&["customer", "name"], term)
            .or_contains(&["customer", "email"], term)
            .into_pairs();
        let (data, meta) = self.get_document("/api/invoices", &query).await?;
        let data = Self::from_value(data)?;
        let meta = meta.ok_or_else(|| {
            DashboardError::Payload("list response carried no pagination".to_string())
        })?;
        Ok(InvoicePage { data, meta })
    }

    pub async fn get_invoice(&self, id: &str) -> Result<Invoice, DashboardError> {
        let query = CmsQuery::new().populate_customer_image().into_pairs();
        let (data, _) = self
            .get_document(&format!("/api/invoices/{}", id), &query)
            .await?;
        Self::from_value(data)
    }

    /// Customer id/name pairs for the invoice form select.
    pub async fn list_customer_names(&self) -> Result<Vec<CustomerName>, DashboardError> {
        let query = CmsQuery::new().populate_fields(&["id", "name"]).into_pairs();
        let (data, _) = self.get_document("/api/customers", &query).await?;
        Self::from_value(data)
    }

    async fn status_aggregate(&self, path: &str) -> Result<StatusAggregate, DashboardError> {
        let (data, _) = self.get_document(path, &[]).await?;
        Self::from_value(data)
    }

    /// Precomputed sum of pending invoice amounts.
    pub async fn pending_totals(&self) -> Result<StatusAggregate, DashboardError> {
        self.status_aggregate("/api/invoices-status/pending").await
    }

    /// Precomputed sum of paid invoice amounts.
    pub async fn paid_totals(&self) -> Result<StatusAggregate, DashboardError> {
        self.status_aggregate("/api/invoices-status/paid").await
    }

    /// Total invoice count.
    pub async fn invoice_count(&self) -> Result<StatusAggregate, DashboardError> {
        self.status_aggregate("/api/invoices-status/total").await
    }

    /// Total customer count.
    pub async fn customer_count(&self) -> Result<StatusAggregate, DashboardError> {
        self.status_aggregate("/api/total-customers").await
    }

    async fn write_document(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<Invoice, DashboardError> {
        let response = request.send().await?;
        let status = response.status();
        let document: CmsDocument = response.json().await?;
        let (data, _) = document.into_result(status)?;
        Self::from_value(data)
    }

    /// Create an invoice. Exactly one POST, no retry.
    pub async fn create_invoice(&self, payload: &InvoiceWrite) -> Result<Invoice, DashboardError> {
        let request = self
            .http
            .post(format!("{}/api/invoices", self.base_url))
            .json(payload);
        self.write_document(request).await
    }

    /// Update the invoice addressed by `id`. Exactly one PUT, no retry.
    pub async fn update_invoice(
        &self,
        id: &str,
        payload: &InvoiceWrite,
    ) -> Result<Invoice, DashboardError> {
        let request = self
            .http
            .put(format!("{}/api/invoices/{}", self.base_url, id))
            .json(payload);
        self.write_document(request).await
    }

    /// Exchange an identifier/password pair for a session credential at the
    /// upstream auth endpoint.
    ///
    /// A success response that carries no token is an explicit error rather
    /// than a session-less login.
    pub async fn authenticate(
        &self,
        identifier: &str,
        password: &str,
    ) -> Result<AuthSession, DashboardError> {
        let response = self
            .http
            .post(format!("{}/api/auth/local", self.base_url))
            .json(&serde_json::json!({ "identifier": identifier, "password": password }))
            .send()
            .await?;
        let status = response.status();
        let body: AuthResponseBody = response.json().await?;

        if let Some(error) = body.error {
            return Err(DashboardError::Upstream {
                status: error.status.unwrap_or_else(|| status.as_u16()),
                message: error.message,
            });
        }
        if !status.is_success() {
            return Err(DashboardError::Upstream {
                status: status.as_u16(),
                message: "authentication was rejected upstream".to_string(),
            });
        }
        match body.jwt {
            Some(jwt) => Ok(AuthSession {
                jwt,
                user: body.user,
            }),
            None => Err(DashboardError::Payload(
                "authentication response carried no session token".to_string(),
            )),
        }
    }
}

#[derive(Debug, Deserialize)]
struct AuthResponseBody {
    #[serde(default)]
    jwt: Option<String>,
    #[serde(default)]
    user: Option<AuthUser>,
    #[serde(default)]
    error: Option<CmsErrorBody>,
}
