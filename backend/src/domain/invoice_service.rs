//! Invoice write operations.
//!
//! Validated form fields become an upstream write payload: the amount is
//! already in cents, the issue date is stamped server-side, and the customer
//! is attached by reference. Each operation issues exactly one request.

use chrono::Local;
use shared::Invoice;

use crate::domain::revalidation::{ViewMarker, INVOICES_VIEW};
use crate::domain::validation::{InvoiceInput, InvoiceUpdate};
use crate::error::DashboardError;
use crate::io::cms::client::CmsClient;
use crate::io::cms::envelope::{ConnectRef, CustomerConnect, InvoiceWrite, InvoiceWriteData};

/// Service carrying invoice create/update to the upstream API.
#[derive(Clone)]
pub struct InvoiceService {
    cms: CmsClient,
    views: ViewMarker,
}

impl InvoiceService {
    pub fn new(cms: CmsClient, views: ViewMarker) -> Self {
        Self { cms, views }
    }

    /// Build the upstream write payload for the given issue date.
    pub fn write_payload(input: &InvoiceInput, date: String) -> InvoiceWrite {
        InvoiceWrite {
            data: InvoiceWriteData {
                amount: input.amount_cents,
                status: input.status,
                date,
                customer: CustomerConnect {
                    connect: vec![ConnectRef {
                        id: input.customer_id.clone(),
                    }],
                },
            },
        }
    }

    /// Current date in `YYYY-MM-DD` form, the upstream's issue-date format.
    pub fn today() -> String {
        Local::now().format("%Y-%m-%d").to_string()
    }

    /// Create an invoice stamped with today's date. On success the invoices
    /// view is marked stale so the next render re-fetches it.
    pub async fn create_invoice(&self, input: &InvoiceInput) -> Result<Invoice, DashboardError> {
        let payload = Self::write_payload(input, Self::today());
        let invoice = self.cms.create_invoice(&payload).await?;
        self.views.mark(INVOICES_VIEW);
        Ok(invoice)
    }

    /// Update the invoice addressed by the validated target id; the date is
    /// re-stamped the same way the create path stamps it.
    pub async fn update_invoice(&self, update: &InvoiceUpdate) -> Result<Invoice, DashboardError> {
        let payload = Self::write_payload(&update.fields, Self::today());
        let invoice = self.cms.update_invoice(&update.id, &payload).await?;
        self.views.mark(INVOICES_VIEW);
        Ok(invoice)
    }
}
