//! Dashboard read pipelines.
//!
//! Each operation is a straight request/transform/return sequence: fetch from
//! the upstream API or the relational store, flatten or aggregate, shape for
//! display. No retries; any failure surfaces as a [`DashboardError`].

use shared::{
    CardData, CustomerName, CustomersTableRow, Invoice, InvoicePage, LatestInvoice, Revenue, User,
};

use crate::config::DashboardConfig;
use crate::domain::money;
use crate::error::DashboardError;
use crate::io::cms::client::CmsClient;
use crate::storage::{CustomerRepository, InvoiceRepository, UserRepository};

#[derive(Clone)]
pub struct DashboardService {
    cms: CmsClient,
    invoices: InvoiceRepository,
    customers: CustomerRepository,
    users: UserRepository,
    config: DashboardConfig,
}

impl DashboardService {
    pub fn new(
        cms: CmsClient,
        invoices: InvoiceRepository,
        customers: CustomerRepository,
        users: UserRepository,
        config: DashboardConfig,
    ) -> Self {
        Self {
            cms,
            invoices,
            customers,
            users,
            config,
        }
    }

    /// Revenue chart data, ascending by date. Totals stay numeric.
    pub async fn revenue(&self) -> Result<Vec<Revenue>, DashboardError> {
        self.cms.list_revenues(self.config.revenue_page_size).await
    }

    /// Latest invoices with their amounts formatted for display.
    pub async fn latest_invoices(&self) -> Result<Vec<LatestInvoice>, DashboardError> {
        let invoices = self
            .cms
            .list_latest_invoices(self.config.latest_invoices_page_size)
            .await?;
        Ok(invoices
            .into_iter()
            .map(|invoice| LatestInvoice {
                id: invoice.id,
                amount: money::format_currency(invoice.amount),
                status: invoice.status,
                date: invoice.date,
                customer: invoice.customer,
            })
            .collect())
    }

    /// The four summary cards. The upstream reads run concurrently and all
    /// four must complete; there are no partial results.
    pub async fn card_data(&self) -> Result<CardData, DashboardError> {
        let (invoice_total, customer_total, pending, paid) = tokio::try_join!(
            self.cms.invoice_count(),
            self.cms.customer_count(),
            self.cms.pending_totals(),
            self.cms.paid_totals(),
        )?;

        Ok(CardData {
            number_of_invoices: invoice_total.count,
            number_of_customers: customer_total.count,
            total_paid_invoices: money::format_currency(paid.total_paid),
            total_pending_invoices: money::format_currency(pending.total_owed),
        })
    }

    /// One page of invoices matching the free-text query, plus the upstream
    /// pagination metadata.
    pub async fn filtered_invoices(
        &self,
        term: &str,
        page: u32,
    ) -> Result<InvoicePage, DashboardError> {
        let page = page.max(1);
        self.cms
            .search_invoices(term, page, self.config.invoices_page_size)
            .await
    }

    /// Number of pages the filtered invoice table spans:
    /// `ceil(count / page_size)`, zero when nothing matches.
    pub async fn invoice_pages(&self, term: &str) -> Result<u32, DashboardError> {
        let count = self.invoices.count_filtered(term).await?;
        let page_size = i64::from(self.config.invoices_page_size.max(1));
        Ok(((count + page_size - 1) / page_size) as u32)
    }

    /// Customers matching the query with their invoice aggregates, ordered by
    /// name ascending; the monetary sums are formatted for display.
    pub async fn filtered_customers(
        &self,
        term: &str,
    ) -> Result<Vec<CustomersTableRow>, DashboardError> {
        let rows = self.customers.filtered_with_totals(term).await?;
        Ok(rows
            .into_iter()
            .map(|row| CustomersTableRow {
                id: row.id,
                name: row.name,
                email: row.email,
                image_url: row.image_url,
                total_invoices: row.total_invoices,
                total_pending: money::format_currency(row.total_pending),
                total_paid: money::format_currency(row.total_paid),
            })
            .collect())
    }

    pub async fn invoice_by_id(&self, id: &str) -> Result<Invoice, DashboardError> {
        self.cms.get_invoice(id).await
    }

    pub async fn customer_names(&self) -> Result<Vec<CustomerName>, DashboardError> {
        self.cms.list_customer_names().await
    }

    pub async fn user_by_email(&self, email: &str) -> Result<Option<User>, DashboardError> {
        Ok(self.users.find_by_email(email).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_fixtures::{insert_customer, insert_invoice};
    use crate::storage::DbConnection;

    async fn service_with_page_size(invoices_page_size: u32) -> DashboardService {
        let db = DbConnection::init_test()
            .await
            .expect("Failed to create test database");
        insert_customer(&db, "c1", "Amy Burns", "amy@example.com", None)
            .await
            .expect("Failed to seed customer");
        for i in 0..13 {
            insert_invoice(
                &db,
                &format!("i{}", i),
                "c1",
                1000 + i,
                "pending",
                "2024-01-15",
            )
            .await
            .expect("Failed to seed invoice");
        }

        let config = DashboardConfig {
            invoices_page_size,
            ..DashboardConfig::default()
        };
        DashboardService::new(
            CmsClient::new("http://localhost:1337"),
            InvoiceRepository::new(db.clone()),
            CustomerRepository::new(db.clone()),
            UserRepository::new(db),
            config,
        )
    }

    #[tokio::test]
    async fn test_invoice_pages_is_ceil_of_count_over_page_size() {
        let service = service_with_page_size(6).await;
        // 13 matching rows, page size 6
        assert_eq!(service.invoice_pages("").await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_invoice_pages_respects_injected_page_size() {
        let service = service_with_page_size(13).await;
        assert_eq!(service.invoice_pages("").await.unwrap(), 1);

        let service = service_with_page_size(5).await;
        assert_eq!(service.invoice_pages("").await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_invoice_pages_is_zero_when_nothing_matches() {
        let service = service_with_page_size(6).await;
        assert_eq!(service.invoice_pages("zzz").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_filtered_customers_formats_sums_even_for_zero() {
        let db = DbConnection::init_test()
            .await
            .expect("Failed to create test database");
        insert_customer(&db, "c1", "Amy Burns", "amy@example.com", None)
            .await
            .expect("Failed to seed customer");
        let service = DashboardService::new(
            CmsClient::new("http://localhost:1337"),
            InvoiceRepository::new(db.clone()),
            CustomerRepository::new(db.clone()),
            UserRepository::new(db),
            DashboardConfig::default(),
        );

        let rows = service.filtered_customers("").await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].total_pending, "$0.00");
        assert_eq!(rows[0].total_paid, "$0.00");
        assert_eq!(rows[0].total_invoices, 0);
    }
}
