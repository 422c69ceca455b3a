use sqlx::Row;

use crate::storage::db::DbConnection;
use crate::storage::like_pattern;

/// Repository for the invoice read paths served by the relational store.
#[derive(Clone)]
pub struct InvoiceRepository {
    db: DbConnection,
}

impl InvoiceRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Count invoices matching the free-text query as a case-insensitive
    /// substring of the customer name or email, the amount or date rendered
    /// as text, or the status.
    pub async fn count_filtered(&self, term: &str) -> Result<i64, sqlx::Error> {
        let pattern = like_pattern(term);
        let row = sqlx::query(
            r#"
            SELECT COUNT(*) AS count
            FROM invoices
            JOIN customers ON invoices.customer_id = customers.id
            WHERE
                customers.name LIKE ? OR
                customers.email LIKE ? OR
                CAST(invoices.amount AS TEXT) LIKE ? OR
                CAST(invoices.date AS TEXT) LIKE ? OR
                invoices.status LIKE ?
            "#,
        )
        .bind(&pattern)
        .bind(&pattern)
        .bind(&pattern)
        .bind(&pattern)
        .bind(&pattern)
        .fetch_one(self.db.pool())
        .await?;

        Ok(row.get("count"))
    }
}
