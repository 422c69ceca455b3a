use sqlx::Row;

use crate::storage::db::DbConnection;
use crate::storage::like_pattern;

/// Per-customer invoice aggregates before display formatting: monetary sums
/// stay in integer cents.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerAggregates {
    pub id: String,
    pub name: String,
    pub email: String,
    pub image_url: Option<String>,
    pub total_invoices: i64,
    pub total_pending: i64,
    pub total_paid: i64,
}

/// Repository for the customers table read path.
#[derive(Clone)]
pub struct CustomerRepository {
    db: DbConnection,
}

impl CustomerRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Customers matching the free-text query on name or email, each with
    /// invoice count and pending/paid sums, ordered by name ascending.
    /// Customers without invoices aggregate to zero.
    pub async fn filtered_with_totals(
        &self,
        term: &str,
    ) -> Result<Vec<CustomerAggregates>, sqlx::Error> {
        let pattern = like_pattern(term);
        let rows = sqlx::query(
            r#"
            SELECT
                customers.id,
                customers.name,
                customers.email,
                customers.image_url,
                COUNT(invoices.id) AS total_invoices,
                COALESCE(SUM(CASE WHEN invoices.status = 'pending' THEN invoices.amount ELSE 0 END), 0) AS total_pending,
                COALESCE(SUM(CASE WHEN invoices.status = 'paid' THEN invoices.amount ELSE 0 END), 0) AS total_paid
            FROM customers
            LEFT JOIN invoices ON customers.id = invoices.customer_id
            WHERE
                customers.name LIKE ? OR
                customers.email LIKE ?
            GROUP BY customers.id, customers.name, customers.email, customers.image_url
            ORDER BY customers.name ASC
            "#,
        )
        .bind(&pattern)
        .bind(&pattern)
        .fetch_all(self.db.pool())
        .await?;

        let customers = rows
            .iter()
            .map(|row| CustomerAggregates {
                id: row.get("id"),
                name: row.get("name"),
                email: row.get("email"),
                image_url: row.get("image_url"),
                total_invoices: row.get("total_invoices"),
                total_pending: row.get("total_pending"),
                total_paid: row.get("total_paid"),
            })
            .collect();

        Ok(customers)
    }
}
