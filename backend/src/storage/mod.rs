//! sqlx repositories for the read paths that go straight to the relational
//! store instead of the content API.

pub mod customer_repository;
pub mod db;
pub mod invoice_repository;
pub mod user_repository;

pub use customer_repository::CustomerRepository;
pub use db::DbConnection;
pub use invoice_repository::InvoiceRepository;
pub use user_repository::UserRepository;

/// Substring containment pattern for `LIKE`; the term is taken verbatim, as
/// the upstream filter grammar takes it.
pub(crate) fn like_pattern(term: &str) -> String {
    format!("%{}%", term)
}
