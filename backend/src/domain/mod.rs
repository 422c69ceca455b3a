//! Domain layer: form validation, money arithmetic, and the services that
//! carry dashboard reads, invoice writes and login.

pub mod auth_service;
pub mod dashboard_service;
pub mod invoice_service;
pub mod money;
pub mod revalidation;
pub mod validation;
