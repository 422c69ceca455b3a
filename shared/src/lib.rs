use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Invoice lifecycle status as the upstream content API stores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Pending,
    Paid,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Paid => "paid",
        }
    }

    /// Parse the exact wire spelling; anything else is rejected.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(InvoiceStatus::Pending),
            "paid" => Some(InvoiceStatus::Paid),
            _ => None,
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Upstream entity identifiers arrive either as JSON numbers or strings
/// depending on the endpoint; normalize both to a string.
fn entity_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {}",
            other
        ))),
    }
}

/// Flattened invoice record: the envelope id merged alongside its attributes,
/// with the customer relation kept as a nested plain object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    #[serde(deserialize_with = "entity_id")]
    pub id: String,
    /// Amount in integer cents.
    pub amount: i64,
    pub status: InvoiceStatus,
    /// Issue date, `YYYY-MM-DD`.
    pub date: String,
    #[serde(default)]
    pub customer: Option<CustomerRef>,
}

/// Customer relation embedded in an invoice record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRef {
    #[serde(deserialize_with = "entity_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub image: Option<ImageRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRef {
    pub url: String,
}

/// Invoice prepared for the latest-invoices card: same shape as [`Invoice`]
/// with the amount already formatted for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatestInvoice {
    pub id: String,
    /// Display currency string, e.g. `$1,234.56`.
    pub amount: String,
    pub status: InvoiceStatus,
    pub date: String,
    #[serde(default)]
    pub customer: Option<CustomerRef>,
}

/// Monthly revenue record; totals stay numeric, no formatting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Revenue {
    #[serde(deserialize_with = "entity_id")]
    pub id: String,
    pub month: String,
    pub revenue: i64,
}

/// Customer reduced to the fields the invoice form select needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerName {
    #[serde(deserialize_with = "entity_id")]
    pub id: String,
    pub name: String,
}

/// One row of the customers table: per-customer invoice aggregates with the
/// two monetary sums formatted for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomersTableRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub image_url: Option<String>,
    pub total_invoices: i64,
    pub total_pending: String,
    pub total_paid: String,
}

/// Combined dashboard summary assembled from four upstream aggregates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardData {
    pub number_of_invoices: i64,
    pub number_of_customers: i64,
    pub total_paid_invoices: String,
    pub total_pending_invoices: String,
}

/// Upstream pagination metadata, passed through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub page: u32,
    pub page_size: u32,
    pub page_count: u32,
    pub total: u64,
}

/// A page of filtered invoices plus the upstream pagination metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoicePage {
    pub data: Vec<Invoice>,
    pub meta: PaginationMeta,
}

/// Dashboard user looked up by email. The credential hash never leaves the
/// service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password: String,
}

/// Raw invoice form fields as submitted. Everything is string-typed until
/// validation has run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceForm {
    #[serde(default)]
    pub customer_id: String,
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    pub status: String,
}

/// Raw login form fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub identifier: String,
    #[serde(default)]
    pub password: String,
}

/// Tri-state outcome of a write operation, as rendered to the form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormOutcome {
    pub ok: bool,
    pub data: Option<Invoice>,
    pub error: Option<String>,
}

impl FormOutcome {
    pub fn success(invoice: Invoice) -> Self {
        Self {
            ok: true,
            data: Some(invoice),
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Field-level validation failure: field name mapped to an ordered list of
/// human-readable violation messages, plus a summary line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationFailure {
    pub errors: BTreeMap<String, Vec<String>>,
    pub message: String,
}

impl ValidationFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            errors: BTreeMap::new(),
            message: message.into(),
        }
    }

    pub fn push(&mut self, field: &str, violation: impl Into<String>) {
        self.errors
            .entry(field.to_string())
            .or_default()
            .push(violation.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Outcome of a login attempt, as rendered to the login form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginOutcome {
    pub ok: bool,
    pub redirect_to: Option<String>,
    pub error: Option<String>,
}

impl LoginOutcome {
    pub fn success(redirect_to: impl Into<String>) -> Self {
        Self {
            ok: true,
            redirect_to: Some(redirect_to.into()),
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            redirect_to: None,
            error: Some(message.into()),
        }
    }
}

/// User record embedded in the upstream auth response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    #[serde(deserialize_with = "entity_id")]
    pub id: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Session credential issued by the upstream auth service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthSession {
    pub jwt: String,
    #[serde(default)]
    pub user: Option<AuthUser>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_spelling() {
        assert_eq!(
            serde_json::to_string(&InvoiceStatus::Pending).unwrap(),
            "\"pending\""
        );
        assert_eq!(
            serde_json::from_str::<InvoiceStatus>("\"paid\"").unwrap(),
            InvoiceStatus::Paid
        );
        assert!(serde_json::from_str::<InvoiceStatus>("\"Paid\"").is_err());
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(InvoiceStatus::parse("pending"), Some(InvoiceStatus::Pending));
        assert_eq!(InvoiceStatus::parse("paid"), Some(InvoiceStatus::Paid));
        assert_eq!(InvoiceStatus::parse("PAID"), None);
        assert_eq!(InvoiceStatus::parse(""), None);
    }

    #[test]
    fn test_invoice_accepts_numeric_and_string_ids() {
        let numeric: Invoice = serde_json::from_value(serde_json::json!({
            "id": 7,
            "amount": 3750,
            "status": "pending",
            "date": "2024-01-15"
        }))
        .unwrap();
        assert_eq!(numeric.id, "7");
        assert!(numeric.customer.is_none());

        let stringy: Invoice = serde_json::from_value(serde_json::json!({
            "id": "c1",
            "amount": 100,
            "status": "paid",
            "date": "2024-01-15",
            "customer": { "id": 3, "name": "Amy", "email": "amy@example.com" }
        }))
        .unwrap();
        assert_eq!(stringy.id, "c1");
        assert_eq!(stringy.customer.unwrap().id, "3");
    }

    #[test]
    fn test_invoice_form_uses_camel_case_field_names() {
        let form: InvoiceForm = serde_json::from_str(
            r#"{"customerId":"c1","amount":"37.50","status":"pending"}"#,
        )
        .unwrap();
        assert_eq!(form.customer_id, "c1");
        assert_eq!(form.amount, "37.50");
        assert_eq!(form.status, "pending");
    }

    #[test]
    fn test_invoice_form_missing_fields_default_to_empty() {
        let form: InvoiceForm = serde_json::from_str("{}").unwrap();
        assert!(form.customer_id.is_empty());
        assert!(form.amount.is_empty());
        assert!(form.status.is_empty());
    }

    #[test]
    fn test_validation_failure_keeps_message_order_per_field() {
        let mut failure = ValidationFailure::new("Missing Fields.");
        failure.push("amount", "first");
        failure.push("amount", "second");
        assert_eq!(
            failure.errors.get("amount").unwrap(),
            &vec!["first".to_string(), "second".to_string()]
        );
        assert!(!failure.is_empty());
    }

    #[test]
    fn test_form_outcome_constructors() {
        let ok = FormOutcome::success(Invoice {
            id: "1".to_string(),
            amount: 3750,
            status: InvoiceStatus::Pending,
            date: "2024-01-15".to_string(),
            customer: None,
        });
        assert!(ok.ok);
        assert!(ok.error.is_none());

        let failed = FormOutcome::failure("upstream rejected the invoice");
        assert!(!failed.ok);
        assert!(failed.data.is_none());
        assert_eq!(failed.error.as_deref(), Some("upstream rejected the invoice"));
    }

    #[test]
    fn test_user_password_never_serializes() {
        let user = User {
            id: "u1".to_string(),
            name: "Amy".to_string(),
            email: "amy@example.com".to_string(),
            password: "hash".to_string(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("hash"));
        assert!(!json.contains("password"));
    }
}
