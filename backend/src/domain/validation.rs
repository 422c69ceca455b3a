//! Form-field validation.
//!
//! Given raw string-typed form fields, produce either a strongly-typed record
//! or a field-level error set. Validation never contacts an external service;
//! side effects only start once a form has passed.

use shared::{InvoiceForm, InvoiceStatus, LoginForm, ValidationFailure};

use crate::domain::money;

const CREATE_SUMMARY: &str = "Missing Fields. Failed to Create Invoice.";
const UPDATE_SUMMARY: &str = "Missing Fields. Failed to Update Invoice.";
const LOGIN_SUMMARY: &str = "Missing Fields. Failed to Log In.";

/// Invoice fields after validation: amount already converted to cents.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceInput {
    pub customer_id: String,
    pub amount_cents: i64,
    pub status: InvoiceStatus,
}

/// Validated update: the target invoice plus the fields to write.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceUpdate {
    pub id: String,
    pub fields: InvoiceInput,
}

/// Validated login credentials.
#[derive(Debug, Clone, PartialEq)]
pub struct Credentials {
    pub identifier: String,
    pub password: String,
}

/// Validate the create-invoice form. Date and id are server-assigned and
/// never accepted from input.
pub fn validate_invoice_create(form: &InvoiceForm) -> Result<InvoiceInput, ValidationFailure> {
    let mut failure = ValidationFailure::new(CREATE_SUMMARY);
    match collect_invoice_fields(form, &mut failure) {
        Some(input) if failure.is_empty() => Ok(input),
        _ => Err(failure),
    }
}

/// Validate the update-invoice form: the same fields plus the target id.
pub fn validate_invoice_update(
    id: &str,
    form: &InvoiceForm,
) -> Result<InvoiceUpdate, ValidationFailure> {
    let mut failure = ValidationFailure::new(UPDATE_SUMMARY);
    let id = id.trim();
    if id.is_empty() {
        failure.push("id", "Missing invoice id.");
    }
    match collect_invoice_fields(form, &mut failure) {
        Some(fields) if failure.is_empty() => Ok(InvoiceUpdate {
            id: id.to_string(),
            fields,
        }),
        _ => Err(failure),
    }
}

fn collect_invoice_fields(
    form: &InvoiceForm,
    failure: &mut ValidationFailure,
) -> Option<InvoiceInput> {
    let customer_id = form.customer_id.trim();
    if customer_id.is_empty() {
        failure.push("customerId", "Please select a customer.");
    }

    let amount_cents = match money::to_cents(&form.amount) {
        Ok(cents) if cents > 0 => Some(cents),
        Ok(_) => {
            failure.push("amount", "Please enter an amount greater than $0.");
            None
        }
        Err(_) => {
            failure.push("amount", "Please enter a valid amount.");
            None
        }
    };

    let status = match InvoiceStatus::parse(form.status.trim()) {
        Some(status) => Some(status),
        None => {
            failure.push("status", "Please select an invoice status.");
            None
        }
    };

    match (amount_cents, status) {
        (Some(amount_cents), Some(status)) if !customer_id.is_empty() => Some(InvoiceInput {
            customer_id: customer_id.to_string(),
            amount_cents,
            status,
        }),
        _ => None,
    }
}

/// Validate the login form.
///
/// The identifier's lower bound is exclusive (a 2-character identifier is
/// rejected, 3 passes); the password's is inclusive (7 fails, 8 passes).
pub fn validate_login_form(form: &LoginForm) -> Result<Credentials, ValidationFailure> {
    let mut failure = ValidationFailure::new(LOGIN_SUMMARY);

    let identifier = form.identifier.trim();
    let identifier_len = identifier.chars().count();
    if identifier_len <= 2 {
        failure.push("identifier", "Identifier must be longer than 2 characters.");
    } else if identifier_len > 50 {
        failure.push("identifier", "Identifier must be at most 50 characters.");
    }

    let password_len = form.password.chars().count();
    if password_len < 8 {
        failure.push("password", "Password must be at least 8 characters.");
    } else if password_len > 100 {
        failure.push("password", "Password must be at most 100 characters.");
    }

    if failure.is_empty() {
        Ok(Credentials {
            identifier: identifier.to_string(),
            password: form.password.clone(),
        })
    } else {
        Err(failure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invoice_form(customer_id: &str, amount: &str, status: &str) -> InvoiceForm {
        InvoiceForm {
            customer_id: customer_id.to_string(),
            amount: amount.to_string(),
            status: status.to_string(),
        }
    }

    #[test]
    fn test_create_valid_form() {
        let input = validate_invoice_create(&invoice_form("c1", "37.50", "pending")).unwrap();
        assert_eq!(input.customer_id, "c1");
        assert_eq!(input.amount_cents, 3750);
        assert_eq!(input.status, InvoiceStatus::Pending);
    }

    #[test]
    fn test_create_collects_every_field_error() {
        let failure = validate_invoice_create(&invoice_form("", "zero", "overdue")).unwrap_err();
        assert_eq!(failure.errors.len(), 3);
        assert!(failure.errors.contains_key("customerId"));
        assert!(failure.errors.contains_key("amount"));
        assert!(failure.errors.contains_key("status"));
        assert_eq!(failure.message, "Missing Fields. Failed to Create Invoice.");
    }

    #[test]
    fn test_create_rejects_non_positive_amount() {
        let failure = validate_invoice_create(&invoice_form("c1", "0", "paid")).unwrap_err();
        assert_eq!(
            failure.errors.get("amount").unwrap(),
            &vec!["Please enter an amount greater than $0.".to_string()]
        );

        let failure = validate_invoice_create(&invoice_form("c1", "-5", "paid")).unwrap_err();
        assert!(failure.errors.contains_key("amount"));
    }

    #[test]
    fn test_create_rejects_status_outside_the_enum() {
        let failure = validate_invoice_create(&invoice_form("c1", "10", "Paid")).unwrap_err();
        assert!(failure.errors.contains_key("status"));
        assert!(!failure.errors.contains_key("customerId"));
    }

    #[test]
    fn test_update_requires_target_id() {
        let failure = validate_invoice_update("  ", &invoice_form("c1", "10", "paid")).unwrap_err();
        assert!(failure.errors.contains_key("id"));
        assert_eq!(failure.message, "Missing Fields. Failed to Update Invoice.");

        let update = validate_invoice_update("inv-9", &invoice_form("c1", "10", "paid")).unwrap();
        assert_eq!(update.id, "inv-9");
        assert_eq!(update.fields.amount_cents, 1000);
    }

    #[test]
    fn test_login_boundary_produces_both_field_errors() {
        let failure = validate_login_form(&LoginForm {
            identifier: "ab".to_string(),
            password: "short#1".to_string(),
        })
        .unwrap_err();
        assert!(failure.errors.contains_key("identifier"));
        assert!(failure.errors.contains_key("password"));
        assert_eq!(failure.errors.len(), 2);
    }

    #[test]
    fn test_login_passes_just_past_the_boundary() {
        let credentials = validate_login_form(&LoginForm {
            identifier: "abc".to_string(),
            password: "eightchr".to_string(),
        })
        .unwrap();
        assert_eq!(credentials.identifier, "abc");
        assert_eq!(credentials.password, "eightchr");
    }

    #[test]
    fn test_login_upper_bounds() {
        let failure = validate_login_form(&LoginForm {
            identifier: "a".repeat(51),
            password: "p".repeat(101),
        })
        .unwrap_err();
        assert!(failure.errors.contains_key("identifier"));
        assert!(failure.errors.contains_key("password"));

        assert!(validate_login_form(&LoginForm {
            identifier: "a".repeat(50),
            password: "p".repeat(100),
        })
        .is_ok());
    }
}
