use thiserror::Error;

/// Service-wide error type.
///
/// Every operation returns `Result<T, DashboardError>`; transport failures,
/// upstream rejections and malformed payloads are all values of this one
/// type. The REST layer decides how each maps onto the wire: form endpoints
/// render a tri-state outcome, read endpoints answer with a generic failure.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// The upstream service could not be reached or its body never arrived.
    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The upstream service answered with an error status or embedded an
    /// error payload in an otherwise successful response.
    #[error("upstream error ({status}): {message}")]
    Upstream { status: u16, message: String },

    /// The upstream response did not match its documented shape.
    #[error("unexpected upstream payload: {0}")]
    Payload(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl DashboardError {
    /// Message rendered into a tri-state form outcome.
    pub fn form_message(&self) -> String {
        match self {
            DashboardError::Upstream { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}
