//! Interface to the remote persistence/validation collaborator.
//!
//! All calls are request/response; a failure surfaces as one error object,
//! never partial data. Remote error text is passed through to the caller
//! untranslated — interpretation is the UI's job.

#[cfg(feature = "remote")]
mod http;

#[cfg(feature = "remote")]
pub use http::HttpDocumentService;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{Customer, LineItem};
use crate::invoice::InvoicePayload;

/// Errors and warnings reported by a remote validation call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RemoteOutcome {
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
}

/// Error talking to the remote service.
#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum RemoteError {
    /// Network or HTTP transport failure.
    #[error("remote network error: {0}")]
    Network(String),
    /// The service returned a non-success envelope.
    #[error("remote API error: {0}")]
    Api(String),
    /// The response body did not match the expected envelope.
    #[error("remote parse error: {0}")]
    Parse(String),
}

/// Response envelope used by every remote endpoint:
/// `{success, data: {errors, warnings}}` or `{success: false, error}`.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteResponse {
    pub success: bool,
    #[serde(default)]
    pub data: Option<RemoteOutcome>,
    #[serde(default)]
    pub error: Option<String>,
}

impl RemoteResponse {
    /// Unwrap the envelope into an outcome or a pass-through API error.
    pub fn into_outcome(self) -> Result<RemoteOutcome, RemoteError> {
        if self.success {
            Ok(self.data.unwrap_or_default())
        } else {
            Err(RemoteError::Api(
                self.error.unwrap_or_else(|| "unknown error".into()),
            ))
        }
    }
}

/// The validation surface the remote collaborator presents.
#[allow(async_fn_in_trait)]
pub trait DocumentService {
    /// Structural validation of an invoice payload.
    async fn validate_invoice(
        &self,
        payload: &InvoicePayload,
    ) -> Result<RemoteOutcome, RemoteError>;

    /// Same envelope, deeper business checks.
    async fn comprehensive_invoice_validation(
        &self,
        payload: &InvoicePayload,
    ) -> Result<RemoteOutcome, RemoteError>;

    async fn validate_customer(&self, customer: &Customer) -> Result<RemoteOutcome, RemoteError>;

    async fn validate_stock_availability(
        &self,
        items: &[LineItem],
    ) -> Result<RemoteOutcome, RemoteError>;
}
