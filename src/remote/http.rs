//! HTTP client for the remote document service.

use serde::Serialize;

use super::{DocumentService, RemoteError, RemoteOutcome, RemoteResponse};
use crate::core::{Customer, LineItem};
use crate::invoice::InvoicePayload;

const VALIDATE_INVOICE_PATH: &str = "invoices/validate";
const COMPREHENSIVE_PATH: &str = "invoices/validate/comprehensive";
const VALIDATE_CUSTOMER_PATH: &str = "customers/validate";
const VALIDATE_STOCK_PATH: &str = "stock/validate";

/// Remote document service reached over HTTPS with JSON bodies.
#[derive(Debug, Clone)]
pub struct HttpDocumentService {
    base_url: String,
    client: reqwest::Client,
}

impl HttpDocumentService {
    /// Create a client for the given service base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self, RemoteError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| RemoteError::Network(e.to_string()))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    async fn post<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<RemoteOutcome, RemoteError> {
        let url = format!("{}/{}", self.base_url, path);

        let resp = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| RemoteError::Network(e.to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| RemoteError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(RemoteError::Api(format!("HTTP {status}: {text}")));
        }

        let envelope: RemoteResponse =
            serde_json::from_str(&text).map_err(|e| RemoteError::Parse(e.to_string()))?;
        envelope.into_outcome()
    }
}

impl DocumentService for HttpDocumentService {
    async fn validate_invoice(
        &self,
        payload: &InvoicePayload,
    ) -> Result<RemoteOutcome, RemoteError> {
        self.post(VALIDATE_INVOICE_PATH, payload).await
    }

    async fn comprehensive_invoice_validation(
        &self,
        payload: &InvoicePayload,
    ) -> Result<RemoteOutcome, RemoteError> {
        self.post(COMPREHENSIVE_PATH, payload).await
    }

    async fn validate_customer(&self, customer: &Customer) -> Result<RemoteOutcome, RemoteError> {
        self.post(VALIDATE_CUSTOMER_PATH, customer).await
    }

    async fn validate_stock_availability(
        &self,
        items: &[LineItem],
    ) -> Result<RemoteOutcome, RemoteError> {
        self.post(VALIDATE_STOCK_PATH, items).await
    }
}
