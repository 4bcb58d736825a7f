//! Blocking REST client for the back-office product configuration API.
//!
//! The external service owns all persistence and business decisions; this
//! crate only moves request and response shapes over HTTP:
//!
//! - [`ApiClient`] - thin wrapper over a [`ureq::Agent`] with the API base URL
//! - [`ReferenceData`] - read-through cache of the two reference catalogs
//! - [`ClientError`] - remote rejections (with the server's message kept
//!   verbatim), transport failures, and decode failures
//!
//! Nothing here retries: every failure is terminal for that attempt and
//! surfaces to the caller for explicit re-submission.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod reference;

use prodcfg_core::{
    AccountStatus, ChartOfAccount, ConfigRow, CreateRequest, EntityId, LedgerAccount,
    ProductConfiguration, Stored, UpdateRequest,
};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

pub use reference::ReferenceData;

/// Error shape the service uses for non-success responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Fallback when a rejection carries no decodable body.
const GENERIC_FAILURE: &str = "request failed";

/// A failed API call.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The service rejected the request; the message is surfaced verbatim.
    #[error("{message}")]
    Remote {
        /// HTTP status code.
        status: u16,
        /// The server's `message` field, or a generic fallback.
        message: String,
    },
    /// The request never completed (DNS, connect, TLS, IO).
    #[error("network error: {0}")]
    Transport(String),
    /// The response body did not match the expected shape.
    #[error("invalid response payload: {0}")]
    Decode(#[from] std::io::Error),
}

impl ClientError {
    fn from_ureq(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(status, response) => {
                let message = response
                    .into_json::<ErrorBody>()
                    .map_or_else(|_| GENERIC_FAILURE.to_string(), |body| body.message);
                Self::Remote { status, message }
            }
            ureq::Error::Transport(transport) => Self::Transport(transport.to_string()),
        }
    }
}

/// Source of the two reference catalogs.
///
/// [`ApiClient`] is the real implementation; tests substitute in-memory
/// fakes. [`ReferenceData`] refreshes through this seam.
pub trait ReferenceSource {
    /// Fetch chart-of-accounts entries, optionally only active ones.
    fn fetch_chart_of_accounts(
        &self,
        active_only: Option<bool>,
    ) -> Result<Vec<ChartOfAccount>, ClientError>;

    /// Fetch ledger accounts, optionally filtered by status.
    fn fetch_ledger_accounts(
        &self,
        status: Option<AccountStatus>,
    ) -> Result<Vec<LedgerAccount>, ClientError>;
}

impl ReferenceSource for ApiClient {
    fn fetch_chart_of_accounts(
        &self,
        active_only: Option<bool>,
    ) -> Result<Vec<ChartOfAccount>, ClientError> {
        self.chart_of_accounts(active_only)
    }

    fn fetch_ledger_accounts(
        &self,
        status: Option<AccountStatus>,
    ) -> Result<Vec<LedgerAccount>, ClientError> {
        self.ledger_accounts(status)
    }
}

/// Client for the back-office API.
#[derive(Clone)]
pub struct ApiClient {
    agent: ureq::Agent,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the API at `base_url` (no trailing slash).
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            agent: ureq::agent(),
            base_url,
        }
    }

    /// Fetch chart-of-accounts entries, optionally only active ones.
    pub fn chart_of_accounts(
        &self,
        active_only: Option<bool>,
    ) -> Result<Vec<ChartOfAccount>, ClientError> {
        let url = format!("{}/chart-of-accounts", self.base_url);
        debug!(%url, "fetching chart of accounts");
        let mut request = self.agent.get(&url);
        if let Some(active) = active_only {
            request = request.query("isActive", if active { "true" } else { "false" });
        }
        let response = request.call().map_err(ClientError::from_ureq)?;
        Ok(response.into_json()?)
    }

    /// Fetch ledger accounts, optionally filtered by status.
    pub fn ledger_accounts(
        &self,
        status: Option<AccountStatus>,
    ) -> Result<Vec<LedgerAccount>, ClientError> {
        let url = format!("{}/ledger-accounts", self.base_url);
        debug!(%url, "fetching ledger accounts");
        let mut request = self.agent.get(&url);
        if let Some(status) = status {
            request = request.query("status", &status.to_string());
        }
        let response = request.call().map_err(ClientError::from_ureq)?;
        Ok(response.into_json()?)
    }

    /// Fetch the full configuration row set for a product.
    pub fn product_configuration(
        &self,
        product_id: EntityId,
    ) -> Result<ProductConfiguration, ClientError> {
        let url = format!("{}/products/{product_id}/configuration", self.base_url);
        debug!(%url, "fetching product configuration");
        let response = self.agent.get(&url).call().map_err(ClientError::from_ureq)?;
        Ok(response.into_json()?)
    }

    /// List the rows of one configuration kind.
    pub fn list_rows<T: ConfigRow>(
        &self,
        product_id: EntityId,
    ) -> Result<Vec<Stored<T>>, ClientError> {
        let url = self.kind_url::<T>(product_id);
        debug!(%url, "listing configuration rows");
        let response = self.agent.get(&url).call().map_err(ClientError::from_ureq)?;
        Ok(response.into_json()?)
    }

    /// Create a configuration row, returning the stored entity.
    pub fn create_row<T: ConfigRow>(
        &self,
        product_id: EntityId,
        request: &CreateRequest<T>,
    ) -> Result<Stored<T>, ClientError> {
        let url = self.kind_url::<T>(product_id);
        debug!(%url, "creating configuration row");
        let response = self
            .agent
            .post(&url)
            .send_json(request)
            .map_err(ClientError::from_ureq)?;
        Ok(response.into_json()?)
    }

    /// Replace a configuration row, returning the stored entity.
    pub fn update_row<T: ConfigRow>(
        &self,
        product_id: EntityId,
        request: &UpdateRequest<T>,
    ) -> Result<Stored<T>, ClientError> {
        let url = format!("{}/{}", self.kind_url::<T>(product_id), request.id);
        debug!(%url, "updating configuration row");
        let response = self
            .agent
            .put(&url)
            .send_json(request)
            .map_err(ClientError::from_ureq)?;
        Ok(response.into_json()?)
    }

    /// Delete a configuration row.
    pub fn delete_row<T: ConfigRow>(
        &self,
        product_id: EntityId,
        entity_id: EntityId,
    ) -> Result<(), ClientError> {
        let url = format!("{}/{}", self.kind_url::<T>(product_id), entity_id);
        debug!(%url, "deleting configuration row");
        self.agent
            .delete(&url)
            .call()
            .map_err(ClientError::from_ureq)?;
        Ok(())
    }

    fn kind_url<T: ConfigRow>(&self, product_id: EntityId) -> String {
        format!(
            "{}/products/{product_id}/{}",
            self.base_url,
            T::KIND.path()
        )
    }
}
