/// Blocking HTTP implementation of the backend contract.

use super::backend::Backend;
use super::wire::{AddTilesRequest, LeaveGroupRequest, SyncResponse};
use super::SyncError;

/// The hosted group backend function endpoint.
pub const DEFAULT_BACKEND_URL: &str =
    "https://functions-node-1-grouptile.harperdbcloud.com/tileman";

/// Backend over blocking HTTP.
///
/// Success is HTTP 200 exactly; any other status maps to
/// [`SyncError::Rejected`]. No timeout is configured beyond the transport
/// default, and calls run to completion or failure — see the crate-level
/// threading contract before calling this from a UI path.
pub struct HttpBackend {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl HttpBackend {
    /// Backend against the default hosted endpoint.
    pub fn new() -> Result<Self, SyncError> {
        Self::with_base_url(DEFAULT_BACKEND_URL)
    }

    /// Backend against a custom endpoint (self-hosted deployments, tests).
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, SyncError> {
        let client = reqwest::blocking::Client::builder()
            .build()
            .map_err(|e| SyncError::Unreachable(e.to_string()))?;
        Ok(HttpBackend {
            base_url: base_url.into(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn post_json<T: serde::Serialize>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<String, SyncError> {
        let url = format!("{}/{}", self.base_url, path);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .map_err(|e| SyncError::Unreachable(e.to_string()))?;

        let status = response.status().as_u16();
        if status != 200 {
            return Err(SyncError::Rejected(status));
        }

        response
            .text()
            .map_err(|e| SyncError::Unreachable(e.to_string()))
    }
}

impl Backend for HttpBackend {
    fn add_tiles(&self, request: &AddTilesRequest) -> Result<SyncResponse, SyncError> {
        let body = self.post_json("AddTiles", request)?;
        if body.trim().is_empty() {
            // 200 with no confirmation payload — membership took effect,
            // nothing to merge.
            return Ok(SyncResponse::default());
        }
        serde_json::from_str(&body).map_err(|e| SyncError::InvalidPayload(e.to_string()))
    }

    fn leave_group(&self, request: &LeaveGroupRequest) -> Result<(), SyncError> {
        self.post_json("LeaveGroup", request).map(|_| ())
    }
}
