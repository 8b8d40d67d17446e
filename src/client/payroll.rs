//! Typed client for the payroll endpoints of the site administration API.
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | GET    | `/admin/sites/{siteId}/payrolls/{workerId}/{payrollId}` | Fetch payroll detail |
//! | PATCH  | `/admin/sites/{siteId}/payrolls/{payrollId}` | Save editable inputs |

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::AUTHORIZATION;
use tracing::{debug, info, warn};
use url::Url;

use crate::calculation::{is_consistent, recompute};
use crate::config::RemoteApiConfig;
use crate::models::{PayrollDetail, PayrollKey, PayrollUpdate};
use crate::session::PayrollStore;

use super::envelope::{ApiEnvelope, error_message};
use super::{AuthContext, ClientError};

/// Client for the payroll endpoints.
///
/// Holds no credentials: the caller passes an [`AuthContext`] to each call.
#[derive(Debug, Clone)]
pub struct SitePayrollClient {
    http: reqwest::Client,
    base_url: Url,
}

impl SitePayrollClient {
    /// Creates a client from configuration.
    pub fn new(config: &RemoteApiConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(ClientError::Build)?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
        })
    }

    /// The base URL requests are sent to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    /// Fetches a payroll record.
    ///
    /// Calls `GET {base_url}/admin/sites/{siteId}/payrolls/{workerId}/{payrollId}`.
    /// The returned record has its derived fields recomputed locally.
    pub async fn fetch_payroll(
        &self,
        auth: &AuthContext,
        key: &PayrollKey,
    ) -> Result<PayrollDetail, ClientError> {
        let path = format!(
            "/admin/sites/{}/payrolls/{}/{}",
            key.site_id, key.worker_id, key.payroll_id
        );
        let endpoint = format!("GET {path}");

        let resp = self
            .http
            .get(self.url(&path))
            .header(AUTHORIZATION, auth.header_value()?)
            .send()
            .await
            .map_err(|e| ClientError::Http {
                endpoint: endpoint.clone(),
                source: e,
            })?;

        let detail = decode_payroll(&endpoint, check_response(&endpoint, resp).await?).await?;
        if !is_consistent(&detail) {
            warn!(
                endpoint = %endpoint,
                server_total = %detail.total_deductions,
                server_net_pay = %detail.net_pay,
                "Server derived fields disagree with their inputs; recomputing"
            );
        }
        info!(endpoint = %endpoint, "Payroll fetched");
        Ok(recompute(&detail))
    }

    /// Saves the editable inputs of a payroll record and returns the
    /// server's canonical version.
    ///
    /// Calls `PATCH {base_url}/admin/sites/{siteId}/payrolls/{payrollId}`.
    pub async fn update_payroll(
        &self,
        auth: &AuthContext,
        site_id: u64,
        payroll_id: u64,
        update: &PayrollUpdate,
    ) -> Result<PayrollDetail, ClientError> {
        let path = format!("/admin/sites/{site_id}/payrolls/{payroll_id}");
        let endpoint = format!("PATCH {path}");

        let resp = self
            .http
            .patch(self.url(&path))
            .header(AUTHORIZATION, auth.header_value()?)
            .json(update)
            .send()
            .await
            .map_err(|e| ClientError::Http {
                endpoint: endpoint.clone(),
                source: e,
            })?;

        let detail = decode_payroll(&endpoint, check_response(&endpoint, resp).await?).await?;
        info!(endpoint = %endpoint, net_pay = %detail.net_pay, "Payroll saved");
        Ok(recompute(&detail))
    }
}

/// Uniform handling of every response: 401 becomes
/// [`ClientError::AuthExpired`], any other non-2xx becomes
/// [`ClientError::Api`]. Redirecting to login is the caller's decision.
async fn check_response(
    endpoint: &str,
    resp: reqwest::Response,
) -> Result<reqwest::Response, ClientError> {
    let status = resp.status();
    if status == StatusCode::UNAUTHORIZED {
        warn!(endpoint = %endpoint, "Bearer token rejected");
        return Err(ClientError::AuthExpired {
            endpoint: endpoint.to_string(),
        });
    }

    if !status.is_success() {
        let body = resp
            .text()
            .await
            .unwrap_or_else(|e| format!("<failed to read response body: {e}>"));
        warn!(endpoint = %endpoint, status = status.as_u16(), "Site API request failed");
        return Err(ClientError::Api {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
            message: error_message(&body),
        });
    }

    debug!(endpoint = %endpoint, status = status.as_u16(), "Site API request succeeded");
    Ok(resp)
}

async fn decode_payroll(
    endpoint: &str,
    resp: reqwest::Response,
) -> Result<PayrollDetail, ClientError> {
    resp.json::<ApiEnvelope<PayrollDetail>>()
        .await
        .map_err(|e| ClientError::Deserialization {
            endpoint: endpoint.to_string(),
            source: e,
        })?
        .into_data(endpoint)
}

impl PayrollStore for SitePayrollClient {
    async fn fetch(&self, auth: &AuthContext, key: &PayrollKey) -> Result<PayrollDetail, ClientError> {
        self.fetch_payroll(auth, key).await
    }

    async fn save(
        &self,
        auth: &AuthContext,
        key: &PayrollKey,
        update: &PayrollUpdate,
    ) -> Result<PayrollDetail, ClientError> {
        self.update_payroll(auth, key.site_id, key.payroll_id, update)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> SitePayrollClient {
        SitePayrollClient::new(&RemoteApiConfig {
            base_url: base.parse().unwrap(),
            timeout_secs: 5,
        })
        .unwrap()
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        assert_eq!(
            client("http://127.0.0.1:9000/").url("/admin/sites/1/payrolls/2"),
            "http://127.0.0.1:9000/admin/sites/1/payrolls/2"
        );
    }

    #[test]
    fn test_url_keeps_base_path_prefix() {
        assert_eq!(
            client("https://api.example.com/v1").url("/admin/sites/1/payrolls/2"),
            "https://api.example.com/v1/admin/sites/1/payrolls/2"
        );
    }
}
