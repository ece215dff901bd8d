//! Signed HTTP client for beacon endpoints.
//!
//! One client instance performs one signed GET per call: either a variant
//! query against `/query` or a beacon info request against `/`. The response
//! body is pretty-printed to stdout; log lines go to stderr.

use crate::sign::{RequestSigner, X_BEACON_USER, http_date};
use crate::variant::Variant;
use crate::{Error, Result};
use reqwest::header::{AUTHORIZATION, DATE};
use reqwest::{Client, StatusCode};
use serde_json::Value;

/// Result of a beacon exchange: the HTTP status and the JSON body, when one
/// was present and parsable.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub status: StatusCode,
    pub body: Option<Value>,
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// Beacon client issuing signed GET requests.
pub struct BeaconClient {
    http: Client,
    endpoint: String,
    user: String,
    signer: RequestSigner,
}

impl BeaconClient {
    /// Create a client for `endpoint`, authenticating as `user`.
    ///
    /// Trailing slashes on the endpoint are stripped; a URL that does not
    /// parse at all is rejected before any network activity.
    pub fn new(endpoint: &str, user: impl Into<String>, signer: RequestSigner) -> Result<Self> {
        url::Url::parse(endpoint)
            .map_err(|e| Error::InvalidEndpoint(format!("{}: {}", endpoint, e)))?;

        Ok(Self {
            http: Client::new(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            user: user.into(),
            signer,
        })
    }

    /// URL for variant queries.
    fn query_url(&self) -> String {
        format!("{}/query", self.endpoint)
    }

    /// URL for beacon info requests.
    fn info_url(&self) -> String {
        format!("{}/", self.endpoint)
    }

    /// Ask the beacon whether `variant` exists.
    pub async fn query(&self, variant: &Variant) -> Result<Outcome> {
        tracing::info!("executing query for {}", variant);
        let outcome = self.execute(&self.query_url(), Some(variant)).await?;
        tracing::info!("done executing variant query");
        Ok(outcome)
    }

    /// Ask the beacon for its info document.
    pub async fn info(&self) -> Result<Outcome> {
        tracing::info!("asking beacon for info");
        let outcome = self.execute(&self.info_url(), None).await?;
        tracing::info!("done asking beacon for info");
        Ok(outcome)
    }

    /// Perform one signed GET and report the outcome.
    ///
    /// A success status with an unparsable body is fatal; on an error status
    /// an unparsable body is discarded and only the status is reported.
    async fn execute(&self, url: &str, variant: Option<&Variant>) -> Result<Outcome> {
        let date = http_date();

        let mut request = self
            .http
            .get(url)
            .header(DATE, &date)
            .header(X_BEACON_USER, &self.user)
            .header(
                AUTHORIZATION,
                self.signer.authorization_header(&date, &self.user),
            );

        if let Some(variant) = variant {
            request = request.query(&variant.to_query());
        }

        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            let body: Value = response.json().await?;
            tracing::info!("=> OK {}", status.as_u16());
            println!("{}", serde_json::to_string_pretty(&body)?);
            Ok(Outcome {
                status,
                body: Some(body),
            })
        } else {
            tracing::info!(
                "=> ERROR: {} ({})",
                status.as_u16(),
                status.canonical_reason().unwrap_or("unknown")
            );
            // non-JSON error bodies are dropped
            let body = response.json::<Value>().await.ok();
            if let Some(body) = &body {
                println!("{}", serde_json::to_string_pretty(body)?);
            }
            Ok(Outcome { status, body })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys;

    fn test_client(endpoint: &str) -> Result<BeaconClient> {
        let key = keys::generate(512).unwrap();
        BeaconClient::new(endpoint, "alice", RequestSigner::new(key, "site-a"))
    }

    #[test]
    fn test_trailing_slashes_stripped() {
        let client = test_client("http://beacon.example.org///").unwrap();
        assert_eq!(client.query_url(), "http://beacon.example.org/query");
        assert_eq!(client.info_url(), "http://beacon.example.org/");
    }

    #[test]
    fn test_no_trailing_slash() {
        let client = test_client("http://beacon.example.org").unwrap();
        assert_eq!(client.query_url(), "http://beacon.example.org/query");
        assert_eq!(client.info_url(), "http://beacon.example.org/");
    }

    #[test]
    fn test_invalid_endpoint_rejected() {
        let result = test_client("not a url");
        assert!(matches!(result, Err(Error::InvalidEndpoint(_))));
    }
}
