//! Client implementation for the DOI registration service.
//!
//! This module provides the [`CitationService`] contract — the four remote
//! operations the request controller sequences — and its reqwest-backed
//! implementation. Every call is addressed against a base URL resolved just
//! beforehand through the page collaborator, so the client itself stays
//! endpoint-free.
//!
//! The service exchanges JSON documents (see [`crate::wire`]) and relies on
//! session cookies for authorization, so the HTTP client keeps a cookie
//! store. Failures carry the service's response payload; there is no retry
//! and no local timeout beyond the transport's own.
//!
//! # Examples
//!
//! ```no_run
//! use citer::client::{CitationClient, CitationService};
//! use url::Url;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = CitationClient::new()?;
//! let endpoint = Url::parse("https://apps.canfar.net/doi/instances")?;
//! let record = client.fetch(&endpoint, "AB.1234").await?;
//!
//! println!("DOI: {}", record.resource.identifier.value);
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use url::Url;

use super::*;

/// The remote operations offered by the DOI service.
///
/// Each method is addressed against an explicitly resolved base URL: the
/// controller first resolves the endpoint through the page, then issues the
/// request, so the two asynchronous phases stay sequenced per call.
#[async_trait]
pub trait CitationService: Send + Sync {
  /// Submits a metadata record for registration (create or update). The
  /// response is the full record, including the assigned identifier.
  async fn create(
    &self,
    endpoint: &Url,
    document: &ResourceDocument,
  ) -> Result<ResourceDocument, CiterError>;

  /// Fetches the full record registered under a DOI suffix.
  async fn fetch(&self, endpoint: &Url, suffix: &str) -> Result<ResourceDocument, CiterError>;

  /// Deletes the record registered under a DOI suffix.
  async fn delete(&self, endpoint: &Url, suffix: &str) -> Result<(), CiterError>;

  /// Fetches the registration status of a DOI suffix.
  async fn status(&self, endpoint: &Url, suffix: &str) -> Result<StatusDocument, CiterError>;
}

/// Reqwest-backed [`CitationService`] implementation.
///
/// The underlying HTTP client is reused across calls and keeps a cookie
/// store, since the service authorizes requests through session cookies.
pub struct CitationClient {
  /// Internal web client used to connect to the service.
  client: reqwest::Client,
}

impl CitationClient {
  /// Creates a new service client instance.
  ///
  /// # Errors
  ///
  /// Returns a [`CiterError::Network`] if the underlying HTTP client cannot
  /// be constructed.
  pub fn new() -> Result<Self, CiterError> {
    Ok(Self { client: reqwest::Client::builder().cookie_store(true).build()? })
  }
}

#[async_trait]
impl CitationService for CitationClient {
  async fn create(
    &self,
    endpoint: &Url,
    document: &ResourceDocument,
  ) -> Result<ResourceDocument, CiterError> {
    debug!("Submitting metadata record to: {endpoint}");
    let response = self.client.post(endpoint.as_str()).json(document).send().await?;
    read_json(response).await
  }

  async fn fetch(&self, endpoint: &Url, suffix: &str) -> Result<ResourceDocument, CiterError> {
    let url = record_url(endpoint, suffix);
    debug!("Fetching metadata record from: {url}");
    let response = self.client.get(&url).send().await?;
    read_json(response).await
  }

  async fn delete(&self, endpoint: &Url, suffix: &str) -> Result<(), CiterError> {
    let url = record_url(endpoint, suffix);
    debug!("Deleting metadata record at: {url}");
    let response = self.client.delete(&url).send().await?;
    let status = response.status();
    if !status.is_success() {
      let body = response.text().await.unwrap_or_default();
      return Err(api_error(status, body));
    }
    Ok(())
  }

  async fn status(&self, endpoint: &Url, suffix: &str) -> Result<StatusDocument, CiterError> {
    let url = format!("{}/status", record_url(endpoint, suffix));
    debug!("Fetching registration status from: {url}");
    let response = self.client.get(&url).send().await?;
    read_json(response).await
  }
}

/// Builds the record URL for a suffix under the resolved endpoint.
fn record_url(endpoint: &Url, suffix: &str) -> String {
  format!("{}/{}", endpoint.as_str().trim_end_matches('/'), suffix)
}

/// Reads a response's JSON body, surfacing non-success statuses and
/// unparseable payloads as service errors.
async fn read_json<T: serde::de::DeserializeOwned>(
  response: reqwest::Response,
) -> Result<T, CiterError> {
  let status = response.status();
  let text = response.text().await?;
  debug!("Service response ({status}): {text}");
  if !status.is_success() {
    return Err(api_error(status, text));
  }
  serde_json::from_str(&text).map_err(|e| CiterError::Api(format!("Failed to parse JSON: {}", e)))
}

/// Builds the service error for a failed response, falling back to the
/// status line when the body is empty.
fn api_error(status: reqwest::StatusCode, body: String) -> CiterError {
  if body.is_empty() {
    CiterError::Api(status.to_string())
  } else {
    CiterError::Api(body)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_record_url_handles_trailing_slash() {
    let endpoint = Url::parse("https://apps.canfar.net/doi/instances/").unwrap();
    assert_eq!(record_url(&endpoint, "AB.1234"), "https://apps.canfar.net/doi/instances/AB.1234");

    let endpoint = Url::parse("https://apps.canfar.net/doi/instances").unwrap();
    assert_eq!(record_url(&endpoint, "AB.1234"), "https://apps.canfar.net/doi/instances/AB.1234");
  }

  #[test]
  fn test_api_error_falls_back_to_status_line() {
    let status = reqwest::StatusCode::NOT_FOUND;
    match api_error(status, String::new()) {
      CiterError::Api(message) => assert!(message.contains("404")),
      other => panic!("unexpected error: {other:?}"),
    }
    match api_error(status, "DOI not found".to_string()) {
      CiterError::Api(message) => assert_eq!(message, "DOI not found"),
      other => panic!("unexpected error: {other:?}"),
    }
  }
}
