//! HTTP client and configuration for the hosted backend.

use crate::error::{RemoteError, Result};
use barwaqo_runtime::RetryPolicy;
use barwaqo_runtime::retry::retry_if;
use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Configuration for the backend connection.
///
/// The base URL and API key come from the application; nothing is
/// hardcoded. Every request carries `timeout`; idempotent reads retry
/// under `read_retry`.
#[derive(Clone)]
pub struct RemoteConfig {
    /// Backend base URL (e.g., `https://project.supabase.co`)
    pub base_url: String,
    /// API key sent as `apikey` and bearer token
    pub api_key: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Retry policy for idempotent reads
    pub read_retry: RetryPolicy,
}

impl RemoteConfig {
    /// Create a config with default timeout (10s) and read retry policy.
    #[must_use]
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            base_url,
            api_key,
            timeout: Duration::from_secs(10),
            read_retry: RetryPolicy::default(),
        }
    }

    /// Set the per-request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the retry policy for idempotent reads.
    #[must_use]
    pub fn with_read_retry(mut self, policy: RetryPolicy) -> Self {
        self.read_retry = policy;
        self
    }
}

// The API key stays out of Debug output and therefore out of the logs.
impl std::fmt::Debug for RemoteConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("read_retry", &self.read_retry)
            .finish()
    }
}

/// Client for the backend's REST surface.
///
/// Stateless request/response: no caching, no session. The order and
/// product operations live in the `orders` and `products` modules as
/// methods on this type.
#[derive(Clone, Debug)]
pub struct RemoteClient {
    http: Client,
    config: RemoteConfig,
}

impl RemoteClient {
    /// Create a client from a config.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::Http`] if the underlying HTTP client cannot
    /// be constructed.
    pub fn new(config: RemoteConfig) -> Result<Self> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, config })
    }

    fn table_url(&self, table: &str) -> String {
        format!(
            "{}/rest/v1/{table}",
            self.config.base_url.trim_end_matches('/')
        )
    }

    fn request(&self, method: Method, table: &str) -> RequestBuilder {
        self.http
            .request(method, self.table_url(table))
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.config.api_key)
    }

    async fn decode_rows<T>(response: reqwest::Response) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(RemoteError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }

    async fn check(response: reqwest::Response) -> Result<()> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(RemoteError::Status {
            status: status.as_u16(),
            body,
        })
    }

    /// Fetch rows from a table. Idempotent, retried on transient failures.
    pub(crate) async fn get_rows<T>(&self, table: &str, query: &[(&str, String)]) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
    {
        retry_if(
            &self.config.read_retry,
            || async {
                tracing::debug!(table, ?query, "fetching rows");
                let response = self
                    .request(Method::GET, table)
                    .query(query)
                    .send()
                    .await?;
                Self::decode_rows(response).await
            },
            RemoteError::is_transient,
        )
        .await
    }

    /// Insert a row and return the stored representation. Single attempt.
    pub(crate) async fn insert_row<T, B>(&self, table: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        tracing::debug!(table, "inserting row");
        let response = self
            .request(Method::POST, table)
            .header("Prefer", "return=representation")
            .json(body)
            .send()
            .await?;

        let rows: Vec<T> = Self::decode_rows(response).await?;
        rows.into_iter()
            .next()
            .ok_or(RemoteError::EmptyRepresentation)
    }

    /// Patch rows matching a filter. Single attempt.
    pub(crate) async fn update_rows<B>(
        &self,
        table: &str,
        query: &[(&str, String)],
        body: &B,
    ) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        tracing::debug!(table, ?query, "updating rows");
        let response = self
            .request(Method::PATCH, table)
            .query(query)
            .json(body)
            .send()
            .await?;
        Self::check(response).await
    }

    /// Delete rows matching a filter. Single attempt.
    pub(crate) async fn delete_rows(&self, table: &str, query: &[(&str, String)]) -> Result<()> {
        tracing::debug!(table, ?query, "deleting rows");
        let response = self
            .request(Method::DELETE, table)
            .query(query)
            .send()
            .await?;
        Self::check(response).await
    }
}
