//! Main ConsoleClient

use std::sync::Arc;
use std::time::Duration;

use log::debug;
use log::warn;
use reqwest::Client;
use reqwest::Method;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::auth::TokenProvider;
use crate::error::ApiError;
use crate::error::AuthError;
use crate::error::Error;
use crate::rate_limit::RetryConfig;

/// The client for the admin REST API.
///
/// This client is cheap to clone (uses `Arc` internally) and can be shared
/// across tasks. Authentication is explicit: every request asks the
/// client's [`TokenProvider`] for a token.
///
/// # Example
///
/// ```ignore
/// use console_lib::{ConsoleClient, auth::StaticTokenProvider};
///
/// let client = ConsoleClient::builder()
///     .url("https://api.example.com")
///     .token_provider(StaticTokenProvider::new("my-token"))
///     .build()?;
///
/// let stats = client.statistics().await?;
/// ```
#[derive(Clone)]
pub struct ConsoleClient {
    inner: Arc<ConsoleClientInner>,
}

struct ConsoleClientInner {
    base_url: String,
    api_version: String,
    token_provider: Arc<dyn TokenProvider>,
    http_client: Client,
    timeout: Option<Duration>,
    retry: RetryConfig,
}

impl ConsoleClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> ConsoleClientBuilder<Missing, Missing> {
        ConsoleClientBuilder::new()
    }

    /// Returns the base URL of the API.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Returns the API version prefix being used.
    pub fn api_version(&self) -> &str {
        &self.inner.api_version
    }

    /// Returns the retry policy applied to reads.
    pub fn retry_config(&self) -> &RetryConfig {
        &self.inner.retry
    }

    /// Builds the absolute URL for an API-relative path.
    pub fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}/{}",
            self.inner.base_url.trim_end_matches('/'),
            self.inner.api_version,
            path.trim_start_matches('/')
        )
    }

    /// Sends a GET and decodes the JSON body, retrying transient failures.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, Error> {
        let mut attempt = 0;
        loop {
            match self.send(Method::GET, path, query, None, true).await {
                Ok(body) => return decode(&body),
                Err(Error::Api(err)) if self.inner.retry.should_retry(&err, attempt) => {
                    let delay = self.inner.retry.delay_for(attempt);
                    warn!("GET {} failed ({}), retrying in {:?}", path, err, delay);
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Sends a body-carrying request and decodes the JSON response.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &Value,
        authenticated: bool,
    ) -> Result<T, Error> {
        let text = self.send(method, path, &[], Some(body), authenticated).await?;
        decode(&text)
    }

    /// Sends a request whose response body is ignored.
    pub(crate) async fn send_empty(&self, method: Method, path: &str) -> Result<(), Error> {
        self.send(method, path, &[], None, true).await.map(|_| ())
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
        authenticated: bool,
    ) -> Result<String, Error> {
        let url = self.url_for(path);
        debug!("{} {} {:?}", method, url, query);

        let mut request = self.inner.http_client.request(method, &url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        if authenticated {
            let token = self.inner.token_provider.get_token().await?;
            request = request.bearer_auth(&token.access_token);
        }
        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(|e| self.map_transport(e))?;
        let status = response.status();
        let text = response.text().await.map_err(|e| self.map_transport(e))?;

        if status.is_success() {
            Ok(text)
        } else if status == StatusCode::UNAUTHORIZED && authenticated {
            let message = ApiError::from_body(status.as_u16(), &text).to_string();
            Err(Error::Auth(AuthError::TokenRejected { message }))
        } else {
            Err(Error::Api(ApiError::from_body(status.as_u16(), &text)))
        }
    }

    fn map_transport(&self, err: reqwest::Error) -> Error {
        match (err.is_timeout(), self.inner.timeout) {
            (true, Some(timeout)) => Error::Api(ApiError::Timeout(timeout)),
            _ => Error::Api(ApiError::Network(err)),
        }
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, Error> {
    // DELETE and some PATCH endpoints answer 204 with no body.
    let body = if body.trim().is_empty() { "null" } else { body };
    serde_json::from_str(body)
        .map_err(|e| Error::Api(ApiError::parse_with_body(e.to_string(), body)))
}

/// Validates an API base URL: it must be absolute http(s) with a host.
fn validate_base_url(base: &str) -> Result<(), ApiError> {
    let parsed = Url::parse(base).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", base, e)))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ApiError::InvalidUrl(format!(
            "{}: scheme must be http or https",
            base
        )));
    }
    if parsed.host_str().is_none() {
        return Err(ApiError::InvalidUrl(format!("{}: missing host", base)));
    }
    Ok(())
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing a [`ConsoleClient`].
///
/// Uses the typestate pattern to ensure required fields are set at compile time.
///
/// # Required Fields
///
/// - `url` - The API root URL (without the version prefix)
/// - `token_provider` - A [`TokenProvider`] implementation
pub struct ConsoleClientBuilder<U, P> {
    url: U,
    token_provider: P,
    api_version: String,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    http_client: Option<Client>,
    retry: RetryConfig,
}

impl ConsoleClientBuilder<Missing, Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            url: Missing,
            token_provider: Missing,
            api_version: "v1".to_string(),
            timeout: Some(Duration::from_secs(30)),
            connect_timeout: None,
            http_client: None,
            retry: RetryConfig::default(),
        }
    }
}

impl Default for ConsoleClientBuilder<Missing, Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> ConsoleClientBuilder<Missing, P> {
    /// Sets the API root URL.
    pub fn url(self, url: impl Into<String>) -> ConsoleClientBuilder<Set<String>, P> {
        ConsoleClientBuilder {
            url: Set(url.into()),
            token_provider: self.token_provider,
            api_version: self.api_version,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
            retry: self.retry,
        }
    }
}

impl<U> ConsoleClientBuilder<U, Missing> {
    /// Sets the token provider for authentication.
    pub fn token_provider<T: TokenProvider + 'static>(
        self,
        provider: T,
    ) -> ConsoleClientBuilder<U, Set<Arc<dyn TokenProvider>>> {
        ConsoleClientBuilder {
            url: self.url,
            token_provider: Set(Arc::new(provider) as Arc<dyn TokenProvider>),
            api_version: self.api_version,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
            retry: self.retry,
        }
    }
}

impl<U, P> ConsoleClientBuilder<U, P> {
    /// Sets the API version prefix.
    ///
    /// Defaults to `v1`.
    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Sets the request timeout. Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    ///
    /// This is applied when building the HTTP client.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets a custom HTTP client.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Sets the retry policy for reads.
    pub fn retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }
}

impl ConsoleClientBuilder<Set<String>, Set<Arc<dyn TokenProvider>>> {
    /// Builds the [`ConsoleClient`].
    ///
    /// Fails if the URL is not an absolute http(s) URL or the HTTP client
    /// cannot be constructed.
    pub fn build(self) -> Result<ConsoleClient, Error> {
        validate_base_url(&self.url.0)?;

        let http_client = match self.http_client {
            Some(client) => client,
            None => {
                let mut builder = Client::builder();
                if let Some(timeout) = self.connect_timeout {
                    builder = builder.connect_timeout(timeout);
                }
                builder.build().map_err(ApiError::from)?
            }
        };

        Ok(ConsoleClient {
            inner: Arc::new(ConsoleClientInner {
                base_url: self.url.0,
                api_version: self.api_version,
                token_provider: self.token_provider.0,
                http_client,
                timeout: self.timeout,
                retry: self.retry,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::StaticTokenProvider;

    #[test]
    fn test_url_for_joins_version_and_path() {
        let client = ConsoleClient::builder()
            .url("https://api.example.com/")
            .token_provider(StaticTokenProvider::new("t"))
            .build()
            .unwrap();
        assert_eq!(client.url_for("/users"), "https://api.example.com/v1/users");
        assert_eq!(client.url_for("users/42"), "https://api.example.com/v1/users/42");
    }

    #[test]
    fn test_build_rejects_invalid_urls() {
        for url in ["not a url", "ftp://files.example.com", "file:///tmp/x"] {
            let result = ConsoleClient::builder()
                .url(url)
                .token_provider(StaticTokenProvider::new("t"))
                .build();
            assert!(
                matches!(result, Err(Error::Api(ApiError::InvalidUrl(_)))),
                "{} should be rejected",
                url
            );
        }
    }

    #[test]
    fn test_decode_empty_body_as_unit() {
        let _: () = decode("").unwrap();
        assert!(matches!(
            decode::<Vec<u8>>("{oops"),
            Err(Error::Api(ApiError::Parse { .. }))
        ));
    }
}
