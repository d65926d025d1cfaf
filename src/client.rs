use crate::{
    config::{Config, ConfigBuilder},
    error::{ClientError, Result},
};
use reqwest::{header::CONTENT_TYPE, Method, Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use std::time::Duration;

/// The main client for the messages-worker service.
///
/// `Client` submits messages, inspects and scales the worker pools, and checks
/// service health. Each operation is exactly one HTTP round trip: nothing is
/// retried or cached. The client is cheap to clone and safe to share between
/// tasks, since every clone reuses the same connection pool.
///
/// Errors are only ever returned, never logged. Each request and response
/// status is emitted as a `tracing` event at `DEBUG` level under the
/// `messages_worker_client` target; these are diagnostics that stay silent
/// unless the application installs a subscriber.
///
/// # Examples
///
/// ```no_run
/// use messages_worker_client::{Client, Priority};
///
/// #[tokio::main]
/// async fn main() -> Result<(), messages_worker_client::ClientError> {
///     let client = Client::new("http://localhost:8083")?;
///
///     let response = client
///         .post_high_priority_message(
///             "pr-123",
///             "https://example.com/callback",
///             serde_json::json!({ "title": "Add new feature" }),
///         )
///         .await?;
///     println!("Published message {}", response.id);
///
///     let added = client.add_workers(Priority::High, 2).await?;
///     println!("{}", added.message);
///
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    config: Config,
    http: reqwest::Client,
}

impl Client {
    /// Creates a client for the service at `base_url` with the default
    /// 30 second timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidConfig`] if the underlying HTTP client
    /// cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_config(ConfigBuilder::new().base_url(base_url).build())
    }

    /// Creates a client pointed at `http://localhost:8083`.
    pub fn with_defaults() -> Result<Self> {
        Self::with_config(Config::default())
    }

    /// Creates a client from an explicit [`Config`].
    ///
    /// A zero timeout is replaced by the default one.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use messages_worker_client::{Client, ConfigBuilder};
    /// use std::time::Duration;
    ///
    /// # fn example() -> Result<(), messages_worker_client::ClientError> {
    /// let config = ConfigBuilder::new()
    ///     .base_url("https://workers.example.com")
    ///     .timeout(Duration::from_secs(5))
    ///     .build();
    ///
    /// let client = Client::with_config(config)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_config(config: Config) -> Result<Self> {
        let config = config.normalized();
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClientError::InvalidConfig(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { config, http })
    }

    /// Returns a [`ConfigBuilder`], equivalent to [`ConfigBuilder::new()`].
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.config.timeout
    }

    /// Sends one request to `path` under the base URL. A body, when given, is
    /// encoded as JSON before anything goes on the wire.
    pub(crate) async fn send<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<Response>
    where
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.config.base_url, path);
        let mut request = self.http.request(method.clone(), &url);

        if let Some(body) = body {
            let json_body = serde_json::to_vec(body).map_err(ClientError::Serialization)?;
            request = request.header(CONTENT_TYPE, "application/json").body(json_body);
        }

        tracing::debug!(%method, path, "sending request");

        request.send().await.map_err(|e| self.transport_error(e))
    }

    /// Reads the whole body and decodes it into `R`, or into an API error if
    /// the status says so.
    pub(crate) async fn parse_response<R>(&self, response: Response) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let status = response.status();
        let body = response.bytes().await.map_err(|e| self.transport_error(e))?;

        tracing::debug!(status = status.as_u16(), len = body.len(), "received response");

        decode_body(status, &body)
    }

    pub(crate) async fn get<R>(&self, path: &str) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let response = self.send(Method::GET, path, None::<&()>).await?;
        self.parse_response(response).await
    }

    pub(crate) async fn post<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self.send(Method::POST, path, Some(body)).await?;
        self.parse_response(response).await
    }

    pub(crate) async fn post_empty<R>(&self, path: &str) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let response = self.send(Method::POST, path, None::<&()>).await?;
        self.parse_response(response).await
    }

    fn transport_error(&self, error: reqwest::Error) -> ClientError {
        if error.is_timeout() {
            ClientError::Timeout(self.config.timeout.as_millis() as u64)
        } else {
            ClientError::Transport(error)
        }
    }
}

/// Fails with [`ClientError::Api`] carrying the raw body for any status of
/// 400 or above. The body is never parsed on this path.
pub(crate) fn check_status(status: StatusCode, body: &[u8]) -> Result<&[u8]> {
    if status.as_u16() >= 400 {
        return Err(ClientError::Api {
            status: status.as_u16(),
            message: String::from_utf8_lossy(body).into_owned(),
        });
    }

    Ok(body)
}

pub(crate) fn decode_body<R>(status: StatusCode, body: &[u8]) -> Result<R>
where
    R: DeserializeOwned,
{
    let body = check_status(status, body)?;
    serde_json::from_slice(body).map_err(ClientError::Decode)
}

/// Reads `null` or a missing field as `T::default()`. The service encodes
/// empty lists as `null`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::MessageResponse;

    fn status(code: u16) -> StatusCode {
        StatusCode::from_u16(code).unwrap()
    }

    #[test]
    fn test_decode_body_success() {
        let body = br#"{"id":"msg-123","status":"published","itemId":"test-123","priority":"high","topic":"pullrequests"}"#;

        let response: MessageResponse = decode_body(status(201), body).unwrap();
        assert_eq!(response.id, "msg-123");
        assert_eq!(response.status, "published");
        assert_eq!(response.item_id, "test-123");
    }

    #[test]
    fn test_decode_body_server_error_keeps_raw_body() {
        let result = decode_body::<MessageResponse>(status(500), b"Service Unavailable");
        match result {
            Err(ClientError::Api { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "Service Unavailable");
            }
            _ => panic!("Expected API error"),
        }
    }

    #[test]
    fn test_decode_body_error_status_ignores_json_body() {
        let body = br#"{"error":"bad priority"}"#;
        let result = decode_body::<MessageResponse>(status(400), body);
        match result {
            Err(ClientError::Api { status, message }) => {
                assert_eq!(status, 400);
                assert_eq!(message, r#"{"error":"bad priority"}"#);
            }
            _ => panic!("Expected API error"),
        }
    }

    #[test]
    fn test_decode_body_malformed_json() {
        let result = decode_body::<MessageResponse>(status(200), b"{\"id\": invalid}");
        assert!(matches!(result, Err(ClientError::Decode(_))));

        let result = decode_body::<MessageResponse>(status(200), b"");
        assert!(matches!(result, Err(ClientError::Decode(_))));
    }

    #[test]
    fn test_status_code_boundaries() {
        assert!(check_status(status(200), b"").is_ok());
        assert!(check_status(status(399), b"").is_ok());
        assert!(matches!(
            check_status(status(400), b""),
            Err(ClientError::Api { status: 400, .. })
        ));
        assert!(matches!(
            check_status(status(599), b"oops"),
            Err(ClientError::Api { status: 599, .. })
        ));
    }

    #[test]
    fn test_check_status_success_skips_parsing() {
        let body = check_status(status(202), b"not json at all").unwrap();
        assert_eq!(body, b"not json at all");
    }

    #[test]
    fn test_client_creation() {
        let client = Client::new("http://workers.internal:8083/").unwrap();
        assert_eq!(client.base_url(), "http://workers.internal:8083");
        assert_eq!(client.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_client_with_defaults() {
        let client = Client::with_defaults().unwrap();
        assert_eq!(client.base_url(), "http://localhost:8083");
        assert_eq!(client.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_client_with_config() {
        let config = Client::builder()
            .base_url("https://example.com")
            .timeout(Duration::from_secs(60))
            .build();

        let client = Client::with_config(config).unwrap();
        assert_eq!(client.base_url(), "https://example.com");
        assert_eq!(client.timeout(), Duration::from_secs(60));
    }

    #[test]
    fn test_client_zero_timeout_uses_default() {
        let config = Client::builder().timeout_ms(0).build();
        let client = Client::with_config(config).unwrap();
        assert_eq!(client.timeout(), Duration::from_secs(30));
    }

    #[tokio::test]
    async fn test_unserializable_body_fails_before_sending() {
        use std::collections::HashMap;

        // JSON object keys must be strings.
        let mut body = HashMap::new();
        body.insert(vec![1u8, 2], "value");

        let client = Client::new("http://127.0.0.1:9").unwrap();
        let result = client.send(Method::POST, "/api/v1/messages", Some(&body)).await;
        assert!(matches!(result, Err(ClientError::Serialization(_))));
    }
}
