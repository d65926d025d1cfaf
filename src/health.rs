use crate::{
    client::Client,
    error::{ClientError, Result},
};
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};

const HEALTH_PATH: &str = "/health";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthResponse {
    pub status: String,
}

impl Client {
    /// Calls the service health endpoint.
    ///
    /// The endpoint answers with a plain-text `OK`, so the body is not
    /// decoded: a 200 status is reported as [`HealthResponse`] with status
    /// `"OK"`.
    ///
    /// # Errors
    ///
    /// * [`ClientError::Api`] for any status other than 200. Unlike the other
    ///   endpoints the message is `health check failed with status <code>`,
    ///   not the response body.
    /// * [`ClientError::Transport`] or [`ClientError::Timeout`] for network failures
    pub async fn check_health(&self) -> Result<HealthResponse> {
        let response = self.send(Method::GET, HEALTH_PATH, None::<&()>).await?;
        let status = response.status();

        tracing::debug!(status = status.as_u16(), "health check response");

        if status != StatusCode::OK {
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: format!("health check failed with status {}", status.as_u16()),
            });
        }

        Ok(HealthResponse {
            status: "OK".to_string(),
        })
    }

    /// Returns `true` if [`check_health`](Self::check_health) succeeds. The
    /// error, if any, is dropped; call `check_health` to inspect it.
    pub async fn is_healthy(&self) -> bool {
        self.check_health().await.is_ok()
    }

    /// Alias for [`check_health`](Self::check_health).
    pub async fn ping(&self) -> Result<HealthResponse> {
        self.check_health().await
    }
}
