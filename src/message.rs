use crate::{
    client::{null_as_default, Client},
    error::{ClientError, Result},
};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

const MESSAGES_PATH: &str = "/api/v1/messages";
const BULK_MESSAGES_PATH: &str = "/api/v1/messages/bulk";

/// Priority lane a message or worker pool belongs to.
///
/// Serialized in lowercase (`"low"`, `"medium"`, `"high"`) to match the
/// service API. Parsing from a string accepts exactly those three values.
///
/// # Examples
///
/// ```
/// use messages_worker_client::Priority;
///
/// let priority: Priority = "high".parse().unwrap();
/// assert_eq!(priority, Priority::High);
/// assert!("urgent".parse::<Priority>().is_err());
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl FromStr for Priority {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            "" => Err(ClientError::validation("priority is required")),
            _ => Err(ClientError::validation(
                "priority must be 'low', 'medium', or 'high'",
            )),
        }
    }
}

impl AsRef<str> for Priority {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Message category. The service currently routes a single topic.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Topic {
    #[serde(rename = "pullrequests")]
    PullRequests,
}

/// A message to submit for processing.
///
/// `object_body` is forwarded to the service as-is; any [`Serialize`] type
/// works, with [`serde_json::Value`] as the default.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MessageRequest<B = serde_json::Value> {
    pub item_id: String,
    pub priority: Priority,
    pub topic: Topic,
    pub callback_url: String,
    pub object_body: B,
}

impl<B> MessageRequest<B> {
    pub fn new(
        item_id: impl Into<String>,
        priority: Priority,
        callback_url: impl Into<String>,
        object_body: B,
    ) -> Self {
        Self {
            item_id: item_id.into(),
            priority,
            topic: Topic::PullRequests,
            callback_url: callback_url.into(),
            object_body,
        }
    }
}

/// Server acknowledgement of a submitted message.
///
/// `priority` and `topic` are echoed as the service reports them, so they
/// stay plain strings; compare with [`Priority::as_str`] when needed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MessageResponse {
    pub id: String,
    pub status: String,
    #[serde(rename = "itemId")]
    pub item_id: String,
    pub priority: String,
    pub topic: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BulkMessageRequest<B = serde_json::Value> {
    pub messages: Vec<MessageRequest<B>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BulkMessageResponse {
    pub status: String,
    pub count: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub messages: Vec<MessageResponse>,
}

impl Client {
    /// Submits a single message.
    ///
    /// Priority, topic and body are not checked locally; the service decides
    /// whether the message is acceptable.
    ///
    /// # Errors
    ///
    /// * [`ClientError::Serialization`] if `object_body` cannot be encoded
    /// * [`ClientError::Transport`] or [`ClientError::Timeout`] for network failures
    /// * [`ClientError::Api`] for 4xx/5xx responses
    /// * [`ClientError::Decode`] if the response is not a [`MessageResponse`]
    pub async fn post_message<B>(&self, request: &MessageRequest<B>) -> Result<MessageResponse>
    where
        B: Serialize,
    {
        self.post(MESSAGES_PATH, request).await
    }

    /// Submits several messages in one request.
    ///
    /// # Errors
    ///
    /// [`ClientError::Validation`] if `request.messages` is empty, without
    /// contacting the service. Otherwise the same errors as
    /// [`post_message`](Self::post_message).
    pub async fn post_bulk_messages<B>(
        &self,
        request: &BulkMessageRequest<B>,
    ) -> Result<BulkMessageResponse>
    where
        B: Serialize,
    {
        if request.messages.is_empty() {
            return Err(ClientError::validation("no messages provided"));
        }

        self.post(BULK_MESSAGES_PATH, request).await
    }

    /// Submits a medium priority message on the pull request topic.
    pub async fn post_message_with_defaults<B>(
        &self,
        item_id: impl Into<String>,
        callback_url: impl Into<String>,
        object_body: B,
    ) -> Result<MessageResponse>
    where
        B: Serialize,
    {
        let request = MessageRequest::new(item_id, Priority::Medium, callback_url, object_body);
        self.post_message(&request).await
    }

    /// Submits a high priority message on the pull request topic.
    pub async fn post_high_priority_message<B>(
        &self,
        item_id: impl Into<String>,
        callback_url: impl Into<String>,
        object_body: B,
    ) -> Result<MessageResponse>
    where
        B: Serialize,
    {
        let request = MessageRequest::new(item_id, Priority::High, callback_url, object_body);
        self.post_message(&request).await
    }

    /// Submits a low priority message on the pull request topic.
    pub async fn post_low_priority_message<B>(
        &self,
        item_id: impl Into<String>,
        callback_url: impl Into<String>,
        object_body: B,
    ) -> Result<MessageResponse>
    where
        B: Serialize,
    {
        let request = MessageRequest::new(item_id, Priority::Low, callback_url, object_body);
        self.post_message(&request).await
    }
}
