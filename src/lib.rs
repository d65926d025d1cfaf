//! # Messages-Worker Rust Client
//!
//! A Rust client library for the messages-worker service: an HTTP API that
//! accepts prioritized messages and runs pools of workers consuming them.
//!
//! This library provides an async, type-safe interface for submitting
//! messages, observing and scaling the worker pools, and probing service
//! health. Each call is a single HTTP round trip; failures are returned to
//! the caller and never retried internally.
//!
//! ## Quick Start
//!
//! ```no_run
//! use messages_worker_client::{Client, MessageRequest, Priority};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::new("http://localhost:8083")?;
//!
//!     if !client.is_healthy().await {
//!         return Ok(());
//!     }
//!
//!     let request = MessageRequest::new(
//!         "pr-123",
//!         Priority::High,
//!         "https://example.com/callback",
//!         json!({ "pull_request": { "id": 123, "status": "open" } }),
//!     );
//!     let message = client.post_message(&request).await?;
//!     println!("Published message {} ({})", message.id, message.status);
//!
//!     let status = client.get_worker_status().await?;
//!     println!("{} workers running", status.total_workers);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Async/await support** - Built on `reqwest` with a shared connection pool
//! - **Local validation** - Bad priorities and counts fail before any request is sent
//! - **Type safety** - Strong typing with `serde` for JSON serialization
//! - **Opaque payloads** - Any `Serialize` type can be forwarded as a message body
//! - **Error handling** - One error enum separating validation, transport and API failures
//!
//! ## Configuration
//!
//! Use [`ConfigBuilder`] for custom settings:
//!
//! ```no_run
//! use messages_worker_client::{Client, ConfigBuilder};
//! use std::time::Duration;
//!
//! # fn example() -> Result<(), messages_worker_client::ClientError> {
//! let client = Client::with_config(
//!     ConfigBuilder::new()
//!         .base_url("https://workers.example.com")
//!         .timeout(Duration::from_secs(10))
//!         .build(),
//! )?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod health;
pub mod message;
pub mod worker;

pub use client::Client;
pub use config::{Config, ConfigBuilder};
pub use error::{ClientError, Result};
pub use health::HealthResponse;
pub use message::{
    BulkMessageRequest, BulkMessageResponse, MessageRequest, MessageResponse, Priority, Topic,
};
pub use worker::{
    PriorityWorkerInfo, RemoveAllWorkersResponse, ScaleWorkersResponse, WorkerInfo,
    WorkerStatusResponse,
};
