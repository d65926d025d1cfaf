use crate::{
    client::{null_as_default, Client},
    error::{ClientError, Result},
    message::Priority,
};
use serde::{Deserialize, Serialize};

const WORKER_STATUS_PATH: &str = "/api/v1/workers/status";
const REMOVE_ALL_WORKERS_PATH: &str = "/api/v1/workers/remove-all";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WorkerInfo {
    pub id: String,
    pub queue_name: String,
    pub status: String,
    pub started_at: String,
}

/// Workers and backlog of a single priority lane.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PriorityWorkerInfo {
    pub count: u32,
    pub queue_depth: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub workers: Vec<WorkerInfo>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WorkerStatusResponse {
    pub total_workers: u32,
    pub low_priority: PriorityWorkerInfo,
    pub medium_priority: PriorityWorkerInfo,
    pub high_priority: PriorityWorkerInfo,
    #[serde(deserialize_with = "null_as_default")]
    pub all_workers: Vec<WorkerInfo>,
}

impl WorkerStatusResponse {
    pub fn bucket(&self, priority: Priority) -> &PriorityWorkerInfo {
        match priority {
            Priority::Low => &self.low_priority,
            Priority::Medium => &self.medium_priority,
            Priority::High => &self.high_priority,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScaleWorkersResponse {
    pub status: String,
    pub message: String,
    pub priority: String,
    /// Echo of the requested count; negative when workers were removed.
    pub count: i32,
    pub action: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RemoveAllWorkersResponse {
    pub status: String,
    pub message: String,
    pub total_removed: u32,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl Client {
    /// Fetches worker counts, queue depths and worker details for every
    /// priority lane.
    pub async fn get_worker_status(&self) -> Result<WorkerStatusResponse> {
        self.get(WORKER_STATUS_PATH).await
    }

    /// Changes the number of workers serving `priority` by `count`.
    ///
    /// The sign of `count` selects the action: positive adds workers, negative
    /// removes them. Both go through the same endpoint; prefer
    /// [`add_workers`](Self::add_workers) and
    /// [`remove_workers`](Self::remove_workers), which take a positive count.
    ///
    /// # Errors
    ///
    /// * [`ClientError::Validation`] if `priority` is not `low`, `medium` or
    ///   `high`, or if `count` is zero. Nothing is sent in that case.
    /// * [`ClientError::Transport`] or [`ClientError::Timeout`] for network failures
    /// * [`ClientError::Api`] for 4xx/5xx responses
    /// * [`ClientError::Decode`] for an unexpected response body
    pub async fn scale_workers(
        &self,
        priority: impl AsRef<str>,
        count: i32,
    ) -> Result<ScaleWorkersResponse> {
        let priority: Priority = priority.as_ref().parse()?;

        if count == 0 {
            return Err(ClientError::validation("count cannot be 0"));
        }

        let path = format!("/api/v1/workers/scale/{}?count={}", priority, count);
        self.post_empty(&path).await
    }

    /// Starts `count` additional workers for `priority`.
    ///
    /// # Errors
    ///
    /// [`ClientError::Validation`] if `count` is not positive, otherwise the
    /// same errors as [`scale_workers`](Self::scale_workers).
    pub async fn add_workers(
        &self,
        priority: impl AsRef<str>,
        count: i32,
    ) -> Result<ScaleWorkersResponse> {
        if count <= 0 {
            return Err(ClientError::validation("count must be greater than 0"));
        }

        self.scale_workers(priority, count).await
    }

    /// Stops `count` workers serving `priority`.
    ///
    /// # Errors
    ///
    /// [`ClientError::Validation`] if `count` is not positive, otherwise the
    /// same errors as [`scale_workers`](Self::scale_workers).
    pub async fn remove_workers(
        &self,
        priority: impl AsRef<str>,
        count: i32,
    ) -> Result<ScaleWorkersResponse> {
        if count <= 0 {
            return Err(ClientError::validation("count must be greater than 0"));
        }

        self.scale_workers(priority, -count).await
    }

    /// Stops every running worker across all priority lanes.
    pub async fn remove_all_workers(&self) -> Result<RemoveAllWorkersResponse> {
        self.post_empty(REMOVE_ALL_WORKERS_PATH).await
    }

    /// Number of workers serving `priority`.
    ///
    /// The priority is checked before anything is sent. Each call fetches the
    /// full worker status; nothing is cached.
    pub async fn get_worker_count(&self, priority: impl AsRef<str>) -> Result<u32> {
        let priority: Priority = priority.as_ref().parse()?;

        let status = self.get_worker_status().await?;
        Ok(status.bucket(priority).count)
    }

    /// Number of workers across all priority lanes.
    pub async fn get_total_worker_count(&self) -> Result<u32> {
        let status = self.get_worker_status().await?;
        Ok(status.total_workers)
    }
}
