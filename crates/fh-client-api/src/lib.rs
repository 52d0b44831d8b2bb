//! Capability interface for the FutureHouse task-execution service
//!
//! The CLI dispatches every command through [`TaskServiceApi`]; the REST
//! binding and the mock client both implement it. Keeping the trait free
//! of HTTP types lets dispatch logic be tested without a live service.

use async_trait::async_trait;
use fh_rest_api_contract::{TaskRequest, TaskResult, TaskStatus};
use thiserror::Error;

/// Errors surfaced by task service implementations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// The service answered with an error status and a readable message.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The request did not produce a usable service answer. `status` is
    /// present when a response arrived before the failure.
    #[error("{message}")]
    Transport {
        status: Option<u16>,
        message: String,
    },

    /// The response body could not be decoded.
    #[error("invalid response payload: {0}")]
    Payload(#[from] serde_json::Error),

    /// The service build does not expose this operation.
    #[error("operation `{operation}` is not supported by this service")]
    Unsupported { operation: String },
}

impl TaskServiceError {
    /// Create an API error from a service status and message.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        TaskServiceError::Api {
            status,
            message: message.into(),
        }
    }

    /// Create a transport error, with the response status when one exists.
    pub fn transport(status: Option<u16>, message: impl Into<String>) -> Self {
        TaskServiceError::Transport {
            status,
            message: message.into(),
        }
    }

    /// Create an unsupported-operation error.
    pub fn unsupported(operation: impl Into<String>) -> Self {
        TaskServiceError::Unsupported {
            operation: operation.into(),
        }
    }

    /// HTTP-like status code for this error: the service's own code when it
    /// answered, otherwise the code on the underlying transport response.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            TaskServiceError::Api { status, .. } => Some(*status),
            TaskServiceError::Transport { status, .. } => *status,
            _ => None,
        }
    }

    /// True when the operation is missing from this service build.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, TaskServiceError::Unsupported { .. })
    }
}

pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Operations the CLI needs from a task service. One method per remote
/// capability; implementations own transport, polling, and concurrency.
#[async_trait]
pub trait TaskServiceApi: Send + Sync {
    /// Submit a task and return its identifier without waiting for it.
    async fn create_task(&self, request: &TaskRequest) -> TaskServiceResult<String>;

    /// Submit tasks and drive each to completion one after another.
    /// Results come back in request order.
    async fn run_tasks_until_done(
        &self,
        requests: &[TaskRequest],
        verbose: bool,
    ) -> TaskServiceResult<Vec<TaskResult>>;

    /// Submit tasks and drive them to completion concurrently. The call
    /// still returns only once every task is done, in request order.
    async fn arun_tasks_until_done(
        &self,
        requests: &[TaskRequest],
        verbose: bool,
    ) -> TaskServiceResult<Vec<TaskResult>>;

    /// Fetch the current status snapshot for a task.
    async fn get_task_status(&self, task_id: &str) -> TaskServiceResult<TaskStatus>;

    /// Fetch the final result document for a task.
    async fn get_task_result(
        &self,
        task_id: &str,
        verbose: bool,
    ) -> TaskServiceResult<TaskResult>;

    /// Legacy whole-record accessor kept for older service builds. Shape
    /// parity with [`TaskServiceApi::get_task_result`] is not guaranteed.
    async fn get_task(&self, task_id: &str) -> TaskServiceResult<TaskResult>;
}
