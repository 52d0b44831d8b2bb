//! Mock task service backed by canned behaviors
//!
//! Implements [`TaskServiceApi`] without any HTTP so CLI dispatch logic can
//! be exercised in tests. Behaviors cover the paths the CLI cares about: a
//! healthy service, a service answering every call with one error, and an
//! older build that lacks the result route.

use async_trait::async_trait;
use fh_client_api::{TaskServiceApi, TaskServiceError, TaskServiceResult};
use fh_rest_api_contract::*;
use serde_json::{json, Map, Value};

#[derive(Debug, Clone)]
enum Behavior {
    Healthy,
    Failing {
        status: Option<u16>,
        message: String,
    },
    LegacyResults {
        record: Value,
    },
}

/// Canned in-process stand-in for the task service.
pub struct MockTaskService {
    behavior: Behavior,
    task_id: String,
}

impl MockTaskService {
    /// Mock of a healthy service; created tasks complete immediately.
    pub fn healthy() -> Self {
        Self {
            behavior: Behavior::Healthy,
            task_id: "task-0001".to_string(),
        }
    }

    /// Mock answering every call with a service error. A `status` of `Some`
    /// mimics an HTTP error answer, `None` a transport failure.
    pub fn failing(status: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            behavior: Behavior::Failing {
                status,
                message: message.into(),
            },
            task_id: "task-0001".to_string(),
        }
    }

    /// Mock of an older service build where only the legacy task record
    /// route exists.
    pub fn legacy_results(record: Value) -> Self {
        Self {
            behavior: Behavior::LegacyResults { record },
            task_id: "task-0001".to_string(),
        }
    }

    /// Use a fixed identifier for created tasks.
    pub fn with_task_id(mut self, task_id: impl Into<String>) -> Self {
        self.task_id = task_id.into();
        self
    }

    fn fail(&self) -> Option<TaskServiceError> {
        match &self.behavior {
            Behavior::Failing { status, message } => Some(match status {
                Some(code) => TaskServiceError::api(*code, message.clone()),
                None => TaskServiceError::transport(None, message.clone()),
            }),
            _ => None,
        }
    }

    fn result_for(&self, request: &TaskRequest) -> TaskResult {
        json!({
            "task_id": self.task_id,
            "status": "success",
            "query": request.query,
        })
    }
}

#[async_trait]
impl TaskServiceApi for MockTaskService {
    async fn create_task(&self, _request: &TaskRequest) -> TaskServiceResult<String> {
        if let Some(err) = self.fail() {
            return Err(err);
        }
        Ok(self.task_id.clone())
    }

    async fn run_tasks_until_done(
        &self,
        requests: &[TaskRequest],
        _verbose: bool,
    ) -> TaskServiceResult<Vec<TaskResult>> {
        if let Some(err) = self.fail() {
            return Err(err);
        }
        Ok(requests.iter().map(|r| self.result_for(r)).collect())
    }

    async fn arun_tasks_until_done(
        &self,
        requests: &[TaskRequest],
        verbose: bool,
    ) -> TaskServiceResult<Vec<TaskResult>> {
        self.run_tasks_until_done(requests, verbose).await
    }

    async fn get_task_status(&self, task_id: &str) -> TaskServiceResult<TaskStatus> {
        if let Some(err) = self.fail() {
            return Err(err);
        }
        let mut extra = Map::new();
        extra.insert("task_id".to_string(), Value::String(task_id.to_string()));
        Ok(TaskStatus {
            status: "success".to_string(),
            extra,
        })
    }

    async fn get_task_result(
        &self,
        task_id: &str,
        _verbose: bool,
    ) -> TaskServiceResult<TaskResult> {
        if let Some(err) = self.fail() {
            return Err(err);
        }
        match &self.behavior {
            Behavior::LegacyResults { .. } => Err(TaskServiceError::unsupported("get_task_result")),
            _ => Ok(json!({"task_id": task_id, "status": "success"})),
        }
    }

    async fn get_task(&self, task_id: &str) -> TaskServiceResult<TaskResult> {
        if let Some(err) = self.fail() {
            return Err(err);
        }
        match &self.behavior {
            Behavior::LegacyResults { record } => Ok(record.clone()),
            _ => Ok(json!({"task_id": task_id, "status": "success"})),
        }
    }
}
