//! REST API client for the FutureHouse task-execution service
//!
//! This crate provides the HTTP binding used by the CLI: authentication,
//! request/response handling, and status polling for the run-until-done
//! entry points. The [`TaskServiceApi`] impl is the surface the CLI
//! dispatches through.

pub mod auth;
pub mod client;
pub mod error;

pub use auth::*;
pub use client::*;
pub use error::*;

use async_trait::async_trait;
use fh_client_api::{TaskServiceApi, TaskServiceError, TaskServiceResult};
use fh_rest_api_contract::*;

fn to_service_error(err: RestClientError) -> TaskServiceError {
    match err {
        RestClientError::ServerError { status, details } => {
            TaskServiceError::api(status.as_u16(), details.message())
        }
        RestClientError::Http(err) => {
            let status = err.status().map(|s| s.as_u16());
            TaskServiceError::transport(status, err.to_string())
        }
        RestClientError::UnexpectedResponse { status, body } => {
            TaskServiceError::transport(Some(status.as_u16()), body)
        }
        RestClientError::Json(err) => TaskServiceError::Payload(err),
        RestClientError::Unsupported(operation) => TaskServiceError::unsupported(operation),
        other => TaskServiceError::transport(None, other.to_string()),
    }
}

#[async_trait]
impl TaskServiceApi for client::RestClient {
    async fn create_task(&self, request: &TaskRequest) -> TaskServiceResult<String> {
        let response = self.create_task(request).await.map_err(to_service_error)?;
        Ok(response.task_id)
    }

    async fn run_tasks_until_done(
        &self,
        requests: &[TaskRequest],
        verbose: bool,
    ) -> TaskServiceResult<Vec<TaskResult>> {
        self.run_tasks_until_done(requests, verbose)
            .await
            .map_err(to_service_error)
    }

    async fn arun_tasks_until_done(
        &self,
        requests: &[TaskRequest],
        verbose: bool,
    ) -> TaskServiceResult<Vec<TaskResult>> {
        self.arun_tasks_until_done(requests, verbose)
            .await
            .map_err(to_service_error)
    }

    async fn get_task_status(&self, task_id: &str) -> TaskServiceResult<TaskStatus> {
        self.get_task_status(task_id).await.map_err(to_service_error)
    }

    async fn get_task_result(
        &self,
        task_id: &str,
        verbose: bool,
    ) -> TaskServiceResult<TaskResult> {
        self.get_task_result(task_id, verbose)
            .await
            .map_err(to_service_error)
    }

    async fn get_task(&self, task_id: &str) -> TaskServiceResult<TaskResult> {
        self.get_task(task_id).await.map_err(to_service_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_error_maps_to_api_error() {
        let details = ProblemDetails {
            problem_type: "about:blank".to_string(),
            title: "Too Many Requests".to_string(),
            status: Some(429),
            detail: "Rate limit exceeded".to_string(),
            errors: Default::default(),
        };
        let err = to_service_error(RestClientError::ServerError {
            status: reqwest::StatusCode::TOO_MANY_REQUESTS,
            details,
        });

        assert_eq!(err.status_code(), Some(429));
        assert_eq!(err.to_string(), "Rate limit exceeded");
    }

    #[test]
    fn test_problem_without_detail_falls_back_to_title() {
        let details = ProblemDetails {
            problem_type: "about:blank".to_string(),
            title: "Unauthorized".to_string(),
            status: Some(401),
            detail: String::new(),
            errors: Default::default(),
        };
        let err = to_service_error(RestClientError::ServerError {
            status: reqwest::StatusCode::UNAUTHORIZED,
            details,
        });

        assert_eq!(err.to_string(), "Unauthorized");
    }

    #[test]
    fn test_unsupported_route_maps_to_unsupported_operation() {
        let err = to_service_error(RestClientError::Unsupported("get_task_result"));
        assert!(err.is_unsupported());
        assert_eq!(err.status_code(), None);
    }

    #[test]
    fn test_unparseable_error_body_keeps_response_status() {
        // Gateways answer 429/503 with plain-text bodies, not problem
        // documents; the status must still reach the error formatter.
        let err = to_service_error(RestClientError::UnexpectedResponse {
            status: reqwest::StatusCode::TOO_MANY_REQUESTS,
            body: "slow down".to_string(),
        });
        assert_eq!(err.status_code(), Some(429));
        assert_eq!(err.to_string(), "slow down");
    }
}
