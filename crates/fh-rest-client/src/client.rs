//! Main REST API client implementation

use fh_rest_api_contract::*;
use reqwest::{Client as HttpClient, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

use crate::auth::AuthMethod;
use crate::error::{RestClientError, RestClientResult};

/// Default public endpoint of the FutureHouse platform
pub const DEFAULT_BASE_URL: &str = "https://api.platform.futurehouse.org";

/// Interval between task status polls
const POLL_INTERVAL: Duration = Duration::from_secs(5);

/// REST API client for the FutureHouse task-execution service
#[derive(Debug, Clone)]
pub struct RestClient {
    http_client: HttpClient,
    base_url: Url,
    auth: AuthMethod,
}

impl RestClient {
    /// Create a new REST client. Fails when the underlying HTTP client
    /// cannot be initialized on this system.
    pub fn new(base_url: Url, auth: AuthMethod) -> RestClientResult<Self> {
        let http_client = HttpClient::builder().user_agent("fh-cli/0.1").build()?;

        Ok(Self {
            http_client,
            base_url,
            auth,
        })
    }

    /// Create a client from a base URL string
    pub fn from_url(base_url: &str, auth: AuthMethod) -> RestClientResult<Self> {
        let base_url = Url::parse(base_url)?;
        Self::new(base_url, auth)
    }

    /// Get the base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Submit a task for execution without waiting for it
    pub async fn create_task(&self, request: &TaskRequest) -> RestClientResult<CreateTaskResponse> {
        self.post("/api/v1/tasks", request).await
    }

    /// Get the status snapshot for a task
    pub async fn get_task_status(&self, task_id: &str) -> RestClientResult<TaskStatus> {
        let url = format!("/api/v1/tasks/{}/status", task_id);
        self.get(&url).await
    }

    /// Get the final result document for a task
    pub async fn get_task_result(
        &self,
        task_id: &str,
        verbose: bool,
    ) -> RestClientResult<TaskResult> {
        let mut url = format!("/api/v1/tasks/{}/result", task_id);
        if verbose {
            url.push_str("?verbose=true");
        }

        let response = self.send(Method::GET, &url, None::<&()>).await?;
        // Older service builds answer 405/501 on the result route.
        if response.status() == StatusCode::METHOD_NOT_ALLOWED
            || response.status() == StatusCode::NOT_IMPLEMENTED
        {
            return Err(RestClientError::Unsupported("get_task_result"));
        }
        self.handle_response(response).await
    }

    /// Get the whole task record through the legacy route
    pub async fn get_task(&self, task_id: &str) -> RestClientResult<TaskResult> {
        let url = format!("/api/v1/tasks/{}", task_id);
        self.get(&url).await
    }

    /// Submit tasks and poll each to completion, one after another.
    /// Results keep request order.
    pub async fn run_tasks_until_done(
        &self,
        requests: &[TaskRequest],
        verbose: bool,
    ) -> RestClientResult<Vec<TaskResult>> {
        let mut results = Vec::with_capacity(requests.len());
        for request in requests {
            results.push(self.run_task_to_completion(request, verbose).await?);
        }
        Ok(results)
    }

    /// Submit tasks and poll them to completion concurrently. Results keep
    /// request order.
    pub async fn arun_tasks_until_done(
        &self,
        requests: &[TaskRequest],
        verbose: bool,
    ) -> RestClientResult<Vec<TaskResult>> {
        let runs = requests
            .iter()
            .map(|request| self.run_task_to_completion(request, verbose));
        futures::future::try_join_all(runs).await
    }

    async fn run_task_to_completion(
        &self,
        request: &TaskRequest,
        verbose: bool,
    ) -> RestClientResult<TaskResult> {
        let created = self.create_task(request).await?;
        tracing::debug!(task_id = %created.task_id, name = %request.name, "task submitted");
        self.wait_until_done(&created.task_id).await?;
        self.get_task_result(&created.task_id, verbose).await
    }

    async fn wait_until_done(&self, task_id: &str) -> RestClientResult<()> {
        loop {
            let status = self.get_task_status(task_id).await?;
            if status.is_terminal() {
                tracing::debug!(task_id, status = %status.status, "task finished");
                return Ok(());
            }
            tracing::debug!(task_id, status = %status.status, "task still running");
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    // Private helper methods

    async fn get<T: DeserializeOwned>(&self, path: &str) -> RestClientResult<T> {
        self.request(Method::GET, path, None::<&()>).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> RestClientResult<T> {
        self.request(Method::POST, path, Some(body)).await
    }

    async fn request<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> RestClientResult<T> {
        let response = self.send(method, path, body).await?;
        self.handle_response(response).await
    }

    async fn send<B: serde::Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> RestClientResult<Response> {
        let url = self.base_url.join(path)?;
        let mut request = self.http_client.request(method, url);

        // Add authentication headers
        let auth_headers = self.auth.headers().map_err(|e| RestClientError::Auth(e.to_string()))?;
        request = request.headers(auth_headers);

        // Add body if provided
        if let Some(body) = body {
            request = request.json(body);
        }

        Ok(request.send().await?)
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: Response,
    ) -> RestClientResult<T> {
        let status = response.status();

        if status.is_success() {
            let text = response.text().await?;
            serde_json::from_str(&text).map_err(RestClientError::from)
        } else {
            let text = response.text().await?;
            match serde_json::from_str::<ProblemDetails>(&text) {
                Ok(problem) => Err(RestClientError::ServerError {
                    status,
                    details: problem,
                }),
                Err(_) => Err(RestClientError::UnexpectedResponse { status, body: text }),
            }
        }
    }
}
