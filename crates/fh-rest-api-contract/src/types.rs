//! API contract types for the FutureHouse task-execution REST service

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;
use validator::Validate;

/// Agent job selector. Known agents resolve case-insensitively from their
/// short code or their full service identifier; anything else is carried
/// verbatim and left for the service to accept or reject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobName {
    Crow,
    Falcon,
    Owl,
    Phoenix,
    Dummy,
    Other(String),
}

impl JobName {
    /// Service-side job identifier sent on the wire.
    pub fn as_str(&self) -> &str {
        match self {
            JobName::Crow => "job-futurehouse-paperqa2",
            JobName::Falcon => "job-futurehouse-paperqa2-deep",
            JobName::Owl => "job-futurehouse-hasanyone",
            JobName::Phoenix => "job-futurehouse-phoenix",
            JobName::Dummy => "job-futurehouse-dummy-env",
            JobName::Other(name) => name,
        }
    }

    fn resolve(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "crow" | "job-futurehouse-paperqa2" => JobName::Crow,
            "falcon" | "job-futurehouse-paperqa2-deep" => JobName::Falcon,
            "owl" | "job-futurehouse-hasanyone" => JobName::Owl,
            "phoenix" | "job-futurehouse-phoenix" => JobName::Phoenix,
            "dummy" | "job-futurehouse-dummy-env" => JobName::Dummy,
            _ => JobName::Other(name.to_string()),
        }
    }
}

impl std::str::FromStr for JobName {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(JobName::resolve(s))
    }
}

impl std::fmt::Display for JobName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for JobName {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for JobName {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(JobName::resolve(&name))
    }
}

/// Execution options attached to a task request. Recognized keys are typed;
/// everything else rides in `extra` untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub continued_task_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_steps: Option<u32>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RuntimeConfig {
    /// True when no option is set. An empty config is never serialized;
    /// the request omits the field instead.
    pub fn is_empty(&self) -> bool {
        self.continued_task_id.is_none()
            && self.timeout.is_none()
            && self.max_steps.is_none()
            && self.extra.is_empty()
    }
}

/// A task submission bound for the execution service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct TaskRequest {
    pub name: JobName,
    #[validate(length(min = 1, message = "Query cannot be empty"))]
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime_config: Option<RuntimeConfig>,
}

/// Response from task creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTaskResponse {
    pub task_id: String,
}

/// Status snapshot for a task. Only `status` is interpreted; every other
/// field the service returns is carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskStatus {
    pub status: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TaskStatus {
    /// True once the task has left the queue and stopped executing.
    pub fn is_terminal(&self) -> bool {
        let status = self.status.to_ascii_lowercase();
        status != "queued" && status != "in progress"
    }
}

/// Final task output. The service owns the shape; clients treat it as an
/// opaque JSON document.
pub type TaskResult = Value;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_job_name_resolves_short_codes_case_insensitively() {
        assert_eq!("CROW".parse::<JobName>(), Ok(JobName::Crow));
        assert_eq!("crow".parse::<JobName>(), Ok(JobName::Crow));
        assert_eq!("Owl".parse::<JobName>(), Ok(JobName::Owl));
        assert_eq!("FALCON".parse::<JobName>(), Ok(JobName::Falcon));
        assert_eq!("phoenix".parse::<JobName>(), Ok(JobName::Phoenix));
        assert_eq!("DUMMY".parse::<JobName>(), Ok(JobName::Dummy));
    }

    #[test]
    fn test_job_name_accepts_wire_identifier() {
        assert_eq!(
            "job-futurehouse-paperqa2".parse::<JobName>(),
            Ok(JobName::Crow)
        );
    }

    #[test]
    fn test_job_name_passes_unknown_names_through() {
        let name: JobName = "job-custom-agent".parse().unwrap();
        assert_eq!(name, JobName::Other("job-custom-agent".to_string()));
        assert_eq!(name.as_str(), "job-custom-agent");
    }

    #[test]
    fn test_job_name_serializes_as_wire_identifier() {
        let value = serde_json::to_value(JobName::Crow).unwrap();
        assert_eq!(value, json!("job-futurehouse-paperqa2"));
    }

    #[test]
    fn test_task_request_omits_absent_optional_fields() {
        let request = TaskRequest {
            name: JobName::Crow,
            query: "What is PFAS?".to_string(),
            id: None,
            runtime_config: None,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({"name": "job-futurehouse-paperqa2", "query": "What is PFAS?"})
        );
    }

    #[test]
    fn test_runtime_config_flattens_extra_entries() {
        let config: RuntimeConfig =
            serde_json::from_value(json!({"timeout": 600, "agent": {"model": "gpt"}})).unwrap();
        assert_eq!(config.timeout, Some(600));
        assert_eq!(config.extra["agent"], json!({"model": "gpt"}));
        let back = serde_json::to_value(&config).unwrap();
        assert_eq!(back, json!({"timeout": 600, "agent": {"model": "gpt"}}));
    }

    #[test]
    fn test_runtime_config_is_empty() {
        assert!(RuntimeConfig::default().is_empty());
        let config = RuntimeConfig {
            max_steps: Some(10),
            ..Default::default()
        };
        assert!(!config.is_empty());
    }

    #[test]
    fn test_task_status_preserves_unknown_fields() {
        let status: TaskStatus = serde_json::from_value(json!({
            "status": "in progress",
            "task_id": "abc-123",
            "metadata": {"steps": 3}
        }))
        .unwrap();
        assert_eq!(status.status, "in progress");
        assert_eq!(status.extra["metadata"], json!({"steps": 3}));
    }

    #[test]
    fn test_task_status_terminal_detection() {
        let running = |s: &str| TaskStatus {
            status: s.to_string(),
            extra: Map::new(),
        };
        assert!(!running("queued").is_terminal());
        assert!(!running("Queued").is_terminal());
        assert!(!running("in progress").is_terminal());
        assert!(running("success").is_terminal());
        assert!(running("failed").is_terminal());
        assert!(running("cancelled").is_terminal());
    }
}
