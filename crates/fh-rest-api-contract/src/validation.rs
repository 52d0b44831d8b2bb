//! Validation helpers for API contract types

use crate::error::ApiContractError;
use crate::types::*;
use validator::Validate;

/// Validate a task request before it is sent anywhere.
pub fn validate_task_request(request: &TaskRequest) -> Result<(), ApiContractError> {
    request.validate()?;
    Ok(())
}

/// Parse a runtime config from user-supplied JSON. The input must be a JSON
/// object; recognized keys become typed fields, the rest pass through.
pub fn parse_runtime_config(json: &str) -> Result<RuntimeConfig, ApiContractError> {
    let config: RuntimeConfig = serde_json::from_str(json)?;
    Ok(config)
}

/// Parse a batch file into task requests and validate each one. The file
/// must hold a JSON array of request objects; order is preserved.
pub fn parse_task_batch(json: &str) -> Result<Vec<TaskRequest>, ApiContractError> {
    let requests: Vec<TaskRequest> = serde_json::from_str(json)?;
    for request in &requests {
        request.validate()?;
    }
    Ok(requests)
}
