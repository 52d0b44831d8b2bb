//! Error taxonomy and terminal rendering
//!
//! Three classes, split by where the failure arose: bad input (before any
//! network traffic), a broken environment (client construction), and
//! failures during dispatch. Rendering puts the HTTP status code in front
//! of the message only for codes the service is known to use.

use fh_client_api::TaskServiceError;
use fh_rest_api_contract::ApiContractError;
use thiserror::Error;

/// Status codes rendered with an explicit `Error <code>:` prefix.
const KNOWN_STATUS_CODES: [u16; 6] = [400, 401, 403, 429, 500, 503];

/// Errors surfaced to the terminal.
#[derive(Debug, Error)]
pub enum CliError {
    /// Bad invocation or input; raised before any request is sent.
    #[error("{0}")]
    Usage(String),

    /// The client could not be constructed on this system.
    #[error("{0}")]
    Config(String),

    /// The service or transport failed during dispatch.
    #[error(transparent)]
    Service(#[from] TaskServiceError),
}

impl CliError {
    /// Create a usage error.
    pub fn usage(message: impl Into<String>) -> Self {
        CliError::Usage(message.into())
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        CliError::Config(message.into())
    }

    /// One-line rendering for stderr. Service errors carrying a recognized
    /// HTTP status include the code; everything else is message-only.
    pub fn render(&self) -> String {
        match self {
            CliError::Usage(message) => format!("Error: {}", message),
            CliError::Config(message) => format!("Configuration error: {}", message),
            CliError::Service(err) => match err.status_code() {
                Some(code) if KNOWN_STATUS_CODES.contains(&code) => {
                    format!("Error {}: {}", code, err)
                }
                _ => format!("Error: {}", err),
            },
        }
    }
}

impl From<ApiContractError> for CliError {
    fn from(err: ApiContractError) -> Self {
        CliError::Usage(err.to_string())
    }
}

pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    // ---- Service error rendering ----

    #[test]
    fn test_render_known_status_codes_with_prefix() {
        for code in [400, 401, 403, 429, 500, 503] {
            let err = CliError::from(TaskServiceError::api(code, "boom"));
            assert_eq!(err.render(), format!("Error {}: boom", code));
        }
    }

    #[test]
    fn test_render_unknown_status_code_without_prefix() {
        let err = CliError::from(TaskServiceError::api(404, "Task not found"));
        assert_eq!(err.render(), "Error: Task not found");
    }

    #[test]
    fn test_render_transport_status_is_probed() {
        let err = CliError::from(TaskServiceError::transport(Some(503), "unavailable"));
        assert_eq!(err.render(), "Error 503: unavailable");
    }

    #[test]
    fn test_render_transport_without_status() {
        let err = CliError::from(TaskServiceError::transport(None, "connection refused"));
        assert_eq!(err.render(), "Error: connection refused");
    }

    #[test]
    fn test_render_unsupported_operation() {
        let err = CliError::from(TaskServiceError::unsupported("get_task_result"));
        assert_eq!(
            err.render(),
            "Error: operation `get_task_result` is not supported by this service"
        );
    }

    // ---- Local error rendering ----

    #[test]
    fn test_render_usage_error() {
        let err = CliError::usage("API key not provided");
        assert_eq!(err.render(), "Error: API key not provided");
    }

    #[test]
    fn test_render_config_error_is_distinct() {
        let err = CliError::config("TLS backend unavailable");
        assert_eq!(err.render(), "Configuration error: TLS backend unavailable");
    }
}
