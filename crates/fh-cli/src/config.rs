//! Credential resolution and client construction

use crate::error::{CliError, CliResult};
use crate::API_KEY_ENV;
use fh_rest_client::{AuthMethod, RestClient};

/// Resolve the API key from an explicit value or the environment. Runs
/// before any client exists; a missing key never reaches the network.
pub fn resolve_api_key(cli_value: Option<String>) -> CliResult<String> {
    if let Some(key) = cli_value {
        return Ok(key);
    }
    match std::env::var(API_KEY_ENV) {
        Ok(key) if !key.is_empty() => Ok(key),
        _ => Err(CliError::usage(format!(
            "API key not provided. Use --api-key option or set {} environment variable",
            API_KEY_ENV
        ))),
    }
}

/// Construct the REST client for one invocation. Failures here mean this
/// system cannot run the CLI at all, not that the user erred.
pub fn build_client(base_url: &str, api_key: String) -> CliResult<RestClient> {
    RestClient::from_url(base_url, AuthMethod::bearer(api_key))
        .map_err(|e| CliError::config(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_api_key_precedence() {
        // Parallel tests share the process environment, so every env case
        // lives in this one test.
        std::env::remove_var(API_KEY_ENV);
        let err = resolve_api_key(None).unwrap_err();
        assert!(err.render().contains("--api-key"));
        assert!(err.render().contains(API_KEY_ENV));

        std::env::set_var(API_KEY_ENV, "env-key");
        assert_eq!(resolve_api_key(None).unwrap(), "env-key");
        assert_eq!(
            resolve_api_key(Some("flag-key".to_string())).unwrap(),
            "flag-key"
        );

        std::env::remove_var(API_KEY_ENV);
    }

    #[test]
    fn test_build_client_rejects_bad_endpoint() {
        let result = build_client("not a url", "key".to_string());
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn test_build_client_accepts_http_endpoint() {
        assert!(build_client("http://localhost:8080", "key".to_string()).is_ok());
    }
}
