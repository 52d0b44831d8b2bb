//! Authentication methods for the REST API client

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

/// Authentication methods supported by the API
#[derive(Debug, Clone)]
pub enum AuthMethod {
    /// Bearer token (`Authorization: Bearer <token>`)
    Bearer(String),
    /// No authentication
    None,
}

impl Default for AuthMethod {
    fn default() -> Self {
        Self::None
    }
}

impl AuthMethod {
    /// Apply authentication headers to a request
    pub fn apply_to_headers(
        &self,
        headers: &mut HeaderMap,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        match self {
            AuthMethod::Bearer(token) => {
                let value = format!("Bearer {}", token);
                headers.insert(
                    HeaderName::from_static("authorization"),
                    HeaderValue::from_str(&value)?,
                );
            }
            AuthMethod::None => {
                // No headers to add
            }
        }
        Ok(())
    }

    /// Get headers carrying this authentication method
    pub fn headers(&self) -> Result<HeaderMap, Box<dyn std::error::Error + Send + Sync>> {
        let mut headers = HeaderMap::new();
        self.apply_to_headers(&mut headers)?;
        Ok(headers)
    }

    /// Create bearer token authentication from a token string
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer(token.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_auth_headers() {
        let auth = AuthMethod::bearer("platform-key");
        let mut headers = HeaderMap::new();
        auth.apply_to_headers(&mut headers).unwrap();

        assert_eq!(headers.get("authorization").unwrap(), "Bearer platform-key");
    }

    #[test]
    fn test_no_auth_adds_no_headers() {
        let headers = AuthMethod::None.headers().unwrap();
        assert!(headers.is_empty());
    }
}
