//! Process-wide ClickUp settings shared by every operation.

use crate::error::{ServiceError, ServiceResult};

pub const DEFAULT_BASE_URL: &str = "https://api.clickup.com/api/v2";

#[derive(Clone, Debug)]
pub struct ClickUpConfig {
    base_url: String,
    api_token: Option<String>,
}

impl ClickUpConfig {
    pub fn new(base_url: impl Into<String>, api_token: Option<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token: api_token.filter(|t| !t.trim().is_empty()),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_token(&self) -> bool {
        self.api_token.is_some()
    }

    /// Looked up on every request so a missing credential fails the call
    /// instead of going out unauthenticated.
    pub fn token(&self) -> ServiceResult<&str> {
        self.api_token.as_deref().ok_or(ServiceError::MissingToken)
    }
}

impl Default for ClickUpConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_token_counts_as_missing() {
        let config = ClickUpConfig::new(DEFAULT_BASE_URL, Some("   ".to_string()));
        assert!(!config.has_token());
        assert!(matches!(config.token(), Err(ServiceError::MissingToken)));
    }

    #[test]
    fn trailing_slash_is_trimmed_from_base_url() {
        let config = ClickUpConfig::new("http://localhost:9000/api/v2/", Some("pk_1".into()));
        assert_eq!(config.base_url(), "http://localhost:9000/api/v2");
        assert_eq!(config.token().unwrap(), "pk_1");
    }
}
