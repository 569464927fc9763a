//! Bearer token supply for API calls.

use cookmate_core::api::TokenProvider;
use std::sync::RwLock;

/// Serves the token found in configuration or the environment.
///
/// A 401 from the backend drops the token so later calls go out
/// unauthenticated instead of repeating a rejected credential.
#[derive(Debug, Default)]
pub struct StaticTokenProvider {
    token: RwLock<Option<String>>,
}

impl StaticTokenProvider {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: RwLock::new(token),
        }
    }
}

impl TokenProvider for StaticTokenProvider {
    fn bearer_token(&self) -> Option<String> {
        self.token.read().ok().and_then(|token| token.clone())
    }

    fn on_unauthorized(&self) {
        tracing::warn!("Backend rejected the API token; clearing it");
        if let Ok(mut token) = self.token.write() {
            *token = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_clears_token() {
        let provider = StaticTokenProvider::new(Some("abc".to_string()));
        assert_eq!(provider.bearer_token().as_deref(), Some("abc"));

        provider.on_unauthorized();
        assert!(provider.bearer_token().is_none());
    }
}
