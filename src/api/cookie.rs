//! Session cookie formatting and parsing.

use axum::http::{HeaderMap, header};

use crate::config::SessionConfig;

/// Issues, clears and reads the HTTP-only cookie carrying the session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCookie {
    name: String,
    max_age_secs: i64,
    secure: bool,
}

impl SessionCookie {
    /// Creates a cookie policy.
    pub fn new(name: impl Into<String>, max_age_secs: i64, secure: bool) -> Self {
        Self {
            name: name.into(),
            max_age_secs,
            secure,
        }
    }

    /// Builds the policy from the session configuration.
    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(
            config.cookie_name.clone(),
            config.ttl().num_seconds(),
            config.secure_cookie,
        )
    }

    /// The cookie name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `Set-Cookie` value that stores `token`.
    pub fn issue(&self, token: &str) -> String {
        self.format(token, self.max_age_secs)
    }

    /// `Set-Cookie` value that removes the cookie.
    pub fn clear(&self) -> String {
        self.format("", 0)
    }

    fn format(&self, value: &str, max_age: i64) -> String {
        let mut cookie = format!(
            "{}={}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}",
            self.name, value, max_age
        );
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie
    }

    /// Finds the session token in the request's `Cookie` headers.
    pub fn token_from(&self, headers: &HeaderMap) -> Option<String> {
        headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, value)| *name == self.name && !value.is_empty())
            .map(|(_, value)| value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn cookie() -> SessionCookie {
        SessionCookie::new("session-id", 604_800, false)
    }

    #[test]
    fn test_issue_and_clear() {
        assert_eq!(
            cookie().issue("abc"),
            "session-id=abc; HttpOnly; SameSite=Lax; Path=/; Max-Age=604800"
        );
        assert_eq!(
            cookie().clear(),
            "session-id=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0"
        );
        assert!(
            SessionCookie::new("sid", 60, true)
                .issue("x")
                .ends_with("; Secure")
        );
    }

    #[test]
    fn test_from_config_uses_ttl_days() {
        let config = SessionConfig::default();
        let cookie = SessionCookie::from_config(&config);
        assert_eq!(cookie.name(), "session-id");
        assert!(cookie.issue("t").contains("Max-Age=604800"));

        let huge = SessionConfig {
            ttl_days: i64::MAX,
            ..SessionConfig::default()
        };
        assert!(
            SessionCookie::from_config(&huge)
                .issue("t")
                .contains("Max-Age=315360000")
        );
    }

    #[test]
    fn test_token_from_finds_named_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; session-id=tok123; other=1"),
        );
        assert_eq!(cookie().token_from(&headers), Some("tok123".to_string()));
    }

    #[test]
    fn test_token_from_ignores_missing_or_empty() {
        let mut headers = HeaderMap::new();
        assert_eq!(cookie().token_from(&headers), None);

        headers.insert(header::COOKIE, HeaderValue::from_static("session-id="));
        assert_eq!(cookie().token_from(&headers), None);

        headers.insert(header::COOKIE, HeaderValue::from_static("xsession-id=abc"));
        assert_eq!(cookie().token_from(&headers), None);
    }
}
