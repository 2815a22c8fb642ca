use std::time::Duration;

use crate::{error::Error, result::Result};

/// Base URL every relative path is joined onto.
pub const BASE_URL: &str = "https://www.reddit.com";

/// Endpoint used to trade credentials for a modhash and session cookie.
pub const LOGIN_URL: &str = "https://ssl.reddit.com/api/login.json";

/// Minimum spacing between two requests made by the same client.
pub const API_PERIOD: Duration = Duration::from_secs(2);

/// User agent sent when the caller opts out of the upstream API rules.
pub const DEFAULT_USER_AGENT: &str = concat!("snoo/", env!("CARGO_PKG_VERSION"));

/// Initialization parameters for a [`Client`].
///
/// Respecting the upstream rules (the default) requires a user agent and
/// spaces requests [`API_PERIOD`] apart.
///
/// [`Client`]: crate::Client
#[derive(Debug, Clone)]
pub struct Config {
    pub(crate) user_agent: Option<String>,
    pub(crate) respect: bool,
    pub(crate) base_url: String,
    pub(crate) login_url: String,
    pub(crate) period: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            user_agent: None,
            respect: true,
            base_url: BASE_URL.to_string(),
            login_url: LOGIN_URL.to_string(),
            period: API_PERIOD,
        }
    }
}

impl Config {
    /// A respectful configuration identifying itself as `user_agent`.
    pub fn new(user_agent: impl Into<String>) -> Self {
        Config::default().with_user_agent(user_agent)
    }

    /// Sets the identification string sent with every request.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Turns request spacing (and the user agent requirement) on or off.
    #[must_use]
    pub fn with_respect(mut self, respect: bool) -> Self {
        self.respect = respect;
        self
    }

    /// Points the client at another deployment of the API.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Overrides the login endpoint.
    #[must_use]
    pub fn with_login_url(mut self, login_url: impl Into<String>) -> Self {
        self.login_url = login_url.into();
        self
    }

    /// Overrides the spacing enforced between requests.
    #[must_use]
    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }

    /// Base URL relative paths are joined onto.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether request spacing is enforced.
    pub fn respect(&self) -> bool {
        self.respect
    }

    /// The user agent that will actually be sent.
    pub fn user_agent(&self) -> &str {
        self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.respect && self.user_agent.is_none() {
            return Err(Error::Config(
                "must specify a user agent to respect the API rules".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn respect_requires_user_agent() {
        assert!(Config::default().validate().is_err());
        assert!(Config::new("tests/0.1").validate().is_ok());
        assert!(Config::default().with_respect(false).validate().is_ok());
    }

    #[test]
    fn falls_back_to_default_user_agent() {
        let config = Config::default().with_respect(false);
        assert_eq!(config.user_agent(), DEFAULT_USER_AGENT);
        assert_eq!(Config::new("bot/1.0").user_agent(), "bot/1.0");
    }

    #[test]
    fn trims_trailing_slash_from_base_url() {
        let config = Config::new("ua").with_base_url("http://localhost:8080/");
        assert_eq!(config.base_url(), "http://localhost:8080");
    }
}
