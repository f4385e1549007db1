//! Environment-driven configuration.
//!
//! - `PAGERDUTY_TOKEN`: a REST API key.
//! - `PAGERDUTY_OAUTH_TOKEN`: an OAuth access token, used if there's no
//!   `PAGERDUTY_TOKEN`.
//! - `PAGERDUTY_API_URL`: optional, defaults to [API_BASE].

use crate::client::{auth::Credentials, error::Error, Client, API_BASE};
use std::{env, fmt};
use url::Url;

pub struct Config {
    pub credentials: Credentials,
    pub api_url: String,
}

pub enum ConfigError {
    MissingToken,
    InvalidApiUrl(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let x = match self {
            ConfigError::MissingToken => {
                "No $PAGERDUTY_TOKEN or $PAGERDUTY_OAUTH_TOKEN environment variable found".into()
            }
            ConfigError::InvalidApiUrl(u) => format!("Could not parse $PAGERDUTY_API_URL: {}", u),
        };

        write!(f, "{}", x)
    }
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|k| env::var(k).ok())
    }

    /// Read configuration through an arbitrary lookup, so that tests needn't
    /// touch the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |k: &str| lookup(k).filter(|v| !v.is_empty());

        let credentials = non_empty("PAGERDUTY_TOKEN")
            .map(Credentials::APIToken)
            .or_else(|| non_empty("PAGERDUTY_OAUTH_TOKEN").map(Credentials::OAuthToken))
            .ok_or(ConfigError::MissingToken)?;

        let api_url = non_empty("PAGERDUTY_API_URL").unwrap_or_else(|| API_BASE.to_owned());
        if Url::parse(&api_url).is_err() {
            return Err(ConfigError::InvalidApiUrl(api_url));
        }

        Ok(Config {
            credentials,
            api_url,
        })
    }

    pub fn client(&self) -> Result<Client, Error> {
        Client::new(&self.api_url, self.credentials.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        move |k| map.get(k).cloned()
    }

    #[test]
    fn test_api_token() {
        let cfg = Config::from_lookup(lookup(&[("PAGERDUTY_TOKEN", "abc")])).ok().unwrap();

        assert_eq!(cfg.credentials, Credentials::APIToken("abc".into()));
        assert_eq!(cfg.api_url, API_BASE);
    }

    #[test]
    fn test_oauth_fallback() {
        let cfg = Config::from_lookup(lookup(&[
            ("PAGERDUTY_TOKEN", ""),
            ("PAGERDUTY_OAUTH_TOKEN", "xyz"),
            ("PAGERDUTY_API_URL", "http://localhost:8080"),
        ]))
        .ok()
        .unwrap();

        assert_eq!(cfg.credentials, Credentials::OAuthToken("xyz".into()));
        assert_eq!(cfg.api_url, "http://localhost:8080");
        assert!(cfg.client().is_ok());
    }

    #[test]
    fn test_missing_token() {
        assert!(matches!(
            Config::from_lookup(lookup(&[])),
            Err(ConfigError::MissingToken)
        ));
    }

    #[test]
    fn test_invalid_api_url() {
        let res = Config::from_lookup(lookup(&[
            ("PAGERDUTY_TOKEN", "abc"),
            ("PAGERDUTY_API_URL", "nope"),
        ]));

        match res {
            Err(e @ ConfigError::InvalidApiUrl(_)) => {
                assert_eq!(e.to_string(), "Could not parse $PAGERDUTY_API_URL: nope")
            }
            _ => panic!("expected an invalid URL"),
        }
    }
}
