//! Helpers around PagerDuty's two authentication schemes.
//!
//! <https://developer.pagerduty.com/docs/authentication>

/// Credentials for the PagerDuty REST API.
// The derived trait implementations let a [super::Client] be cloned cheaply
// and compared in tests.
#[derive(PartialEq, Eq, Hash, Clone)]
pub enum Credentials {
    /// A REST API key, either account- or user-scoped.
    APIToken(String),
    /// An OAuth access token obtained on behalf of a user.
    OAuthToken(String),
}

/// Never print the secret itself.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credentials::APIToken(_) => write!(f, "APIToken(..)"),
            Credentials::OAuthToken(_) => write!(f, "OAuthToken(..)"),
        }
    }
}

/// Convert credentials to an `Authorization` header value.
///
/// ```
/// use pagerduty_slack::client::auth::*;
///
/// let token = Credentials::APIToken("u+foo".into());
/// assert_eq!(to_auth_header_val(&token), "Token token=u+foo");
/// ```
pub fn to_auth_header_val(c: &Credentials) -> String {
    match c {
        Credentials::APIToken(t) => format!("Token token={}", t),
        Credentials::OAuthToken(t) => format!("Bearer {}", t),
    }
}
