use serde::Deserialize;
use serde_with::{serde_as, DefaultOnNull};
use std::fmt;

/// Sum type representing every possible unexceptional fail state of a call
/// to the PagerDuty API.
#[derive(Debug)]
pub enum Error {
    /// The request never produced a response, or its body couldn't be read.
    Request(reqwest::Error),
    /// PagerDuty answered with a non-2xx status.
    API(APIError),
    /// A successful response whose body isn't the JSON we expected. The raw
    /// body is kept for diagnosis.
    Decode(serde_json::Error, String),
    /// The configured base URL can't have path segments appended to it.
    InvalidBaseUrl(String),
    /// An identifier which can't stand as a path segment of its own, such as
    /// an empty string or `..`. No request is sent.
    InvalidId(String),
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Request(e)
    }
}

impl From<APIError> for Error {
    fn from(e: APIError) -> Self {
        Error::API(e)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let x = match self {
            Error::Request(e) => format!("PagerDuty API request failed: {}", e),
            Error::API(e) => format!("PagerDuty API returned error: {}", e),
            Error::Decode(e, _) => format!("Failed to decode PagerDuty API response: {}", e),
            Error::InvalidBaseUrl(u) => format!("Invalid PagerDuty API base URL: {}", u),
            Error::InvalidId(x) => format!("Invalid identifier in request path: {:?}", x),
        };

        write!(f, "{}", x)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Request(e) => Some(e),
            Error::Decode(e, _) => Some(e),
            Error::API(_) | Error::InvalidBaseUrl(_) | Error::InvalidId(_) => None,
        }
    }
}

/// A non-2xx response. `error` is absent when the body wasn't PagerDuty's
/// usual error object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct APIError {
    pub status_code: u16,
    pub error: Option<APIErrorObject>,
}

/// <https://developer.pagerduty.com/docs/errors>
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct APIErrorObject {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub errors: Vec<String>,
}

/// The body of a non-2xx response.
///
/// ```json
/// {
///     "error": {
///         "code": 2100,
///         "message": "Not Found",
///         "errors": []
///     }
/// }
/// ```
#[derive(Deserialize)]
pub(super) struct ErrorResponse {
    pub error: APIErrorObject,
}

impl APIError {
    /// Build from a status and whatever body came with it.
    pub(super) fn from_body(status_code: u16, body: &str) -> Self {
        APIError {
            status_code,
            error: serde_json::from_str::<ErrorResponse>(body)
                .ok()
                .map(|x| x.error),
        }
    }

    /// Whether PagerDuty told us the resource doesn't exist.
    pub fn is_not_found(&self) -> bool {
        self.status_code == 404
    }
}

impl fmt::Display for APIError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.error {
            None => write!(
                f,
                "HTTP response failed with status code {} and no JSON error object was present",
                self.status_code
            ),
            Some(e) if e.errors.is_empty() => write!(
                f,
                "HTTP response failed with status code {}, message: {} (code: {})",
                self.status_code, e.message, e.code
            ),
            Some(e) => write!(
                f,
                "HTTP response failed with status code {}, message: {} (code: {}): {}",
                self.status_code,
                e.message,
                e.code,
                e.errors.join("; ")
            ),
        }
    }
}
