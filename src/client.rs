//! A thin client for PagerDuty's REST API, shared by every resource.
//!
//! The client only builds requests, attaches authentication, and decodes
//! responses. It never retries.

use self::auth::{to_auth_header_val, Credentials};
use self::error::{APIError, Error};
use reqwest::{header, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

pub mod auth;
pub mod error;
pub mod list;

/// The base URL of the PagerDuty REST API.
pub const API_BASE: &str = "https://api.pagerduty.com";

/// PagerDuty versions its API through the `Accept` header.
const ACCEPT: &str = "application/vnd.pagerduty+json;version=2";

const USER_AGENT: &str = concat!("pagerduty-slack/", env!("CARGO_PKG_VERSION"));

/// A reusable client that holds a connection pool internally, as per
/// [reqwest::Client]. Cloning is cheap and shares the pool.
#[derive(Clone, Debug)]
pub struct Client {
    http: reqwest::Client,
    base: Url,
    credentials: Credentials,
}

impl Client {
    /// Create a client against `base_url`, for example [API_BASE] or a mock
    /// server in tests.
    pub fn new(base_url: &str, credentials: Credentials) -> Result<Self, Error> {
        Self::with_http_client(reqwest::Client::new(), base_url, credentials)
    }

    /// As [Client::new], reusing a preconfigured [reqwest::Client], for
    /// example one with timeouts.
    pub fn with_http_client(
        http: reqwest::Client,
        base_url: &str,
        credentials: Credentials,
    ) -> Result<Self, Error> {
        let base =
            Url::parse(base_url).map_err(|_| Error::InvalidBaseUrl(base_url.to_owned()))?;

        if base.cannot_be_a_base() {
            return Err(Error::InvalidBaseUrl(base_url.to_owned()));
        }

        Ok(Client {
            http,
            base,
            credentials,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Append `segments` to the base URL, percent-encoding each one. Any path
    /// on the base URL is preserved.
    ///
    /// Segments which URL parsing would drop or collapse, such as `..`, are
    /// rejected so that every segment lands in its own place in the path.
    pub fn endpoint<I>(&self, segments: I) -> Result<Url, Error>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let segments: Vec<I::Item> = segments.into_iter().collect();
        if let Some(s) = segments.iter().find(|s| !is_valid_segment(s.as_ref())) {
            return Err(Error::InvalidId(s.as_ref().to_owned()));
        }

        let mut url = self.base.clone();

        url.path_segments_mut()
            .map_err(|_| Error::InvalidBaseUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    /// Create a request to any PagerDuty API endpoint, handling
    /// authentication and versioning.
    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        debug!("{} {}", method, url);

        self.http
            .request(method, url)
            .header(header::ACCEPT, ACCEPT)
            .header(header::USER_AGENT, USER_AGENT)
            .header(header::AUTHORIZATION, to_auth_header_val(&self.credentials))
    }

    pub fn get(&self, url: Url) -> RequestBuilder {
        self.request(Method::GET, url)
    }

    pub fn post(&self, url: Url) -> RequestBuilder {
        self.request(Method::POST, url)
    }

    pub fn put(&self, url: Url) -> RequestBuilder {
        self.request(Method::PUT, url)
    }

    pub fn delete(&self, url: Url) -> RequestBuilder {
        self.request(Method::DELETE, url)
    }

    /// Send a request, turning any non-2xx status into an [APIError].
    pub async fn send(&self, req: RequestBuilder) -> Result<Response, Error> {
        let res = req.send().await?;
        let status = res.status();

        if status.is_success() {
            return Ok(res);
        }

        let body = res.text().await?;
        let e = APIError::from_body(status.as_u16(), &body);
        warn!("{}", e);

        Err(Error::API(e))
    }

    /// Send a request and decode a successful response body as JSON.
    pub async fn send_json<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, Error> {
        let body = self.send(req).await?.text().await?;

        serde_json::from_str(&body).map_err(|e| Error::Decode(e, body))
    }
}

/// Empty and dot segments are dropped by URL parsing, and tabs and newlines
/// are stripped from within a segment.
fn is_valid_segment(s: &str) -> bool {
    !matches!(s, "" | "." | "..") && !s.contains(|c| matches!(c, '\t' | '\n' | '\r'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> Client {
        Client::new(base, Credentials::APIToken("foo".into())).unwrap()
    }

    #[test]
    fn test_invalid_base_url() {
        let creds = Credentials::APIToken("foo".into());

        assert!(matches!(
            Client::new("not a url", creds.clone()),
            Err(Error::InvalidBaseUrl(_))
        ));
        assert!(matches!(
            Client::new("mailto:ops@example.com", creds),
            Err(Error::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn test_endpoint() {
        let url = client(API_BASE).endpoint(["a", "b"]).unwrap();
        assert_eq!(url.as_str(), "https://api.pagerduty.com/a/b");

        let url = client("http://localhost:1234/prefix/")
            .endpoint(["a", "b"])
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:1234/prefix/a/b");
    }

    #[test]
    fn test_endpoint_escapes_segments() {
        let url = client(API_BASE).endpoint(["a/b", "c?d"]).unwrap();
        assert_eq!(url.as_str(), "https://api.pagerduty.com/a%2Fb/c%3Fd");
    }

    #[tokio::test]
    async fn test_headers() {
        let mut srv = mockito::Server::new_async().await;

        let mock = srv
            .mock("GET", "/ping")
            .match_header("accept", ACCEPT)
            .match_header("authorization", "Bearer xyz")
            .match_header("user-agent", USER_AGENT)
            .with_body("{}")
            .create_async()
            .await;

        let c = Client::new(&srv.url(), Credentials::OAuthToken("xyz".into())).unwrap();
        let url = c.endpoint(["ping"]).unwrap();
        let res: serde_json::Value = c.send_json(c.get(url)).await.unwrap();

        mock.assert_async().await;
        assert_eq!(res, serde_json::json!({}));
    }

    #[tokio::test]
    async fn test_api_error() {
        let mut srv = mockito::Server::new_async().await;

        let mock = srv
            .mock("GET", "/missing")
            .with_status(404)
            .with_body(r#"{"error": {"code": 2100, "message": "Not Found"}}"#)
            .create_async()
            .await;

        let c = client(&srv.url());
        let url = c.endpoint(["missing"]).unwrap();
        let res = c.send(c.get(url)).await;

        mock.assert_async().await;
        match res {
            Err(Error::API(e)) => {
                assert!(e.is_not_found());
                assert_eq!(e.error.map(|x| x.message), Some("Not Found".into()));
            }
            _ => panic!("expected an API error"),
        }
    }

    #[tokio::test]
    async fn test_decode_error() {
        let mut srv = mockito::Server::new_async().await;

        let mock = srv
            .mock("GET", "/garbled")
            .with_body("{not json")
            .create_async()
            .await;

        let c = client(&srv.url());
        let url = c.endpoint(["garbled"]).unwrap();
        let res = c.send_json::<serde_json::Value>(c.get(url)).await;

        mock.assert_async().await;
        match res {
            Err(Error::Decode(_, body)) => assert_eq!(body, "{not json"),
            _ => panic!("expected a decode error"),
        }
    }

    #[tokio::test]
    async fn test_request_error() {
        // Nothing listens on port 1 of the loopback interface.
        let c = client("http://127.0.0.1:1");
        let url = c.endpoint(["anything"]).unwrap();

        assert!(matches!(
            c.send(c.get(url)).await,
            Err(Error::Request(_))
        ));
    }

    #[test]
    fn test_endpoint_rejects_dot_and_empty_segments() {
        let c = client(API_BASE);

        for bad in ["", ".", "..", "\t..", "a\nb"] {
            match c.endpoint(["a", bad]) {
                Err(Error::InvalidId(x)) => assert_eq!(x, bad),
                _ => panic!("expected `{:?}` to be rejected", bad),
            }
        }

        // Dots are only special as a whole segment.
        let url = c.endpoint(["...", ".a", "%2e%2e"]).unwrap();
        assert_eq!(url.as_str(), "https://api.pagerduty.com/.../.a/%252e%252e");
    }

    quickcheck! {
        fn test_endpoint_keeps_every_segment(a: String, b: String) -> bool {
            match client(API_BASE).endpoint([&a, &b]) {
                Ok(url) => {
                    is_valid_segment(&a)
                        && is_valid_segment(&b)
                        && url.path_segments().map(|xs| xs.count()) == Some(2)
                }
                Err(Error::InvalidId(_)) => !is_valid_segment(&a) || !is_valid_segment(&b),
                Err(_) => false,
            }
        }
    }
}
