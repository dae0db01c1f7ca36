//! Evolution API client.
//!
//! Low-level HTTP pipeline that handles authentication, request bodies,
//! status classification and response decoding. Endpoint-specific operations
//! live on the [`Instances`] and [`Messages`] service handles.

use std::env;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::multipart::Form;
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::attachment::Attachment;
use crate::error::{EvolutionError, Result};
use crate::services::{Instances, Messages};

/// Environment variable holding the API base URL.
pub const BASE_URL_ENV: &str = "EVOLUTION_BASE_URL";
/// Environment variable holding the global API key.
pub const API_TOKEN_ENV: &str = "EVOLUTION_API_TOKEN";

const API_KEY_HEADER: &str = "apikey";
const USER_AGENT: &str = concat!("evoapi/", env!("CARGO_PKG_VERSION"));
const EMPTY_BODY_DETAIL: &str = "(empty response body)";

/// Low-level Evolution API client.
///
/// Owns the base URL, the global API key and a pooled HTTP transport.
/// Entity-specific operations are reached through [`EvolutionClient::instances`]
/// and [`EvolutionClient::messages`].
///
/// This struct is cheaply cloneable; clones reference the same underlying
/// connection pool.
///
/// # Example
///
/// ```no_run
/// use evoapi::EvolutionClient;
///
/// # async fn example() -> evoapi::Result<()> {
/// // Create from environment variables
/// let client = EvolutionClient::from_env()?;
///
/// // Or configure manually
/// let client = EvolutionClient::new("https://evo.example.com", "global-api-key")?;
/// let instances = client.instances().fetch_all().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct EvolutionClient {
    http: Client,
    base_url: Arc<Url>,
    api_key: Arc<str>,
}

impl fmt::Debug for EvolutionClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvolutionClient")
            .field("base_url", &self.base_url())
            .finish_non_exhaustive()
    }
}

impl EvolutionClient {
    /// Create a client from environment variables.
    ///
    /// Reads `EVOLUTION_BASE_URL` and `EVOLUTION_API_TOKEN`.
    ///
    /// # Errors
    ///
    /// Returns [`EvolutionError::ConfigMissing`] if either variable is unset
    /// or blank.
    pub fn from_env() -> Result<Self> {
        let base_url = require_env(BASE_URL_ENV)?;
        let api_key = require_env(API_TOKEN_ENV)?;
        Self::new(&base_url, &api_key)
    }

    /// Create a new client with its own connection pool.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Root of the Evolution API (e.g., `https://evo.example.com`)
    /// * `api_key` - Global API key sent in the `apikey` header
    ///
    /// # Errors
    ///
    /// Returns an error if either argument is blank or the base URL is invalid.
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(EvolutionError::HttpError)?;

        Self::with_http_client(http, base_url, api_key)
    }

    /// Create a client on top of an existing HTTP transport.
    ///
    /// Use this to share one connection pool between several clients or to
    /// configure proxies and timeouts yourself.
    ///
    /// # Errors
    ///
    /// Returns an error if either argument is blank or the base URL is invalid.
    pub fn with_http_client(http: Client, base_url: &str, api_key: &str) -> Result<Self> {
        let base_url = base_url.trim();
        if base_url.is_empty() {
            return Err(EvolutionError::ConfigMissing(
                "base URL must not be empty".to_string(),
            ));
        }
        if api_key.trim().is_empty() {
            return Err(EvolutionError::ConfigMissing(
                "API key must not be empty".to_string(),
            ));
        }

        // Stored with a single trailing slash so endpoint joins append
        let base_url = Url::parse(&format!("{}/", base_url.trim_end_matches('/')))?;

        Ok(Self {
            http,
            base_url: Arc::new(base_url),
            api_key: Arc::from(api_key),
        })
    }

    /// Get the base URL, without trailing slash.
    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// Instance lifecycle operations.
    pub fn instances(&self) -> Instances<'_> {
        Instances::new(self)
    }

    /// Message dispatch operations.
    pub fn messages(&self) -> Messages<'_> {
        Messages::new(self)
    }

    /// Build the full URL for an endpoint path.
    pub fn endpoint_url(&self, endpoint: &str) -> Result<Url> {
        Ok(self.base_url.join(endpoint.trim_start_matches('/'))?)
    }

    /// Make a GET request.
    pub async fn get<T>(&self, endpoint: &str, token: Option<&str>) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        self.send::<(), T>(Method::GET, endpoint, None, token, Vec::new())
            .await
    }

    /// Make a POST request with an optional JSON body.
    pub async fn post<B, T>(&self, endpoint: &str, body: Option<&B>, token: Option<&str>) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned + Default,
    {
        self.send(Method::POST, endpoint, body, token, Vec::new())
            .await
    }

    /// Make a POST request with a multipart body.
    ///
    /// Each attachment becomes a file part; the body, if any, is flattened into
    /// text fields.
    pub async fn post_multipart<B, T>(
        &self,
        endpoint: &str,
        body: Option<&B>,
        token: Option<&str>,
        attachments: Vec<Attachment>,
    ) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned + Default,
    {
        self.send(Method::POST, endpoint, body, token, attachments)
            .await
    }

    /// Make a PUT request with an optional JSON body.
    pub async fn put<B, T>(&self, endpoint: &str, body: Option<&B>, token: Option<&str>) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned + Default,
    {
        self.send(Method::PUT, endpoint, body, token, Vec::new())
            .await
    }

    /// Make a DELETE request.
    pub async fn delete<T>(&self, endpoint: &str, token: Option<&str>) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        self.send::<(), T>(Method::DELETE, endpoint, None, token, Vec::new())
            .await
    }

    /// Send a request and decode the response.
    ///
    /// The `apikey` header is `token` when given, otherwise the client's
    /// global key. Bodies are never attached to GET requests.
    ///
    /// # Errors
    ///
    /// Returns a classified error for non-success statuses, or
    /// [`EvolutionError::ParseError`] when a success body does not decode.
    #[tracing::instrument(
        skip(self, body, token, attachments),
        fields(attachments = attachments.len())
    )]
    pub async fn send<B, T>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
        token: Option<&str>,
        attachments: Vec<Attachment>,
    ) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned + Default,
    {
        let url = self.endpoint_url(endpoint)?;
        let api_key = token
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(&*self.api_key);
        let writes_body = method != Method::GET;

        let mut request = self
            .http
            .request(method, url)
            .header(API_KEY_HEADER, api_key)
            .header(ACCEPT, "application/json");

        if writes_body && !attachments.is_empty() {
            request = request.multipart(build_form(body, attachments)?);
        } else if let Some(body) = body.filter(|_| writes_body) {
            let json = serde_json::to_vec(body)?;
            request = request.header(CONTENT_TYPE, "application/json").body(json);
        }

        tracing::debug!("sending request");
        let response = request.send().await.map_err(EvolutionError::HttpError)?;

        let status = response.status();
        let text = response.text().await.map_err(EvolutionError::HttpError)?;
        tracing::debug!(status = status.as_u16(), bytes = text.len(), "received response");

        check_status(status, &text)?;
        decode_body(status, &text)
    }
}

fn require_env(name: &str) -> Result<String> {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| {
            EvolutionError::ConfigMissing(format!("{name} environment variable not set"))
        })
}

/// Map a response status to an error, passing success statuses through.
pub(crate) fn check_status(status: StatusCode, body: &str) -> Result<()> {
    if status.is_success() {
        return Ok(());
    }

    let detail = if body.trim().is_empty() {
        EMPTY_BODY_DETAIL.to_string()
    } else {
        format!("Detail: {body}")
    };
    let code = status.as_u16();

    Err(match status {
        StatusCode::UNAUTHORIZED => EvolutionError::Authentication {
            status: code,
            message: format!("authentication failed (401). {detail}"),
        },
        StatusCode::FORBIDDEN => EvolutionError::Authentication {
            status: code,
            message: format!("access forbidden (403), check token permissions. {detail}"),
        },
        StatusCode::NOT_FOUND => EvolutionError::NotFound {
            status: code,
            message: format!(
                "resource not found (404), check endpoint or instance name. {detail}"
            ),
        },
        StatusCode::CONFLICT => EvolutionError::ApiError {
            message: format!(
                "conflict (409), resource may already exist or state is invalid. {detail}"
            ),
            status_code: Some(code),
        },
        StatusCode::BAD_REQUEST => EvolutionError::ApiError {
            message: format!("bad request (400), check parameters. {detail}"),
            status_code: Some(code),
        },
        StatusCode::INTERNAL_SERVER_ERROR => EvolutionError::ApiError {
            message: format!("internal server error (500). {detail}"),
            status_code: Some(code),
        },
        _ => EvolutionError::ApiError {
            message: format!(
                "{} {}. {detail}",
                code,
                status.canonical_reason().unwrap_or("Unknown Status")
            ),
            status_code: Some(code),
        },
    })
}

/// Decode a success body; blank bodies decode to the type's default.
pub(crate) fn decode_body<T>(status: StatusCode, body: &str) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    if body.trim().is_empty() {
        return Ok(T::default());
    }

    serde_json::from_str(body).map_err(|source| EvolutionError::ParseError {
        status: status.as_u16(),
        source,
        body: body.to_string(),
    })
}

fn build_form<B>(body: Option<&B>, attachments: Vec<Attachment>) -> Result<Form>
where
    B: Serialize + ?Sized,
{
    let mut form = Form::new();

    for attachment in attachments {
        let field = attachment.field.clone();
        form = form.part(field, attachment.into_part()?);
    }

    if let Some(body) = body {
        for (name, value) in form_fields(body) {
            form = form.text(name, value);
        }
    }

    Ok(form)
}

/// Flatten a payload one level into multipart text fields.
///
/// Best effort: anything that cannot be expressed as a single text value is
/// logged and skipped.
pub(crate) fn form_fields<B>(body: &B) -> Vec<(String, String)>
where
    B: Serialize + ?Sized,
{
    let map = match serde_json::to_value(body) {
        Ok(Value::Object(map)) => map,
        Ok(other) => {
            tracing::warn!(
                kind = value_kind(&other),
                "payload is not an object, no form fields added"
            );
            return Vec::new();
        }
        Err(e) => {
            tracing::warn!(error = %e, "could not convert payload into form fields");
            return Vec::new();
        }
    };

    map.into_iter()
        .filter_map(|(name, value)| match value {
            Value::Null => None,
            Value::String(s) => Some((name, s)),
            Value::Bool(_) | Value::Number(_) => Some((name, value.to_string())),
            Value::Array(_) | Value::Object(_) => {
                tracing::warn!(field = %name, "skipping nested value in multipart form");
                None
            }
        })
        .collect()
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_debug() {
        let client = EvolutionClient::new("https://evo.example.com", "test-key").unwrap();
        let debug = format!("{:?}", client);
        assert!(debug.contains("EvolutionClient"));
        assert!(debug.contains("base_url"));
        // API key should not be in debug output
        assert!(!debug.contains("test-key"));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client1 = EvolutionClient::new("https://evo.example.com/api", "key").unwrap();
        let client2 = EvolutionClient::new("https://evo.example.com/api/", "key").unwrap();
        assert_eq!(client1.base_url(), "https://evo.example.com/api");
        assert_eq!(client1.base_url(), client2.base_url());
    }

    #[test]
    fn test_endpoint_url_joins_path() {
        let client = EvolutionClient::new("https://evo.example.com/api/", "key").unwrap();
        let url = client.endpoint_url("instance/fetchInstances").unwrap();
        assert_eq!(url.as_str(), "https://evo.example.com/api/instance/fetchInstances");

        let url = client.endpoint_url("/instance/delete/Test1").unwrap();
        assert_eq!(url.as_str(), "https://evo.example.com/api/instance/delete/Test1");
    }

    #[test]
    fn test_blank_configuration_rejected() {
        for (base, key) in [
            ("", "key"),
            ("   ", "key"),
            ("https://evo.example.com", ""),
            ("https://evo.example.com", " \t"),
        ] {
            let err = EvolutionClient::new(base, key).unwrap_err();
            assert!(
                matches!(err, EvolutionError::ConfigMissing(_)),
                "expected ConfigMissing for ({base:?}, {key:?}), got {err:?}"
            );
        }
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let err = EvolutionClient::new("not a url", "key").unwrap_err();
        assert!(matches!(err, EvolutionError::UrlError(_)));
    }

    #[test]
    fn test_from_env_requires_both_variables() {
        env::set_var(BASE_URL_ENV, "https://evo.example.com");
        env::set_var(API_TOKEN_ENV, "  ");
        let err = EvolutionClient::from_env().unwrap_err();
        assert!(err.to_string().contains(API_TOKEN_ENV));

        env::remove_var(BASE_URL_ENV);
        env::set_var(API_TOKEN_ENV, "key");
        let err = EvolutionClient::from_env().unwrap_err();
        assert!(err.to_string().contains(BASE_URL_ENV));

        env::set_var(BASE_URL_ENV, "https://evo.example.com/");
        let client = EvolutionClient::from_env().unwrap();
        assert_eq!(client.base_url(), "https://evo.example.com");

        env::remove_var(BASE_URL_ENV);
        env::remove_var(API_TOKEN_ENV);
    }

    #[test]
    fn test_check_status_success_passes() {
        for code in [200, 201, 204, 299] {
            let status = StatusCode::from_u16(code).unwrap();
            assert!(check_status(status, "").is_ok());
        }
    }

    #[test]
    fn test_check_status_classification() {
        let body = r#"{"error":"boom"}"#;

        let err = check_status(StatusCode::UNAUTHORIZED, body).unwrap_err();
        assert!(matches!(err, EvolutionError::Authentication { status: 401, .. }));
        assert!(err.to_string().contains("authentication failed"));

        let err = check_status(StatusCode::FORBIDDEN, body).unwrap_err();
        assert!(matches!(err, EvolutionError::Authentication { status: 403, .. }));
        assert!(err.to_string().contains("check token permissions"));

        let err = check_status(StatusCode::NOT_FOUND, body).unwrap_err();
        assert!(err.is_not_found());

        for (code, needle) in [
            (409, "conflict"),
            (400, "bad request"),
            (500, "internal server error"),
            (502, "502 Bad Gateway"),
            (418, "418 I'm a teapot"),
        ] {
            let err = check_status(StatusCode::from_u16(code).unwrap(), body).unwrap_err();
            assert!(
                matches!(err, EvolutionError::ApiError { status_code: Some(c), .. } if c == code),
                "status {code} should map to ApiError"
            );
            assert!(err.to_string().contains(needle), "{err} should contain {needle}");
        }
    }

    #[test]
    fn test_check_status_includes_detail() {
        for code in [400, 401, 403, 404, 409, 422, 500, 503] {
            let status = StatusCode::from_u16(code).unwrap();

            let err = check_status(status, "instance Ghost missing").unwrap_err();
            assert!(err.to_string().contains("instance Ghost missing"));
            assert_eq!(err.status_code(), Some(code));

            let err = check_status(status, "  ").unwrap_err();
            assert!(err.to_string().contains(EMPTY_BODY_DETAIL));
        }
    }

    #[derive(Debug, Default, PartialEq, serde::Deserialize)]
    struct Sample {
        #[serde(default)]
        name: String,
        #[serde(default)]
        count: u32,
    }

    #[test]
    fn test_decode_empty_body_yields_default() {
        let s: String = decode_body(StatusCode::OK, "").unwrap();
        assert_eq!(s, "");

        let sample: Sample = decode_body(StatusCode::OK, "   ").unwrap();
        assert_eq!(sample, Sample::default());

        let list: Vec<Sample> = decode_body(StatusCode::OK, "").unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn test_decode_body() {
        let sample: Sample = decode_body(StatusCode::OK, r#"{"name":"Test1","count":3}"#).unwrap();
        assert_eq!(sample.name, "Test1");
        assert_eq!(sample.count, 3);

        let s: String = decode_body(StatusCode::OK, r#""hello""#).unwrap();
        assert_eq!(s, "hello");
    }

    #[test]
    fn test_decode_malformed_body_keeps_raw_text() {
        let err = decode_body::<Sample>(StatusCode::CREATED, "<html>gateway</html>").unwrap_err();
        assert_eq!(err.status_code(), Some(201));
        match err {
            EvolutionError::ParseError { body, .. } => assert_eq!(body, "<html>gateway</html>"),
            other => panic!("expected ParseError, got {other:?}"),
        }
    }

    #[test]
    fn test_form_fields_flattens_scalars() {
        let payload = serde_json::json!({
            "number": "5511999999999",
            "caption": null,
            "delay": 1200,
            "mentionsEveryOne": true,
            "mentioned": ["5511888888888"],
            "quoted": {"key": {"id": "ABC"}}
        });

        let mut fields = form_fields(&payload);
        fields.sort();

        assert_eq!(
            fields,
            vec![
                ("delay".to_string(), "1200".to_string()),
                ("mentionsEveryOne".to_string(), "true".to_string()),
                ("number".to_string(), "5511999999999".to_string()),
            ]
        );
    }

    #[test]
    fn test_form_fields_non_object_payload() {
        assert!(form_fields(&vec![1, 2, 3]).is_empty());
        assert!(form_fields("plain").is_empty());
    }
}
