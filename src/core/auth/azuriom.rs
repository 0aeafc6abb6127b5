//! Azuriom authentication
//!
//! Thin wrapper over the Azuriom auth API (`/authenticate`, `/logout`).
//! Credentials and tokens are passed through; nothing is stored.

use crate::error::{ApiError, Result};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::time::Duration;

/// Default Azuriom auth API base
pub const AUTH_URL: &str = "https://finalium.fr/api/auth";

/// Login request body
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub email: String,
    pub password: String,
    /// Launcher installation token; omitted from the request when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_token: Option<String>,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            client_token: None,
        }
    }

    pub fn with_client_token(mut self, client_token: impl Into<String>) -> Self {
        self.client_token = Some(client_token.into());
        self
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("client_token", &self.client_token)
            .finish()
    }
}

/// Logout request body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoutRequest {
    pub access_token: String,
}

/// Payload returned by a successful login
///
/// The shape is defined by the provider; accessors cover the usual
/// Azuriom user fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthResult(Value);

impl AuthResult {
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// Account id (number or string, depending on the provider)
    pub fn id(&self) -> Option<&Value> {
        self.0.get("id")
    }

    pub fn username(&self) -> Option<&str> {
        self.str_field("username")
    }

    pub fn uuid(&self) -> Option<&str> {
        self.str_field("uuid")
    }

    pub fn access_token(&self) -> Option<&str> {
        self.str_field("access_token")
            .or_else(|| self.str_field("accessToken"))
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }
}

impl From<Value> for AuthResult {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Azuriom auth API client
#[derive(Debug, Clone)]
pub struct AzuriomAuth {
    client: reqwest::Client,
    base_url: String,
    timeout: Option<Duration>,
}

impl AzuriomAuth {
    pub fn new() -> Self {
        Self::with_client(reqwest::Client::new(), AUTH_URL)
    }

    /// Use an existing HTTP client and a custom API base
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            timeout: None,
        }
    }

    /// Per-request timeout. Without one the client's default applies.
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    fn post<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> RequestBuilder {
        let request = self.client.post(self.endpoint(path)).json(body);
        match self.timeout {
            Some(timeout) => request.timeout(timeout),
            None => request,
        }
    }

    /// Log in with an email and password
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
        client_token: Option<&str>,
    ) -> Result<AuthResult> {
        let mut credentials = Credentials::new(email, password);
        credentials.client_token = client_token.map(str::to_string);
        self.authenticate_with(&credentials).await
    }

    /// Log in with prepared credentials
    ///
    /// Resolves with the response body on HTTP 200. Any other status is
    /// returned as [`ApiError::Http`], or [`ApiError::EmptyBody`] when the
    /// body is empty or falsy (`null`, `false`, `0`, `""`).
    pub async fn authenticate_with(&self, credentials: &Credentials) -> Result<AuthResult> {
        let response = self
            .post("authenticate", credentials)
            .send()
            .await
            .inspect_err(|e| tracing::error!("Error during authentication: {}", e))?;

        let status = response.status();
        let body = read_body(response).await?;

        if status == StatusCode::OK {
            tracing::info!("Authenticated {}", credentials.email);
            return Ok(AuthResult(body.unwrap_or(Value::Null)));
        }

        tracing::warn!("Authentication rejected with HTTP {}", status);
        Err(ApiError::rejected(status, body.filter(|b| !is_falsy(b))))
    }

    /// Invalidate an access token
    ///
    /// Succeeds only on HTTP 204. Other responses are returned with their
    /// body untouched, or as [`ApiError::Rejected`] when there is none.
    pub async fn logout(&self, access_token: &str) -> Result<()> {
        let request = LogoutRequest {
            access_token: access_token.to_string(),
        };

        let response = self
            .post("logout", &request)
            .send()
            .await
            .inspect_err(|e| tracing::error!("Error during logout: {}", e))?;

        let status = response.status();
        if status == StatusCode::NO_CONTENT {
            tracing::info!("Logged out");
            return Ok(());
        }

        let body = read_body(response).await?;
        tracing::warn!("Logout rejected with HTTP {}", status);
        Err(match body {
            Some(body) => ApiError::Http { status, body },
            None => ApiError::Rejected { status },
        })
    }
}

impl Default for AzuriomAuth {
    fn default() -> Self {
        Self::new()
    }
}

/// Read a response body as JSON
///
/// Returns `None` for an empty body. Bodies that are not JSON are kept as a
/// JSON string.
async fn read_body(response: Response) -> Result<Option<Value>> {
    let bytes = response.bytes().await?;
    Ok(parse_body(&bytes))
}

fn parse_body(bytes: &[u8]) -> Option<Value> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return None;
    }

    let value = serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()));

    Some(value)
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_credentials_without_client_token() {
        let body = serde_json::to_value(Credentials::new("a@b.com", "pw")).unwrap();
        assert_eq!(body, json!({ "email": "a@b.com", "password": "pw" }));
        assert!(body.get("clientToken").is_none());
    }

    #[test]
    fn test_credentials_with_client_token() {
        let credentials = Credentials::new("a@b.com", "pw").with_client_token("abc");
        let body = serde_json::to_value(credentials).unwrap();
        assert_eq!(
            body,
            json!({ "email": "a@b.com", "password": "pw", "clientToken": "abc" })
        );
    }

    #[test]
    fn test_credentials_debug_hides_password() {
        let debug = format!("{:?}", Credentials::new("a@b.com", "hunter2"));
        assert!(debug.contains("a@b.com"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_logout_request() {
        let body = serde_json::to_value(LogoutRequest {
            access_token: "tok".to_string(),
        })
        .unwrap();
        assert_eq!(body, json!({ "accessToken": "tok" }));
    }

    #[test]
    fn test_parse_body() {
        assert_eq!(parse_body(b""), None);
        assert_eq!(parse_body(b"  \n"), None);
        assert_eq!(parse_body(b"false"), Some(json!(false)));
        assert_eq!(parse_body(b"0"), Some(json!(0)));
        assert_eq!(parse_body(b"{\"code\":\"invalid\"}"), Some(json!({ "code": "invalid" })));
        assert_eq!(parse_body(b"Forbidden"), Some(json!("Forbidden")));
    }

    #[test]
    fn test_is_falsy() {
        assert!(is_falsy(&json!(null)));
        assert!(is_falsy(&json!(false)));
        assert!(is_falsy(&json!(0)));
        assert!(is_falsy(&json!("")));
        assert!(!is_falsy(&json!(true)));
        assert!(!is_falsy(&json!("Forbidden")));
        assert!(!is_falsy(&json!({})));
    }

    #[test]
    fn test_endpoint_joins_path() {
        let auth = AzuriomAuth::with_client(reqwest::Client::new(), "http://localhost/api/auth/");
        assert_eq!(auth.endpoint("logout"), "http://localhost/api/auth/logout");
    }

    #[test]
    fn test_auth_result_accessors() {
        let result = AuthResult::from(json!({
            "id": 1,
            "username": "Steve",
            "uuid": "069a79f4-44e9-4726-a5be-fca90e38aaf5",
            "access_token": "secret"
        }));
        assert_eq!(result.id(), Some(&json!(1)));
        assert_eq!(result.username(), Some("Steve"));
        assert_eq!(result.uuid(), Some("069a79f4-44e9-4726-a5be-fca90e38aaf5"));
        assert_eq!(result.access_token(), Some("secret"));
    }
}
