//! HTTP transport layer for Reporter API requests

use itc_core::{Config, Error, Result, API_MODE, API_VERSION};
use reqwest::blocking::Client;
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;
use tracing::{debug, error, instrument};

/// Status, headers and body of one Reporter response
#[derive(Debug, Clone, Default)]
pub struct RawResponse {
  /// HTTP status code
  pub status: u16,
  /// Response headers, names lower-cased
  pub headers: HashMap<String, String>,
  /// Undecoded body bytes
  pub body: Vec<u8>,
}

impl RawResponse {
  /// Build a response, normalising header names
  pub fn new<K, V>(status: u16, headers: impl IntoIterator<Item = (K, V)>, body: Vec<u8>) -> Self
  where
    K: AsRef<str>,
    V: Into<String>,
  {
    let headers =
      headers.into_iter().map(|(k, v)| (k.as_ref().to_ascii_lowercase(), v.into())).collect();
    Self { status, headers, body }
  }

  /// Case-insensitive header lookup
  pub fn header(&self, name: &str) -> Option<&str> {
    self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
  }

  /// Whether the status is 2xx
  pub fn is_success(&self) -> bool {
    (200..300).contains(&self.status)
  }

  /// Turn a non-2xx response into [`Error::Transport`]
  pub fn error_for_status(self) -> Result<Self> {
    if self.is_success() {
      Ok(self)
    } else {
      Err(Error::Transport {
        status: self.status,
        body: String::from_utf8_lossy(&self.body).into_owned(),
      })
    }
  }

  /// Body as UTF-8 text
  pub fn text(&self) -> Result<&str> {
    std::str::from_utf8(&self.body)
      .map_err(|e| Error::Decode(format!("response body is not UTF-8: {e}")))
  }
}

/// Sends one form-encoded POST to the Reporter service.
///
/// Implementations return whatever status the server sent; mapping non-2xx
/// to an error happens in the client so every transport behaves the same.
pub trait Transport: Send + Sync {
  /// POST `form` to `endpoint`
  fn send(&self, endpoint: &str, form: &[(String, String)]) -> Result<RawResponse>;
}

/// Credential fields placed inside the JSON envelope
#[derive(Clone, Copy)]
pub enum AuthFields<'a> {
  /// `userid` and `password`; used by the token operations
  Password {
    /// Apple ID
    user_id: &'a str,
    /// Account password
    password: &'a str,
  },
  /// `accesstoken`; used by everything else
  AccessToken(&'a str),
}

/// Assemble the form fields for one request.
///
/// Version, mode, credentials and the command are serialised as JSON into the
/// single `jsonRequest` field; `extra` fields follow as siblings outside it.
pub fn build_form(
  auth: AuthFields<'_>,
  command: &str,
  extra: &[(&str, &str)],
) -> Result<Vec<(String, String)>> {
  let mut envelope = BTreeMap::new();
  envelope.insert("version", API_VERSION);
  envelope.insert("mode", API_MODE);
  match auth {
    AuthFields::Password { user_id, password } => {
      envelope.insert("userid", user_id);
      envelope.insert("password", password);
    }
    AuthFields::AccessToken(token) => {
      envelope.insert("accesstoken", token);
    }
  }
  envelope.insert("queryInput", command);

  let mut form = vec![("jsonRequest".to_string(), serde_json::to_string(&envelope)?)];
  form.extend(extra.iter().map(|(k, v)| (k.to_string(), v.to_string())));
  Ok(form)
}

/// [`Transport`] backed by a blocking `reqwest` client
pub struct HttpTransport {
  client: Client,
  timeout: Duration,
}

impl HttpTransport {
  /// Create a new transport instance
  pub fn new(config: &Config) -> Result<Self> {
    let timeout = Duration::from_secs(config.timeout_secs);
    let client = Client::builder()
      .timeout(timeout)
      .user_agent("itc-client/0.1.0")
      .build()
      .map_err(|e| Error::Http(format!("Failed to create HTTP client: {}", e)))?;

    Ok(Self { client, timeout })
  }

  /// Get request timeout duration
  pub fn timeout(&self) -> Duration {
    self.timeout
  }
}

impl Transport for HttpTransport {
  #[instrument(skip(self, form), fields(endpoint = %endpoint))]
  fn send(&self, endpoint: &str, form: &[(String, String)]) -> Result<RawResponse> {
    let response = self
      .client
      .post(endpoint)
      .form(form)
      .send()
      .map_err(|e| Error::Http(format!("Request failed: {}", e)))?;

    let status = response.status();
    if status.is_success() {
      debug!("Request successful with status: {}", status);
    } else {
      error!("Request failed with status: {}", status);
    }

    let headers: Vec<(String, String)> = response
      .headers()
      .iter()
      .filter_map(|(name, value)| {
        value.to_str().ok().map(|v| (name.as_str().to_string(), v.to_string()))
      })
      .collect();

    let body = response
      .bytes()
      .map_err(|e| Error::Http(format!("Failed to read response body: {}", e)))?;
    debug!("Response body length: {} bytes", body.len());

    #[cfg(feature = "debug-logging")]
    debug!("Response body: {}", String::from_utf8_lossy(&body));

    Ok(RawResponse::new(status.as_u16(), headers, body.to_vec()))
  }
}

impl std::fmt::Debug for HttpTransport {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("HttpTransport").field("timeout", &self.timeout).finish()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn envelope(form: &[(String, String)]) -> serde_json::Value {
    assert_eq!(form[0].0, "jsonRequest");
    serde_json::from_str(&form[0].1).unwrap()
  }

  #[test]
  fn test_build_form_with_token() {
    let form =
      build_form(AuthFields::AccessToken("tok"), "[p=Reporter.properties, Sales.getVendors]", &[])
        .unwrap();

    assert_eq!(form.len(), 1);
    let json = envelope(&form);
    assert_eq!(json["version"], "2.2");
    assert_eq!(json["mode"], "Robot.XML");
    assert_eq!(json["accesstoken"], "tok");
    assert_eq!(json["queryInput"], "[p=Reporter.properties, Sales.getVendors]");
    assert!(json.get("password").is_none());
  }

  #[test]
  fn test_build_form_extra_fields_are_siblings() {
    let auth = AuthFields::Password { user_id: "me@example.com", password: "pw" };
    let form = build_form(auth, "cmd", &[("isExistingToken", "Y"), ("requestId", "abc")]).unwrap();

    assert_eq!(form.len(), 3);
    assert_eq!(form[1], ("isExistingToken".to_string(), "Y".to_string()));
    assert_eq!(form[2], ("requestId".to_string(), "abc".to_string()));

    let json = envelope(&form);
    assert_eq!(json["userid"], "me@example.com");
    assert_eq!(json["password"], "pw");
    assert!(json.get("requestId").is_none());
  }

  #[test]
  fn test_header_lookup_is_case_insensitive() {
    let response = RawResponse::new(200, [("SERVICE_REQUEST_ID", "42")], Vec::new());
    assert_eq!(response.header("service_request_id"), Some("42"));
    assert_eq!(response.header("Service_Request_Id"), Some("42"));
  }

  #[test]
  fn test_error_for_status() {
    let ok = RawResponse::new(204, Vec::<(String, String)>::new(), Vec::new());
    assert!(ok.error_for_status().is_ok());

    let bad = RawResponse::new(400, Vec::<(String, String)>::new(), b"<Error/>".to_vec());
    match bad.error_for_status() {
      Err(Error::Transport { status, body }) => {
        assert_eq!(status, 400);
        assert_eq!(body, "<Error/>");
      }
      other => panic!("Expected Transport error, got {other:?}"),
    }
  }

  #[test]
  fn test_transport_creation() {
    let transport = HttpTransport::new(&Config::with_access_token("tok")).unwrap();
    assert_eq!(transport.timeout(), Duration::from_secs(30));
  }
}
