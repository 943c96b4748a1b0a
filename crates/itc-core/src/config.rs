//! Configuration management for the Reporter client

use crate::credentials::Credentials;
use crate::error::{Error, Result};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;

/// Main configuration struct for the Reporter client
#[derive(Clone, Deserialize, Serialize)]
pub struct Config {
  /// Apple ID used to derive an access token
  pub user_id: Option<String>,

  /// Password matching `user_id`
  pub password: Option<String>,

  /// Pre-issued access token; takes precedence over user id and password
  pub access_token: Option<String>,

  /// Account number, needed when the login has several accounts attached
  pub account: Option<String>,

  /// Request timeout in seconds
  pub timeout_secs: u64,

  /// Base URL for the Reporter service, without the `/{category}/v1` suffix
  pub base_url: String,
}

impl Config {
  /// Load configuration from environment variables
  pub fn from_env() -> Result<Self> {
    dotenv().ok();
    Self::from_vars(|key| env::var(key).ok())
  }

  /// Build a config from `ITC_*` values returned by `var`
  fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
    let non_empty = |key: &str| var(key).filter(|v| !v.is_empty());

    let timeout_secs = match var("ITC_TIMEOUT_SECS") {
      Some(raw) => raw
        .trim()
        .parse()
        .map_err(|_| Error::Configuration(format!("Invalid ITC_TIMEOUT_SECS: {raw}")))?,
      None => crate::DEFAULT_TIMEOUT_SECS,
    };

    let config = Config {
      user_id: non_empty("ITC_USER_ID"),
      password: non_empty("ITC_PASSWORD"),
      access_token: non_empty("ITC_ACCESS_TOKEN"),
      account: non_empty("ITC_ACCOUNT"),
      timeout_secs,
      base_url: non_empty("ITC_BASE_URL").unwrap_or_else(|| crate::REPORTER_BASE_URL.to_string()),
    };

    // Fail early rather than on the first request
    config.credentials()?;
    Ok(config)
  }

  /// Config authenticating with a pre-issued access token
  pub fn with_access_token(access_token: impl Into<String>) -> Self {
    Config { access_token: Some(access_token.into()), ..Self::empty() }
  }

  /// Config authenticating with a user id and password
  pub fn with_password(user_id: impl Into<String>, password: impl Into<String>) -> Self {
    Config { user_id: Some(user_id.into()), password: Some(password.into()), ..Self::empty() }
  }

  /// Scope every command to `account`
  pub fn account(mut self, account: impl Into<String>) -> Self {
    self.account = Some(account.into());
    self
  }

  /// Point the client at a different service root (used by tests)
  pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
    self.base_url = base_url.into();
    self
  }

  /// Resolve the authoritative credentials for this config
  pub fn credentials(&self) -> Result<Credentials> {
    Credentials::resolve(
      self.access_token.as_deref(),
      self.user_id.as_deref(),
      self.password.as_deref(),
    )
  }

  fn empty() -> Self {
    Config {
      user_id: None,
      password: None,
      access_token: None,
      account: None,
      timeout_secs: crate::DEFAULT_TIMEOUT_SECS,
      base_url: crate::REPORTER_BASE_URL.to_string(),
    }
  }
}

impl std::fmt::Debug for Config {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Config")
      .field("user_id", &self.user_id)
      .field("password", &self.password.as_ref().map(|_| "<redacted>"))
      .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
      .field("account", &self.account)
      .field("timeout_secs", &self.timeout_secs)
      .field("base_url", &self.base_url)
      .finish()
  }
}
