//! Credential forms accepted by the Reporter service

use crate::error::{Error, Result};
use std::fmt;

/// How a client authenticates.
///
/// Exactly one form is authoritative for the lifetime of a client: either the
/// account's user id and password, from which an access token is derived, or
/// an access token supplied up front.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
  /// User id (Apple ID) and password; a token is derived on first use
  Password {
    /// Apple ID used to sign in to the Reporter service
    user_id: String,
    /// Account password
    password: String,
  },
  /// Pre-issued access token; no derivation is ever performed
  AccessToken(String),
}

impl Credentials {
  /// Pick the authoritative credential form.
  ///
  /// A non-empty `access_token` always wins. Otherwise both `user_id` and
  /// `password` must be non-empty.
  pub fn resolve(
    access_token: Option<&str>,
    user_id: Option<&str>,
    password: Option<&str>,
  ) -> Result<Self> {
    if let Some(token) = access_token.filter(|t| !t.is_empty()) {
      return Ok(Credentials::AccessToken(token.to_string()));
    }

    match (user_id.filter(|u| !u.is_empty()), password.filter(|p| !p.is_empty())) {
      (Some(user_id), Some(password)) => Ok(Credentials::Password {
        user_id: user_id.to_string(),
        password: password.to_string(),
      }),
      (Some(_), None) => {
        Err(Error::Configuration("user id supplied without a password".to_string()))
      }
      (None, Some(_)) => {
        Err(Error::Configuration("password supplied without a user id".to_string()))
      }
      (None, None) => Err(Error::Configuration(
        "either an access token or a user id and password is required".to_string(),
      )),
    }
  }

  /// The pre-supplied token, if this is the token form
  pub fn access_token(&self) -> Option<&str> {
    match self {
      Credentials::AccessToken(token) => Some(token),
      Credentials::Password { .. } => None,
    }
  }
}

// Keep secrets out of logs and panic messages.
impl fmt::Debug for Credentials {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Credentials::Password { user_id, .. } => f
        .debug_struct("Password")
        .field("user_id", user_id)
        .field("password", &"<redacted>")
        .finish(),
      Credentials::AccessToken(_) => f.debug_tuple("AccessToken").field(&"<redacted>").finish(),
    }
  }
}
