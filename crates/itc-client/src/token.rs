/*
 *
 *
 *
 *
 * MIT License
 * Copyright (c) 2025. Dwight J. Browne
 * dwight[-at-]dwightjbrowne[-dot-]com
 *
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */

//! Access token lifecycle
//!
//! With password credentials the token is derived lazily, at most once per
//! client:
//!
//! 1. `viewToken`: if the existing token expires after today, use it.
//! 2. `generateToken`: the server answers with a y/n prompt and a
//!    `service_request_id` header naming the pending confirmation.
//! 3. `generateToken` again with `isExistingToken=Y` and `requestId=<id>`:
//!    the body carries the new `AccessToken`.
//!
//! Once cached, the token is never refreshed, even past its expiry.

use crate::command::Operation;
use crate::decode::decode_token_info;
use crate::transport::RawResponse;
use chrono::{Local, NaiveDate};
use itc_core::{Credentials, Error, Result};
use itc_models::AccessToken;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info, warn};

/// Response header carrying the confirmation challenge id
pub const SERVICE_REQUEST_ID_HEADER: &str = "service_request_id";

/// One step of the token derivation exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenStep {
  /// Ask for the current token and its expiry
  ViewExisting,
  /// Ask for a new token; the server answers with a challenge
  RequestGeneration,
  /// Confirm the challenge to receive the new token
  ConfirmGeneration {
    /// Value of the `service_request_id` header
    request_id: String,
  },
  /// Derivation finished
  Resolved(AccessToken),
}

/// What a [`TokenStep`] needs to send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRequest {
  /// `viewToken` or `generateToken`
  pub operation: Operation<'static>,
  /// Form fields sent next to `jsonRequest`
  pub extra: Vec<(&'static str, String)>,
}

impl TokenStep {
  /// The request this step sends, or `None` once resolved
  pub fn request(&self) -> Option<TokenRequest> {
    match self {
      TokenStep::ViewExisting => {
        Some(TokenRequest { operation: Operation::ViewToken, extra: Vec::new() })
      }
      TokenStep::RequestGeneration => {
        Some(TokenRequest { operation: Operation::GenerateToken, extra: Vec::new() })
      }
      TokenStep::ConfirmGeneration { request_id } => Some(TokenRequest {
        operation: Operation::GenerateToken,
        extra: vec![("isExistingToken", "Y".to_string()), ("requestId", request_id.clone())],
      }),
      TokenStep::Resolved(_) => None,
    }
  }

  /// Move to the next step given the (2xx) response to [`TokenStep::request`].
  pub fn advance(self, response: &RawResponse, today: NaiveDate) -> Result<TokenStep> {
    match self {
      TokenStep::ViewExisting => {
        let info = decode_token_info(response.text()?)?;
        if let Some(message) = &info.message {
          debug!("viewToken: {}", message);
        }
        match info.token() {
          Some(token) if token.is_valid_on(today) => {
            info!("Existing access token valid until {:?}", token.expiration_date);
            Ok(TokenStep::Resolved(token))
          }
          _ => Ok(TokenStep::RequestGeneration),
        }
      }
      TokenStep::RequestGeneration => {
        let request_id = response
          .header(SERVICE_REQUEST_ID_HEADER)
          .ok_or_else(|| Error::missing("service_request_id header"))?;
        Ok(TokenStep::ConfirmGeneration { request_id: request_id.to_string() })
      }
      TokenStep::ConfirmGeneration { .. } => {
        let info = decode_token_info(response.text()?)?;
        if let Some(message) = &info.message {
          info!("generateToken: {}", message);
        }
        info.token().map(TokenStep::Resolved).ok_or_else(|| Error::missing("AccessToken"))
      }
      TokenStep::Resolved(token) => Ok(TokenStep::Resolved(token)),
    }
  }
}

/// Token lifecycle state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenState {
  /// Nothing derived yet
  NoToken,
  /// A derivation is in progress
  Deriving(TokenStep),
  /// Token available for every later request
  Cached(AccessToken),
}

/// Owns the credentials and the cached token for one client
pub struct TokenManager {
  credentials: Credentials,
  state: Mutex<TokenState>,
}

impl TokenManager {
  /// Start in `Cached` for a supplied token, `NoToken` otherwise
  pub fn new(credentials: Credentials) -> Self {
    let state = match credentials.access_token() {
      Some(token) => TokenState::Cached(AccessToken::new(token)),
      None => TokenState::NoToken,
    };
    Self { credentials, state: Mutex::new(state) }
  }

  /// Credentials this manager derives from
  pub fn credentials(&self) -> &Credentials {
    &self.credentials
  }

  /// Snapshot of the current state
  pub fn state(&self) -> TokenState {
    self.lock().clone()
  }

  /// The cached token, if any
  pub fn cached(&self) -> Option<AccessToken> {
    match &*self.lock() {
      TokenState::Cached(token) => Some(token.clone()),
      _ => None,
    }
  }

  /// Return the cached token, deriving it first if needed.
  ///
  /// `send` performs one request and must return a 2xx response or an error.
  /// The lock is held for the whole derivation, so concurrent callers wait
  /// for the first one instead of starting their own exchange. Any error puts
  /// the manager back to `NoToken`.
  pub fn get_or_derive<F>(&self, today: NaiveDate, mut send: F) -> Result<AccessToken>
  where
    F: FnMut(&TokenRequest) -> Result<RawResponse>,
  {
    let mut state = self.lock();
    if let TokenState::Cached(token) = &*state {
      return Ok(token.clone());
    }

    if !matches!(self.credentials, Credentials::Password { .. }) {
      return Err(Error::Configuration(
        "no access token and no user id/password to derive one".to_string(),
      ));
    }

    let mut step = TokenStep::ViewExisting;
    loop {
      let Some(request) = step.request() else {
        break;
      };
      *state = TokenState::Deriving(step.clone());

      let advanced = send(&request).and_then(|response| step.clone().advance(&response, today));
      match advanced {
        Ok(next) => step = next,
        Err(e) => {
          warn!("Access token derivation failed: {}", e);
          *state = TokenState::NoToken;
          return Err(e);
        }
      }
    }

    match step {
      TokenStep::Resolved(token) => {
        *state = TokenState::Cached(token.clone());
        Ok(token)
      }
      // request() is None only for Resolved
      other => Err(Error::Decode(format!("token derivation stopped at {other:?}"))),
    }
  }

  /// [`TokenManager::get_or_derive`] against the local calendar date
  pub fn get_or_derive_today<F>(&self, send: F) -> Result<AccessToken>
  where
    F: FnMut(&TokenRequest) -> Result<RawResponse>,
  {
    self.get_or_derive(Local::now().date_naive(), send)
  }

  // A panic inside `send` poisons the lock; the state it guards is still
  // consistent because every transition is a single assignment.
  fn lock(&self) -> MutexGuard<'_, TokenState> {
    self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
  }
}

impl std::fmt::Debug for TokenManager {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("TokenManager")
      .field("credentials", &self.credentials)
      .field("state", &*self.lock())
      .finish()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 10).unwrap()
  }

  fn xml(body: &str) -> RawResponse {
    RawResponse::new(200, Vec::<(String, String)>::new(), body.as_bytes().to_vec())
  }

  fn view_token(token: &str, expires: &str) -> RawResponse {
    xml(&format!(
      "\n<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n<ViewToken>\n    \
       <AccessToken>{token}</AccessToken>\n    <ExpirationDate>{expires}</ExpirationDate>\n</ViewToken>\n"
    ))
  }

  fn password_manager() -> TokenManager {
    TokenManager::new(Credentials::Password {
      user_id: "me@example.com".to_string(),
      password: "pw".to_string(),
    })
  }

  #[test]
  fn test_view_with_future_expiry_resolves() {
    let next = TokenStep::ViewExisting.advance(&view_token("old", "2024-05-11"), today()).unwrap();
    match next {
      TokenStep::Resolved(token) => {
        assert_eq!(token.value, "old");
        assert_eq!(token.expiration_date, NaiveDate::from_ymd_opt(2024, 5, 11));
      }
      other => panic!("Expected Resolved, got {other:?}"),
    }
  }

  #[test]
  fn test_view_expiring_today_requests_generation() {
    let next = TokenStep::ViewExisting.advance(&view_token("old", "2024-05-10"), today()).unwrap();
    assert_eq!(next, TokenStep::RequestGeneration);
  }

  #[test]
  fn test_view_without_token_requests_generation() {
    let response = xml("<ViewToken><Message>You currently don't have an access token.</Message></ViewToken>");
    let next = TokenStep::ViewExisting.advance(&response, today()).unwrap();
    assert_eq!(next, TokenStep::RequestGeneration);
  }

  #[test]
  fn test_generation_reads_challenge_header() {
    let response = RawResponse::new(
      200,
      [("SERVICE_REQUEST_ID", "req-1")],
      b"Do you still want to continue? (y/n): ".to_vec(),
    );
    let next = TokenStep::RequestGeneration.advance(&response, today()).unwrap();
    assert_eq!(next, TokenStep::ConfirmGeneration { request_id: "req-1".to_string() });
  }

  #[test]
  fn test_generation_without_header_fails() {
    let result = TokenStep::RequestGeneration.advance(&xml("(y/n): "), today());
    assert!(matches!(result, Err(Error::Decode(_))));
  }

  #[test]
  fn test_confirm_request_carries_extra_fields() {
    let step = TokenStep::ConfirmGeneration { request_id: "req-1".to_string() };
    let request = step.request().unwrap();
    assert_eq!(request.operation, Operation::GenerateToken);
    assert_eq!(
      request.extra,
      vec![("isExistingToken", "Y".to_string()), ("requestId", "req-1".to_string())]
    );
  }

  #[test]
  fn test_confirm_without_token_fails() {
    let step = TokenStep::ConfirmGeneration { request_id: "req-1".to_string() };
    let result = step.advance(&xml("<ViewToken><Message>nope</Message></ViewToken>"), today());
    assert!(matches!(result, Err(Error::Decode(_))));
  }

  #[test]
  fn test_supplied_token_starts_cached() {
    let manager = TokenManager::new(Credentials::AccessToken("given".to_string()));
    assert_eq!(manager.state(), TokenState::Cached(AccessToken::new("given")));

    let token = manager.get_or_derive(today(), |_| panic!("no request expected")).unwrap();
    assert_eq!(token.value, "given");
  }

  #[test]
  fn test_full_derivation_then_cached() {
    let manager = password_manager();
    let mut responses = vec![
      view_token("old", "2024-05-01"),
      RawResponse::new(200, [("service_request_id", "req-9")], Vec::new()),
      view_token("new", "2024-11-10"),
    ]
    .into_iter();
    let mut sent = Vec::new();

    let token = manager
      .get_or_derive(today(), |request| {
        sent.push(request.clone());
        Ok(responses.next().unwrap())
      })
      .unwrap();

    assert_eq!(token.value, "new");
    assert_eq!(sent.len(), 3);
    assert_eq!(sent[0].operation, Operation::ViewToken);
    assert!(sent[1].extra.is_empty());
    assert_eq!(sent[2].extra[1], ("requestId", "req-9".to_string()));
    assert_eq!(manager.cached(), Some(token));

    // A second call never reaches the network, even on a later date
    let later = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
    let again = manager.get_or_derive(later, |_| panic!("no request expected")).unwrap();
    assert_eq!(again.value, "new");
  }

  #[test]
  fn test_failure_resets_to_no_token() {
    let manager = password_manager();
    let result = manager.get_or_derive(today(), |_| {
      Err(Error::Transport { status: 400, body: String::new() })
    });

    assert!(matches!(result, Err(Error::Transport { status: 400, .. })));
    assert_eq!(manager.state(), TokenState::NoToken);
  }
}
