/*
 *
 *
 *
 *
 * MIT License
 * Copyright (c) 2025. Dwight J. Browne
 * dwight[-dot-]browne[-at-]dwightjbrowne[-dot-]com
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

//! Access token models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A cached access token and, when the service reported one, its expiry
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
  /// Opaque token value sent as `accesstoken`
  pub value: String,

  /// Last calendar day the token is valid, if known
  #[serde(skip_serializing_if = "Option::is_none")]
  pub expiration_date: Option<NaiveDate>,
}

impl AccessToken {
  /// Token with no known expiry (e.g. supplied by the caller)
  pub fn new(value: impl Into<String>) -> Self {
    Self { value: value.into(), expiration_date: None }
  }

  /// Whether the token is still usable on `today`.
  ///
  /// Only a date strictly after `today` counts; a missing date never does.
  pub fn is_valid_on(&self, today: NaiveDate) -> bool {
    self.expiration_date.is_some_and(|expires| expires > today)
  }
}

impl std::fmt::Debug for AccessToken {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("AccessToken")
      .field("value", &"<redacted>")
      .field("expiration_date", &self.expiration_date)
      .finish()
  }
}

/// Decoded `<ViewToken>` document returned by `viewToken` and `generateToken`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenInfo {
  /// `<AccessToken>` text
  pub access_token: Option<String>,

  /// `<ExpirationDate>` parsed as `%Y-%m-%d`
  pub expiration_date: Option<NaiveDate>,

  /// `<Message>` text, e.g. "Your new access token has been generated."
  pub message: Option<String>,
}

impl TokenInfo {
  /// The token carried by this document, if any
  pub fn token(&self) -> Option<AccessToken> {
    self.access_token.as_ref().map(|value| AccessToken {
      value: value.clone(),
      expiration_date: self.expiration_date,
    })
  }
}
