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

//! Reporter facade composing commands, transport, token lifecycle and decoders

use crate::command::Operation;
use crate::decode::{decode_report, decode_vendor_list, decode_vendors_and_regions};
use crate::token::{TokenManager, TokenState};
use crate::transport::{build_form, AuthFields, HttpTransport, RawResponse, Transport};
use itc_core::{Category, Config, Credentials, Error, Result};
use itc_models::{FinancialReportRequest, ReportRow, SalesReportRequest, VendorRegionMap};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info, instrument};

/// Main Reporter API client
///
/// Resolves the access token on first use and caches it, together with the
/// vendor list and vendor/region map, for the lifetime of the client. Every
/// cache is filled under its own lock, so one instance can be shared between
/// threads without duplicate derivations.
///
/// # Examples
///
/// ```ignore
/// use itc_client::ReporterClient;
/// use itc_core::Config;
/// use itc_models::SalesReportRequest;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = Config::from_env()?;
///     let client = ReporterClient::new(config)?;
///
///     for vendor in client.vendors()? {
///         let request = SalesReportRequest::new(&vendor, "Sales", "Daily", "20240101")
///             .report_subtype("Summary");
///         let rows = client.download_sales_report(&request)?;
///         println!("{vendor}: {} rows", rows.len());
///     }
///
///     Ok(())
/// }
/// ```
pub struct ReporterClient {
  transport: Arc<dyn Transport>,
  base_url: String,
  account: Option<String>,
  tokens: TokenManager,
  vendors: Mutex<Option<Vec<String>>>,
  vendors_and_regions: Mutex<Option<VendorRegionMap>>,
}

impl ReporterClient {
  /// Create a new Reporter API client
  ///
  /// # Errors
  ///
  /// Returns an error if the config has no usable credentials or the HTTP
  /// client cannot be created.
  ///
  /// # Examples
  ///
  /// ```rust,no_run
  /// use itc_client::ReporterClient;
  /// use itc_core::Config;
  ///
  /// let config = Config::from_env().expect("Missing credentials");
  /// let client = ReporterClient::new(config).expect("Failed to create client");
  /// ```
  pub fn new(config: Config) -> Result<Self> {
    let transport = HttpTransport::new(&config)?;
    Self::with_transport(config, Arc::new(transport))
  }

  /// Create a client over a custom transport
  ///
  /// # Errors
  ///
  /// Returns an error if the config has no usable credentials.
  pub fn with_transport(config: Config, transport: Arc<dyn Transport>) -> Result<Self> {
    let credentials = config.credentials()?;
    Ok(Self {
      transport,
      base_url: config.base_url.trim_end_matches('/').to_string(),
      account: config.account,
      tokens: TokenManager::new(credentials),
      vendors: Mutex::new(None),
      vendors_and_regions: Mutex::new(None),
    })
  }

  /// Account number embedded in every command, if configured
  pub fn account(&self) -> Option<&str> {
    self.account.as_deref()
  }

  /// Current token lifecycle state
  pub fn token_state(&self) -> TokenState {
    self.tokens.state()
  }

  /// Endpoint URL for an API family
  pub fn endpoint(&self, category: Category) -> String {
    format!("{}/{}/v1", self.base_url, category)
  }

  /// Access token for this client, deriving it on first use
  ///
  /// # Errors
  ///
  /// Transport and decode errors from the token exchange are returned as-is;
  /// nothing is cached on failure.
  #[instrument(skip(self))]
  pub fn access_token(&self) -> Result<String> {
    let auth = match self.tokens.credentials() {
      Credentials::Password { user_id, password } => Some(AuthFields::Password { user_id, password }),
      Credentials::AccessToken(_) => None,
    };

    let token = self.tokens.get_or_derive_today(|request| {
      let auth = auth.ok_or_else(|| {
        Error::Configuration("no user id/password to derive an access token".to_string())
      })?;
      let extra: Vec<(&str, &str)> = request.extra.iter().map(|(k, v)| (*k, v.as_str())).collect();
      self.send(&request.operation, auth, &extra)
    })?;

    Ok(token.value)
  }

  /// Vendor numbers attached to the account
  #[instrument(skip(self))]
  pub fn vendors(&self) -> Result<Vec<String>> {
    let mut cache = lock(&self.vendors);
    if let Some(vendors) = cache.as_ref() {
      return Ok(vendors.clone());
    }

    let response = self.send_with_token(&Operation::GetVendors, &[])?;
    let vendors = decode_vendor_list(response.text()?)?;
    info!("Found {} vendors", vendors.len());

    *cache = Some(vendors.clone());
    Ok(vendors)
  }

  /// Vendors with the regions and financial reports available to each
  #[instrument(skip(self))]
  pub fn vendors_and_regions(&self) -> Result<VendorRegionMap> {
    let mut cache = lock(&self.vendors_and_regions);
    if let Some(vendors) = cache.as_ref() {
      return Ok(vendors.clone());
    }

    let response = self.send_with_token(&Operation::GetVendorsAndRegions, &[])?;
    let vendors = decode_vendors_and_regions(response.text()?)?;
    info!("Found {} vendors with regions", vendors.len());

    *cache = Some(vendors.clone());
    Ok(vendors)
  }

  /// Download and decode a sales and trends report
  ///
  /// # Arguments
  ///
  /// * `request` - vendor, report type/subtype, date type, date and version
  #[instrument(skip(self), fields(vendor = %request.vendor, date = %request.date))]
  pub fn download_sales_report(&self, request: &SalesReportRequest) -> Result<Vec<ReportRow>> {
    let response = self.send_with_token(&Operation::SalesReport(request), &[])?;
    decode_report(&response.body)
  }

  /// Download and decode a financial report
  ///
  /// # Arguments
  ///
  /// * `request` - vendor, region code, report type, fiscal year and period
  #[instrument(skip(self), fields(vendor = %request.vendor, region = %request.region_code))]
  pub fn download_financial_report(
    &self,
    request: &FinancialReportRequest,
  ) -> Result<Vec<ReportRow>> {
    let response = self.send_with_token(&Operation::FinancialReport(request), &[])?;
    decode_report(&response.body)
  }

  /// Send an arbitrary operation with the client's access token
  ///
  /// `operation` is the text after `{Category}.`, e.g. `getAccounts`; the
  /// account segment is added as for every other command. `extra` fields go
  /// into the form next to `jsonRequest`. The raw response is returned
  /// undecoded.
  ///
  /// # Errors
  ///
  /// Token derivation errors, and a `Transport` error for non-2xx statuses.
  #[instrument(skip(self, extra))]
  pub fn request(
    &self,
    category: Category,
    operation: &str,
    extra: &[(&str, &str)],
  ) -> Result<RawResponse> {
    self.send_with_token(&Operation::Custom { category, operation }, extra)
  }

  fn send_with_token(
    &self,
    operation: &Operation<'_>,
    extra: &[(&str, &str)],
  ) -> Result<RawResponse> {
    let token = self.access_token()?;
    self.send(operation, AuthFields::AccessToken(&token), extra)
  }

  fn send(
    &self,
    operation: &Operation<'_>,
    auth: AuthFields<'_>,
    extra: &[(&str, &str)],
  ) -> Result<RawResponse> {
    let category = operation.category();
    let command = operation.command(self.account());
    debug!("Sending {}", command);

    let form = build_form(auth, &command, extra)?;
    self.transport.send(&self.endpoint(category), &form)?.error_for_status()
  }
}

// Caches are only ever replaced wholesale, so a poisoned lock still guards a
// consistent value.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
  mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl std::fmt::Debug for ReporterClient {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("ReporterClient")
      .field("base_url", &self.base_url)
      .field("account", &self.account)
      .field("tokens", &self.tokens)
      .finish()
  }
}
