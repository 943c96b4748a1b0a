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

//! Report rows and download parameters

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One decoded report line, keyed by column header in header order
pub type ReportRow = IndexMap<String, String>;

/// Parameters for a sales and trends report download.
///
/// See the Reporter guide for valid combinations of report type, subtype,
/// date type and version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesReportRequest {
  /// Vendor number
  pub vendor: String,

  /// e.g. `Sales`, `Subscription`, `Newsstand`
  pub report_type: String,

  /// e.g. `Summary`, `Detailed`; empty when not applicable
  #[serde(default)]
  pub report_subtype: String,

  /// `Daily`, `Weekly`, `Monthly` or `Yearly`
  pub date_type: String,

  /// Report date in the format the date type expects, e.g. `20240101`
  pub date: String,

  /// e.g. `1_0`; empty for the service default
  #[serde(default)]
  pub report_version: String,
}

impl SalesReportRequest {
  /// Request with empty subtype and version
  pub fn new(
    vendor: impl Into<String>,
    report_type: impl Into<String>,
    date_type: impl Into<String>,
    date: impl Into<String>,
  ) -> Self {
    Self {
      vendor: vendor.into(),
      report_type: report_type.into(),
      report_subtype: String::new(),
      date_type: date_type.into(),
      date: date.into(),
      report_version: String::new(),
    }
  }

  /// Set the report subtype
  pub fn report_subtype(mut self, report_subtype: impl Into<String>) -> Self {
    self.report_subtype = report_subtype.into();
    self
  }

  /// Set the report version
  pub fn report_version(mut self, report_version: impl Into<String>) -> Self {
    self.report_version = report_version.into();
    self
  }
}

/// Parameters for a financial report download
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialReportRequest {
  /// Vendor number
  pub vendor: String,

  /// Region code from `getVendorsAndRegions`, e.g. `US`
  pub region_code: String,

  /// e.g. `Financial`
  pub report_type: String,

  /// Apple fiscal year, e.g. `2024`
  pub fiscal_year: String,

  /// Apple fiscal period, `1` to `12`
  pub fiscal_period: String,
}

impl FinancialReportRequest {
  /// Build a financial report request
  pub fn new(
    vendor: impl Into<String>,
    region_code: impl Into<String>,
    report_type: impl Into<String>,
    fiscal_year: impl Into<String>,
    fiscal_period: impl Into<String>,
  ) -> Self {
    Self {
      vendor: vendor.into(),
      region_code: region_code.into(),
      report_type: report_type.into(),
      fiscal_year: fiscal_year.into(),
      fiscal_period: fiscal_period.into(),
    }
  }
}
