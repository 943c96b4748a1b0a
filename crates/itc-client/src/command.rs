//! Reporter command strings
//!
//! Every request carries a `queryInput` of the form
//! `[p=Reporter.properties, {a=<account> }{Category}.{operation}]`.
//! Nothing here validates the operation text; the typed [`Operation`]
//! variants only fix field order and delimiters.

use itc_core::Category;
use itc_models::{FinancialReportRequest, SalesReportRequest};

const COMMAND_PREFIX: &str = "[p=Reporter.properties, ";

/// Format a command string for `category`.
///
/// The account segment is emitted only when `account` is `Some`, directly
/// after the properties prefix.
pub fn build_command(category: Category, operation: &str, account: Option<&str>) -> String {
  let account_segment = account.map(|a| format!("a={a} ")).unwrap_or_default();
  format!("{COMMAND_PREFIX}{account_segment}{}.{operation}]", category.command_name())
}

/// The operations this client issues
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation<'a> {
  /// Show the current token and its expiry
  ViewToken,
  /// Request (and later confirm) a new token
  GenerateToken,
  /// List vendor numbers
  GetVendors,
  /// List vendors with their regions and report names
  GetVendorsAndRegions,
  /// Download a sales and trends report
  SalesReport(&'a SalesReportRequest),
  /// Download a financial report
  FinancialReport(&'a FinancialReportRequest),
  /// Any other operation, sent verbatim, e.g. `getAccounts`
  Custom {
    /// API family the operation is sent to
    category: Category,
    /// Operation text after `{Category}.`
    operation: &'a str,
  },
}

impl Operation<'_> {
  /// API family the operation belongs to
  pub fn category(&self) -> Category {
    match self {
      Operation::ViewToken
      | Operation::GenerateToken
      | Operation::GetVendors
      | Operation::SalesReport(_) => Category::Sales,
      Operation::GetVendorsAndRegions | Operation::FinancialReport(_) => Category::Finance,
      Operation::Custom { category, .. } => *category,
    }
  }

  /// Operation text placed after `{Category}.`
  ///
  /// The two report downloads use different separators on the wire and the
  /// service accepts them as written.
  pub fn render(&self) -> String {
    match self {
      Operation::ViewToken => "viewToken".to_string(),
      Operation::GenerateToken => "generateToken".to_string(),
      Operation::GetVendors => "getVendors".to_string(),
      Operation::GetVendorsAndRegions => "getVendorsAndRegions".to_string(),
      Operation::SalesReport(r) => format!(
        "getReport, {},{},{},{},{},{}",
        r.vendor, r.report_type, r.report_subtype, r.date_type, r.date, r.report_version
      ),
      Operation::FinancialReport(r) => format!(
        "getReport {}, {}, {}, {}, {}",
        r.vendor, r.region_code, r.report_type, r.fiscal_year, r.fiscal_period
      ),
      Operation::Custom { operation, .. } => operation.to_string(),
    }
  }

  /// Full command string for this operation
  pub fn command(&self, account: Option<&str>) -> String {
    build_command(self.category(), &self.render(), account)
  }
}
