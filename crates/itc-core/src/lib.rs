pub mod config;
pub mod credentials;
pub mod error;

pub use config::Config;
pub use credentials::Credentials;
pub use error::{Error, Result};

use std::str::FromStr;

/// The API families exposed by the Reporter service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
  /// Sales and trends reports, vendor list, token management
  Sales,
  /// Financial reports and vendor/region listing
  Finance,
}

impl Category {
  /// Lower-case name used in the endpoint path
  pub fn as_str(&self) -> &'static str {
    match self {
      Category::Sales => "sales",
      Category::Finance => "finance",
    }
  }

  /// Capitalised name used inside command strings
  pub fn command_name(&self) -> &'static str {
    match self {
      Category::Sales => "Sales",
      Category::Finance => "Finance",
    }
  }
}

impl std::fmt::Display for Category {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl FromStr for Category {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    match s.to_ascii_lowercase().as_str() {
      "sales" => Ok(Category::Sales),
      "finance" => Ok(Category::Finance),
      other => Err(Error::Configuration(format!("unknown category: {other}"))),
    }
  }
}

/// Base URL for the Reporter service
pub const REPORTER_BASE_URL: &str = "https://reportingitc-reporter.apple.com/reportservice";

/// Protocol version sent with every request
pub const API_VERSION: &str = "2.2";

/// Response mode sent with every request
pub const API_MODE: &str = "Robot.XML";

/// Default request timeout
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
