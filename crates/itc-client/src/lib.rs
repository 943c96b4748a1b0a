//! # itc-client
//!
//! A blocking client for the iTunes Reporter API.
//!
//! ## Features
//!
//! - **Token lifecycle**: derives an access token from a user id and password
//!   (view, generate, confirm) or uses one supplied up front
//! - **Command protocol**: builds the bracketed `queryInput` command strings,
//!   with optional account scoping
//! - **Decoding**: vendor lists and vendor/region trees from XML, reports
//!   from gzip-compressed tab-separated text
//! - **Configurable**: environment-based configuration via itc-core
//!
//! ## Usage
//!
//! ```rust,no_run
//! use itc_client::ReporterClient;
//! use itc_core::Config;
//! use itc_models::FinancialReportRequest;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let client = ReporterClient::new(config)?;
//!
//!     for (vendor, entry) in client.vendors_and_regions()? {
//!         for region in &entry.regions {
//!             let request =
//!                 FinancialReportRequest::new(&vendor, &region.code, "Financial", "2024", "1");
//!             let rows = client.download_financial_report(&request)?;
//!             println!("{vendor}/{}: {} rows", region.code, rows.len());
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All methods return `Result<T, itc_core::Error>`. Non-2xx responses surface
//! as `Error::Transport`, malformed bodies as `Error::Decode`. Nothing is
//! retried.

#![deny(missing_docs)]
#![warn(clippy::all)]

pub mod client;
pub mod command;
pub mod decode;
pub mod token;
pub mod transport;

// Re-export the main client and common types
pub use client::ReporterClient;
pub use command::{build_command, Operation};
pub use itc_core::{Category, Config, Credentials, Error, Result};
pub use itc_models::*;
pub use token::{TokenManager, TokenState, TokenStep};
pub use transport::{HttpTransport, RawResponse, Transport};
