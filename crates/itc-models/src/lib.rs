//! # itc-models
//!
//! Data models for iTunes Reporter API responses.
//!
//! The Reporter service answers metadata queries with small XML documents and
//! report downloads with gzip-compressed tab-separated text. This crate holds
//! the decoded forms of both, plus the parameter sets for report downloads.
//!
//! ## Usage
//!
//! ```ignore
//! use itc_models::SalesReportRequest;
//!
//! let request = SalesReportRequest::new("80012345", "Sales", "Daily", "20240101")
//!   .report_subtype("Summary")
//!   .report_version("1_0");
//! ```

#![warn(clippy::all)]

pub mod report;
pub mod token;
pub mod vendor;

pub use report::*;
pub use token::*;
pub use vendor::*;
