use super::output::{print_json, write_tsv};
use anyhow::{Context, Result};
use clap::Args;
use itc_client::ReporterClient;
use itc_models::{FinancialReportRequest, SalesReportRequest};
use tracing::info;

#[derive(Args, Debug)]
pub struct SalesArgs {
  /// Vendor number
  vendor: String,

  /// Report type, e.g. Sales or Subscription
  report_type: String,

  /// Daily, Weekly, Monthly or Yearly
  date_type: String,

  /// Report date, e.g. 20240101
  date: String,

  /// Report subtype, e.g. Summary
  #[arg(long, default_value = "")]
  subtype: String,

  /// Report version, e.g. 1_0
  #[arg(long = "report-version", default_value = "")]
  report_version: String,

  /// Write tab-separated text instead of JSON
  #[arg(long)]
  tsv: bool,
}

#[derive(Args, Debug)]
pub struct FinanceArgs {
  /// Vendor number
  vendor: String,

  /// Region code, e.g. US
  region_code: String,

  /// Report type, e.g. Financial
  report_type: String,

  /// Fiscal year, e.g. 2024
  fiscal_year: String,

  /// Fiscal period, 1 to 12
  fiscal_period: String,

  /// Write tab-separated text instead of JSON
  #[arg(long)]
  tsv: bool,
}

pub fn sales(args: SalesArgs, client: &ReporterClient) -> Result<()> {
  let request = SalesReportRequest::new(args.vendor, args.report_type, args.date_type, args.date)
    .report_subtype(args.subtype)
    .report_version(args.report_version);

  let rows = client
    .download_sales_report(&request)
    .with_context(|| format!("sales report for vendor {}", request.vendor))?;
  info!("Downloaded {} rows", rows.len());

  if args.tsv { write_tsv(&rows) } else { print_json(&rows) }
}

pub fn finance(args: FinanceArgs, client: &ReporterClient) -> Result<()> {
  let request = FinancialReportRequest::new(
    args.vendor,
    args.region_code,
    args.report_type,
    args.fiscal_year,
    args.fiscal_period,
  );

  let rows = client
    .download_financial_report(&request)
    .with_context(|| format!("financial report for vendor {}", request.vendor))?;
  info!("Downloaded {} rows", rows.len());

  if args.tsv { write_tsv(&rows) } else { print_json(&rows) }
}
