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

//! Daily Units Example
//!
//! Downloads yesterday's daily summary sales report for every vendor on the
//! account and prints units per SKU.
//!
//! Credentials come from the environment (`ITC_ACCESS_TOKEN`, or
//! `ITC_USER_ID` and `ITC_PASSWORD`).

use chrono::{Duration, Local};
use itc_client::{Config, Error, ReporterClient, SalesReportRequest};
use std::collections::BTreeMap;

fn main() -> Result<(), Error> {
  tracing_subscriber::fmt().with_env_filter("info").init();

  let client = ReporterClient::new(Config::from_env()?)?;
  let date = (Local::now().date_naive() - Duration::days(1)).format("%Y%m%d").to_string();

  for vendor in client.vendors()? {
    let request =
      SalesReportRequest::new(&vendor, "Sales", "Daily", &date).report_subtype("Summary");

    let rows = match client.download_sales_report(&request) {
      Ok(rows) => rows,
      // 404 means there is no report for that day yet
      Err(Error::Transport { status: 404, .. }) => {
        println!("{vendor}: no report for {date}");
        continue;
      }
      Err(e) => return Err(e),
    };

    let mut units: BTreeMap<String, i64> = BTreeMap::new();
    for row in &rows {
      let sku = row.get("SKU").cloned().unwrap_or_default();
      let count = row.get("Units").and_then(|u| u.trim().parse::<i64>().ok()).unwrap_or(0);
      *units.entry(sku).or_default() += count;
    }

    println!("{vendor} on {date}:");
    for (sku, count) in units {
      println!("  {sku:<40} {count:>8}");
    }
  }

  Ok(())
}
