//! Gzip-compressed tab-separated report bodies

use csv::ReaderBuilder;
use flate2::read::MultiGzDecoder;
use itc_core::{Error, Result};
use itc_models::ReportRow;
use std::io::Read;
use tracing::debug;

/// Decompress and parse a report download.
///
/// The body may hold several concatenated gzip members; all of them are read.
/// The first line holds the column headers and every row keeps their order. Fields follow the excel-tab
/// dialect: a field containing a tab, quote or newline is wrapped in double
/// quotes and internal quotes are doubled. Short rows get empty strings for
/// the missing columns; cells past the last header are dropped.
pub fn decode_report(body: &[u8]) -> Result<Vec<ReportRow>> {
  let mut text = String::new();
  MultiGzDecoder::new(body)
    .read_to_string(&mut text)
    .map_err(|e| Error::Decode(format!("failed to decompress report: {e}")))?;

  let mut reader = ReaderBuilder::new()
    .delimiter(b'\t')
    .quote(b'"')
    .double_quote(true)
    .flexible(true)
    .has_headers(true)
    .from_reader(text.as_bytes());

  let headers = reader
    .headers()
    .map_err(|e| Error::Decode(format!("invalid report header: {e}")))?
    .clone();

  let mut rows = Vec::new();
  for record in reader.records() {
    let record = record.map_err(|e| Error::Decode(format!("invalid report row: {e}")))?;
    if record.len() > headers.len() {
      debug!("Row has {} cells for {} headers", record.len(), headers.len());
    }

    let row: ReportRow = headers
      .iter()
      .enumerate()
      .map(|(i, header)| (header.to_string(), record.get(i).unwrap_or_default().to_string()))
      .collect();
    rows.push(row);
  }

  debug!("Decoded {} report rows", rows.len());
  Ok(rows)
}

#[cfg(test)]
mod tests {
  use super::*;
  use flate2::write::GzEncoder;
  use flate2::Compression;
  use std::io::Write;

  fn gzip(text: &str) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(text.as_bytes()).unwrap();
    encoder.finish().unwrap()
  }

  #[test]
  fn test_header_only_report_is_empty() {
    let rows = decode_report(&gzip("Provider\tSKU\tUnits\n")).unwrap();
    assert!(rows.is_empty());
  }

  #[test]
  fn test_single_row() {
    let rows = decode_report(&gzip("Provider\tSKU\tUnits\nAPPLE\tcom.example.app\t3\n")).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["Provider"], "APPLE");
    assert_eq!(rows[0]["SKU"], "com.example.app");
    assert_eq!(rows[0]["Units"], "3");
  }

  #[test]
  fn test_many_rows_keep_order() {
    let mut body = String::from("SKU\tUnits\n");
    for i in 0..25 {
      body.push_str(&format!("sku-{i}\t{i}\n"));
    }
    let rows = decode_report(&gzip(&body)).unwrap();
    assert_eq!(rows.len(), 25);
    for (i, row) in rows.iter().enumerate() {
      assert_eq!(row["SKU"], format!("sku-{i}"));
      assert_eq!(row.len(), 2);
    }
  }

  #[test]
  fn test_quoted_cells_with_tabs_and_quotes() {
    let body = "Title\tUnits\n\"Tabs\there\"\t1\n\"Say \"\"hi\"\"\"\t2\n";
    let rows = decode_report(&gzip(body)).unwrap();
    assert_eq!(rows[0]["Title"], "Tabs\there");
    assert_eq!(rows[0]["Units"], "1");
    assert_eq!(rows[1]["Title"], "Say \"hi\"");
  }

  #[test]
  fn test_short_row_fills_empty_cells() {
    let rows = decode_report(&gzip("A\tB\tC\nx\ty\n")).unwrap();
    assert_eq!(rows[0]["A"], "x");
    assert_eq!(rows[0]["C"], "");
  }

  #[test]
  fn test_concatenated_gzip_members_are_all_read() {
    let mut body = gzip("SKU\tUnits\na\t1\n");
    body.extend(gzip("b\t2\nc\t3\n"));

    let rows = decode_report(&body).unwrap();
    let skus: Vec<&str> = rows.iter().map(|row| row["SKU"].as_str()).collect();
    assert_eq!(skus, vec!["a", "b", "c"]);
    assert_eq!(rows[2]["Units"], "3");
  }

  #[test]
  fn test_rows_keep_header_order() {
    let body = "Provider\tSKU\tBegin Date\tUnits\nAPPLE\tx\t01/01/2024\t1\n";
    let rows = decode_report(&gzip(body)).unwrap();
    let columns: Vec<&str> = rows[0].keys().map(String::as_str).collect();
    assert_eq!(columns, vec!["Provider", "SKU", "Begin Date", "Units"]);
  }

  #[test]
  fn test_truncated_gzip_is_decode_error() {
    let compressed = gzip("A\tB\n1\t2\n");
    let truncated = &compressed[..compressed.len() / 2];
    assert!(matches!(decode_report(truncated), Err(Error::Decode(_))));
  }

  #[test]
  fn test_uncompressed_body_is_decode_error() {
    assert!(matches!(decode_report(b"A\tB\n1\t2\n"), Err(Error::Decode(_))));
  }
}
