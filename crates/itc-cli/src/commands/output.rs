use anyhow::Result;
use csv::WriterBuilder;
use itc_models::ReportRow;
use serde::Serialize;
use std::io::{self, Write};

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
  let mut stdout = io::stdout().lock();
  serde_json::to_writer_pretty(&mut stdout, value)?;
  writeln!(stdout)?;
  Ok(())
}

/// Rows as tab-separated text, columns in report header order
pub fn write_tsv(rows: &[ReportRow]) -> Result<()> {
  write_tsv_to(io::stdout().lock(), rows)
}

fn write_tsv_to<W: Write>(out: W, rows: &[ReportRow]) -> Result<()> {
  let mut headers: Vec<&str> = Vec::new();
  for key in rows.iter().flat_map(|row| row.keys()) {
    if !headers.contains(&key.as_str()) {
      headers.push(key);
    }
  }

  let mut writer = WriterBuilder::new().delimiter(b'\t').from_writer(out);
  if !headers.is_empty() {
    writer.write_record(&headers)?;
  }
  for row in rows {
    writer.write_record(headers.iter().map(|h| row.get(*h).map(String::as_str).unwrap_or("")))?;
  }
  writer.flush()?;
  Ok(())
}
