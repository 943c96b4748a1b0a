use super::output::print_json;
use anyhow::Result;
use itc_client::ReporterClient;
use tracing::info;

/// Metadata queries that need no arguments
#[derive(Debug, Clone, Copy)]
pub enum ListCommand {
  Token,
  Vendors,
  Regions,
}

pub fn execute(cmd: ListCommand, client: &ReporterClient) -> Result<()> {
  match cmd {
    ListCommand::Token => {
      println!("{}", client.access_token()?);
    }
    ListCommand::Vendors => {
      let vendors = client.vendors()?;
      info!("{} vendors", vendors.len());
      print_json(&vendors)?;
    }
    ListCommand::Regions => {
      let vendors = client.vendors_and_regions()?;
      info!("{} vendors", vendors.len());
      print_json(&vendors)?;
    }
  }
  Ok(())
}
