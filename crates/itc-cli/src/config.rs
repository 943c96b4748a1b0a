use anyhow::{Context, Result};
use itc_core::Config;

/// Reporter settings from the environment, with CLI overrides applied
pub fn load(account: Option<String>) -> Result<Config> {
  let mut config = Config::from_env()
    .context("set ITC_ACCESS_TOKEN, or ITC_USER_ID and ITC_PASSWORD")?;

  if let Some(account) = account.filter(|a| !a.is_empty()) {
    config = config.account(account);
  }

  Ok(config)
}
