use std::time::Duration;

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use reqwest::blocking::Client;

const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const USER_AGENT: &str = "futscout-terminal/0.1";

static CLIENT: OnceCell<Client> = OnceCell::new();

pub fn http_client() -> Result<&'static Client> {
    CLIENT.get_or_try_init(|| {
        let timeout = std::env::var("FUTSCOUT_TIMEOUT_SECS")
            .ok()
            .and_then(|val| val.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS)
            .clamp(1, 120);
        Client::builder()
            .timeout(Duration::from_secs(timeout))
            .user_agent(USER_AGENT)
            .build()
            .context("failed to build http client")
    })
}
