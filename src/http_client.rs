use std::time::Duration;

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, REFERER, USER_AGENT};

const DEFAULT_TIMEOUT_SECS: u64 = 10;

static CLIENT: OnceCell<Client> = OnceCell::new();

/// Shared blocking client for stats.nba.com. The API rejects requests
/// without a browser-ish User-Agent and the x-nba-stats headers.
pub fn http_client() -> Result<&'static Client> {
    CLIENT.get_or_try_init(|| {
        let timeout = std::env::var("STATS_TIMEOUT_SECS")
            .ok()
            .and_then(|val| val.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS)
            .max(1);

        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(
                "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko)",
            ),
        );
        headers.insert(REFERER, HeaderValue::from_static("https://www.nba.com/"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert("x-nba-stats-origin", HeaderValue::from_static("stats"));
        headers.insert("x-nba-stats-token", HeaderValue::from_static("true"));

        Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(timeout))
            .build()
            .context("failed to build http client")
    })
}
