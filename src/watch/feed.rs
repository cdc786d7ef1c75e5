use chrono::Utc;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::assets::ASSETS;
use crate::watch::ticker::{Tick, TickerPayload};

pub const BASE_INTERVAL: Duration = Duration::from_secs(60);
const SECOND_INTERVAL: Duration = Duration::from_secs(120);
const CEILING_INTERVAL: Duration = Duration::from_secs(300);

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("api returned {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("malformed payload: {0}")]
    Payload(#[from] serde_json::Error),
}

pub struct PriceFeed {
    client: Client,
    url: String,
    symbols: String,
}

impl PriceFeed {
    pub fn new(client: Client, api_url: &str) -> Self {
        let symbols: Vec<&str> = ASSETS.iter().map(|asset| asset.symbol).collect();
        Self {
            client,
            url: format!("{}/api/v3/ticker/24hr", api_url),
            symbols: serde_json::to_string(&symbols).expect("Always works"),
        }
    }

    // One batched request for all tracked assets. Transport failures,
    // non-2xx statuses and unrecognizable payloads all classify as a
    // FetchError; the backoff policy treats them alike.
    pub async fn fetch_once(&self) -> Result<Tick, FetchError> {
        debug!("Fetching prices from {}", self.url);
        let response = self
            .client
            .get(&self.url)
            .query(&[("symbols", self.symbols.as_str())])
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status { status, body });
        }
        let payload: TickerPayload = serde_json::from_slice(&response.bytes().await?)?;
        Ok(Tick::normalize(payload, Utc::now()))
    }
}

// Refresh cadence: 60s while healthy, stretched to 120s on the second
// consecutive failure and capped at 300s from the third onwards. Any
// success snaps back to the base interval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Backoff {
    consecutive_failures: u32,
    interval: Duration,
}

impl Backoff {
    pub fn new() -> Self {
        Self {
            consecutive_failures: 0,
            interval: BASE_INTERVAL,
        }
    }

    pub fn record_success(&mut self) {
        self.consecutive_failures = 0;
        self.interval = BASE_INTERVAL;
    }

    pub fn record_failure(&mut self) {
        self.consecutive_failures += 1;
        self.interval = match self.consecutive_failures {
            1 => BASE_INTERVAL,
            2 => SECOND_INTERVAL,
            _ => CEILING_INTERVAL,
        };
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Self::new()
    }
}
