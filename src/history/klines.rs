use anyhow::Result;
use futures::future::join_all;
use reqwest::Client;
use rust_decimal::Decimal;
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, error};

use crate::assets::Asset;

pub type HistoryData = HashMap<&'static str, Vec<Decimal>>;

// One hourly close per point, 24 points per asset.
const INTERVAL: &str = "1h";
const LIMIT: &str = "24";

fn close_price(row: &[Value]) -> Result<Decimal> {
    let close = row
        .get(4)
        .and_then(Value::as_str)
        .ok_or_else(|| anyhow::anyhow!("kline row has no close price"))?;
    Ok(close.parse()?)
}

async fn fetch_asset_klines(
    client: &Client,
    api_url: &str,
    asset: &'static Asset,
) -> Result<Vec<Decimal>> {
    let rows: Vec<Vec<Value>> = client
        .get(&format!("{}/api/v3/klines", api_url))
        .query(&[
            ("symbol", asset.symbol),
            ("interval", INTERVAL),
            ("limit", LIMIT),
        ])
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    rows.iter().map(|row| close_price(row)).collect()
}

#[tracing::instrument(skip(client, assets))]
pub async fn fetch_history(
    client: &Client,
    api_url: &str,
    assets: &'static [Asset],
) -> HistoryData {
    debug!("Downloading 24h price history");
    let futs = assets
        .iter()
        .map(|asset| async move { (asset.id, fetch_asset_klines(client, api_url, asset).await) });
    join_all(futs)
        .await
        .into_iter()
        .map(|(id, res)| match res {
            Ok(closes) => (id, closes),
            Err(e) => {
                error!("Failed to download history for {}. Error: {}", id, e);
                (id, vec![])
            }
        })
        .collect()
}
