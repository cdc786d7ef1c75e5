use anyhow::Result;
use reqwest::Client;
use std::fs::File;

mod klines;
mod window;
pub use klines::*;
pub use window::*;

use crate::assets::ASSETS;

pub async fn download_data(api_url: &str, out_file: File) -> Result<()> {
    let client = Client::new();
    let history = fetch_history(&client, api_url, &ASSETS).await;
    serde_json::to_writer(out_file, &history)?;
    Ok(())
}
