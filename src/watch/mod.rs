use anyhow::Result;
use reqwest::Client;
use tokio::time::sleep;
use tracing::{debug, info};

mod display;
mod feed;
mod flash;
mod ranking;
mod ticker;
use crate::assets::{self, ASSETS};
use crate::history::{fetch_history, PriceHistory};
use display::{LogRender, Render};
use feed::{Backoff, PriceFeed};
use flash::FlashTracker;
use ranking::{CrownUpdate, Ranking};

pub async fn run(api_url: &str) -> Result<()> {
    info!("Starting crown-watch");
    let client = Client::new();
    let mut history = PriceHistory::new(fetch_history(&client, api_url, &ASSETS).await);
    let feed = PriceFeed::new(client, api_url);
    let mut ranking = Ranking::new(&ASSETS);
    let mut flash = FlashTracker::default();
    let mut backoff = Backoff::new();
    let render = LogRender;
    render.render_history(&history);

    // Single-shot scheduling: the next fetch is armed only after this
    // outcome is fully processed, so requests never overlap.
    loop {
        match feed.fetch_once().await {
            Ok(tick) => {
                if tick.is_empty() {
                    debug!("Tick carried no tracked assets");
                }
                let first_load = !ranking.has_baseline();
                backoff.record_success();
                let update = ranking.on_tick(&tick);
                render.render_tick(&tick, ranking.performance());
                if let CrownUpdate::Transferred { from, to } = update {
                    render.render_crown_change(from, to);
                }
                if let Some(quote) = tick.quote(assets::reference().id) {
                    if let Some(direction) = flash.observe(quote.price) {
                        render.render_flash(direction);
                    }
                }
                if !first_load {
                    for asset in &ASSETS {
                        if let Some(quote) = tick.quote(asset.id) {
                            history.roll(asset.id, quote.price);
                        }
                    }
                    render.render_history(&history);
                }
                render.render_last_update(tick.at);
            }
            Err(e) => {
                backoff.record_failure();
                render.render_error(&e.to_string());
            }
        }
        debug!(
            "Next fetch in {}s ({} consecutive failures)",
            backoff.interval().as_secs(),
            backoff.consecutive_failures()
        );
        tokio::select! {
            _ = sleep(backoff.interval()) => {}
            _ = tokio::signal::ctrl_c() => {
                info!("Shutting down");
                return Ok(());
            }
        }
    }
}
