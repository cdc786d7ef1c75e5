use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::{debug, info, warn};

use crate::assets::ASSETS;
use crate::history::PriceHistory;
use crate::watch::flash::Direction;
use crate::watch::ticker::Tick;

pub trait Render {
    fn render_tick(&self, tick: &Tick, performance: &HashMap<&'static str, Decimal>);
    fn render_error(&self, message: &str);
    fn render_crown_change(&self, from: Option<&'static str>, to: &'static str);
    fn render_flash(&self, direction: Direction);
    fn render_history(&self, history: &PriceHistory);
    fn render_last_update(&self, at: DateTime<Utc>);
}

// More decimals for small prices, fewer for large ones.
fn format_price(price: Decimal) -> String {
    let decimals = if price < Decimal::ONE {
        4
    } else if price < Decimal::ONE_HUNDRED {
        3
    } else {
        2
    };
    price.round_dp(decimals).to_string()
}

pub struct LogRender;

impl Render for LogRender {
    fn render_tick(&self, tick: &Tick, performance: &HashMap<&'static str, Decimal>) {
        for asset in &ASSETS {
            if let Some(quote) = tick.quote(asset.id) {
                let since_load = performance
                    .get(asset.id)
                    .copied()
                    .unwrap_or_default()
                    .round_dp(2);
                info!(
                    "{}: ${} ({}% over 24h, {}% since load)",
                    asset.name,
                    format_price(quote.price),
                    quote.change_24h,
                    since_load,
                );
            }
        }
    }

    fn render_error(&self, message: &str) {
        warn!("Price fetch failed: {}", message);
    }

    fn render_crown_change(&self, from: Option<&'static str>, to: &'static str) {
        match from {
            Some(from) => info!("Crown moves from {} to {}", from, to),
            None => info!("Crown awarded to {}", to),
        }
    }

    fn render_flash(&self, direction: Direction) {
        match direction {
            Direction::Up => info!("Reference price up"),
            Direction::Down => info!("Reference price down"),
        }
    }

    fn render_history(&self, history: &PriceHistory) {
        for asset in &ASSETS {
            if let Some(series) = history.series(asset.id) {
                if let Some(latest) = series.last() {
                    debug!("{}: {} points, latest {}", asset.id, series.len(), latest);
                }
            }
        }
    }

    fn render_last_update(&self, at: DateTime<Utc>) {
        info!("Last update at {}", at.format("%H:%M:%S"));
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_format_price_scales_decimals() {
        assert_eq!(format_price(Decimal::new(123456, 3)), "123.46");
        assert_eq!(format_price(Decimal::new(654321, 4)), "65.432");
        assert_eq!(format_price(Decimal::new(87654, 5)), "0.8765");
    }
}
