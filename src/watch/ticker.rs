use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;

use crate::assets;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quote {
    pub price: Decimal,
    pub change_24h: Decimal,
}

#[derive(Debug, Clone)]
pub struct Tick {
    pub at: DateTime<Utc>,
    quotes: HashMap<&'static str, Quote>,
}

#[derive(Debug, Deserialize)]
pub struct TickerEntry {
    pub symbol: String,
    #[serde(rename = "lastPrice", default)]
    pub last_price: Option<Decimal>,
    #[serde(rename = "priceChangePercent", default)]
    pub price_change_percent: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
pub struct QuoteEntry {
    pub price: Option<Decimal>,
    #[serde(default)]
    pub change: Option<Decimal>,
}

// The upstream either returns an array of ticker objects or a symbol-keyed
// map of quote objects. Both normalize into the same Tick.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum TickerPayload {
    Tickers(Vec<TickerEntry>),
    Quotes(HashMap<String, QuoteEntry>),
}

fn quote(price: Option<Decimal>, change: Option<Decimal>) -> Option<Quote> {
    let price = price.filter(|&price| price > Decimal::ZERO)?;
    Some(Quote {
        price,
        change_24h: change.unwrap_or_default(),
    })
}

impl Tick {
    pub(super) fn with_quotes(at: DateTime<Utc>, quotes: HashMap<&'static str, Quote>) -> Self {
        Self { at, quotes }
    }

    // Untracked symbols are ignored; tracked symbols with a missing or
    // non-positive price are skipped for this tick, not errored.
    pub fn normalize(payload: TickerPayload, at: DateTime<Utc>) -> Self {
        let mut quotes = HashMap::new();
        match payload {
            TickerPayload::Tickers(entries) => {
                for entry in entries {
                    if let Some(asset) = assets::find(&entry.symbol) {
                        if let Some(quote) = quote(entry.last_price, entry.price_change_percent) {
                            quotes.insert(asset.id, quote);
                        }
                    }
                }
            }
            TickerPayload::Quotes(entries) => {
                for (symbol, entry) in entries {
                    if let Some(asset) = assets::find(&symbol) {
                        if let Some(quote) = quote(entry.price, entry.change) {
                            quotes.insert(asset.id, quote);
                        }
                    }
                }
            }
        }
        Self::with_quotes(at, quotes)
    }

    pub fn quote(&self, id: &str) -> Option<&Quote> {
        self.quotes.get(id)
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}
