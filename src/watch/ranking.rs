use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::info;

use crate::assets::Asset;
use crate::watch::ticker::Tick;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrownUpdate {
    Retained(Option<&'static str>),
    Transferred {
        from: Option<&'static str>,
        to: &'static str,
    },
}

pub struct Ranking {
    assets: &'static [Asset],
    baseline: HashMap<&'static str, Decimal>,
    performance: HashMap<&'static str, Decimal>,
    crown: Option<&'static str>,
}

impl Ranking {
    pub fn new(assets: &'static [Asset]) -> Self {
        Self {
            assets,
            baseline: HashMap::new(),
            performance: HashMap::new(),
            crown: None,
        }
    }

    pub fn has_baseline(&self) -> bool {
        !self.baseline.is_empty()
    }

    pub fn performance(&self) -> &HashMap<&'static str, Decimal> {
        &self.performance
    }

    pub fn on_tick(&mut self, tick: &Tick) -> CrownUpdate {
        if self.has_baseline() {
            self.update_performance(tick)
        } else {
            self.capture_baseline(tick)
        }
    }

    // First successful tick: every quoted price becomes the permanent
    // reference point, and the initial crown goes to the largest 24h change.
    fn capture_baseline(&mut self, tick: &Tick) -> CrownUpdate {
        let mut best: Option<(&'static str, Decimal)> = None;
        for asset in self.assets {
            if let Some(quote) = tick.quote(asset.id) {
                self.baseline.insert(asset.id, quote.price);
                self.performance.insert(asset.id, Decimal::ZERO);
                match best {
                    Some((_, top)) if quote.change_24h <= top => {}
                    _ => best = Some((asset.id, quote.change_24h)),
                }
            }
        }
        match best {
            Some((id, change)) => {
                info!("Initial crown to {} ({}% over 24h)", id, change);
                self.crown = Some(id);
                CrownUpdate::Transferred { from: None, to: id }
            }
            None => CrownUpdate::Retained(None),
        }
    }

    fn update_performance(&mut self, tick: &Tick) -> CrownUpdate {
        for asset in self.assets {
            if let (Some(quote), Some(base)) = (tick.quote(asset.id), self.baseline.get(asset.id))
            {
                let performance = (quote.price - base) / base * Decimal::ONE_HUNDRED;
                self.performance.insert(asset.id, performance);
            }
        }
        match self.best_performer() {
            Some(id) if self.crown != Some(id) => {
                let from = self.crown.replace(id);
                CrownUpdate::Transferred { from, to: id }
            }
            _ => CrownUpdate::Retained(self.crown),
        }
    }

    // Strict comparison in declaration order: ties keep the earliest asset.
    fn best_performer(&self) -> Option<&'static str> {
        let mut best: Option<(&'static str, Decimal)> = None;
        for asset in self.assets {
            if let Some(&performance) = self.performance.get(asset.id) {
                match best {
                    Some((_, top)) if performance <= top => {}
                    _ => best = Some((asset.id, performance)),
                }
            }
        }
        best.map(|(id, _)| id)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::assets::ASSETS;
    use crate::watch::ticker::Quote;
    use chrono::Utc;

    fn tick(quotes: &[(&'static str, i64, i64)]) -> Tick {
        let quotes = quotes
            .iter()
            .map(|&(id, price, change)| {
                (
                    id,
                    Quote {
                        price: Decimal::new(price, 0),
                        change_24h: Decimal::new(change, 0),
                    },
                )
            })
            .collect();
        Tick::with_quotes(Utc::now(), quotes)
    }

    #[test]
    fn test_initial_crown_by_24h_change() {
        let mut ranking = Ranking::new(&ASSETS);
        let update = ranking.on_tick(&tick(&[("btc", 100, 1), ("eth", 200, 5)]));
        assert_eq!(
            update,
            CrownUpdate::Transferred {
                from: None,
                to: "eth"
            }
        );
        assert_eq!(ranking.performance()["btc"], Decimal::ZERO);
        assert_eq!(ranking.performance()["eth"], Decimal::ZERO);
    }

    #[test]
    fn test_initial_tie_goes_to_declaration_order() {
        let mut ranking = Ranking::new(&ASSETS);
        let update = ranking.on_tick(&tick(&[("btc", 100, 2), ("eth", 200, 2)]));
        assert_eq!(
            update,
            CrownUpdate::Transferred {
                from: None,
                to: "btc"
            }
        );
    }

    #[test]
    fn test_crown_follows_performance_since_load() {
        let mut ranking = Ranking::new(&ASSETS);
        // eth leads on 24h change at load time...
        ranking.on_tick(&tick(&[("btc", 100, 1), ("eth", 200, 5)]));
        // ...but btc gains 10% since load against eth's 2%.
        let update = ranking.on_tick(&tick(&[("btc", 110, 1), ("eth", 204, 5)]));
        assert_eq!(
            update,
            CrownUpdate::Transferred {
                from: Some("eth"),
                to: "btc"
            }
        );
        assert_eq!(ranking.performance()["btc"], Decimal::new(10, 0));
        assert_eq!(ranking.performance()["eth"], Decimal::new(2, 0));
    }

    #[test]
    fn test_unchanged_crown_fires_no_event() {
        let mut ranking = Ranking::new(&ASSETS);
        ranking.on_tick(&tick(&[("btc", 100, 5), ("eth", 200, 1)]));
        let update = ranking.on_tick(&tick(&[("btc", 110, 5), ("eth", 204, 1)]));
        assert_eq!(update, CrownUpdate::Retained(Some("btc")));
        let update = ranking.on_tick(&tick(&[("btc", 110, 5), ("eth", 204, 1)]));
        assert_eq!(update, CrownUpdate::Retained(Some("btc")));
    }

    #[test]
    fn test_equal_performance_never_unseats_earlier_incumbent() {
        let mut ranking = Ranking::new(&ASSETS);
        ranking.on_tick(&tick(&[("btc", 100, 5), ("eth", 200, 1)]));
        // Both up exactly 2%: the incumbent (declared first) keeps the crown.
        let update = ranking.on_tick(&tick(&[("btc", 102, 5), ("eth", 204, 1)]));
        assert_eq!(update, CrownUpdate::Retained(Some("btc")));
    }

    #[test]
    fn test_baseline_set_exactly_once() {
        let mut ranking = Ranking::new(&ASSETS);
        ranking.on_tick(&tick(&[("btc", 100, 0)]));
        ranking.on_tick(&tick(&[("btc", 200, 0)]));
        // Still measured against the first observation, not the second.
        let update = ranking.on_tick(&tick(&[("btc", 150, 0)]));
        assert_eq!(ranking.performance()["btc"], Decimal::new(50, 0));
        assert_eq!(update, CrownUpdate::Retained(Some("btc")));
    }

    #[test]
    fn test_empty_tick_does_not_claim_baseline() {
        let mut ranking = Ranking::new(&ASSETS);
        let update = ranking.on_tick(&tick(&[]));
        assert_eq!(update, CrownUpdate::Retained(None));
        assert!(!ranking.has_baseline());
        // The next populated tick is still the baseline tick.
        ranking.on_tick(&tick(&[("btc", 100, 1)]));
        ranking.on_tick(&tick(&[("btc", 110, 1)]));
        assert_eq!(ranking.performance()["btc"], Decimal::new(10, 0));
    }

    #[test]
    fn test_absent_asset_keeps_last_performance() {
        let mut ranking = Ranking::new(&ASSETS);
        ranking.on_tick(&tick(&[("btc", 100, 1), ("eth", 200, 0)]));
        ranking.on_tick(&tick(&[("btc", 110, 1), ("eth", 220, 0)]));
        // eth missing from this tick: its +10% entry stays on the board.
        ranking.on_tick(&tick(&[("btc", 105, 1)]));
        assert_eq!(ranking.performance()["eth"], Decimal::new(10, 0));
        assert_eq!(ranking.crown, Some("eth"));
    }
}
