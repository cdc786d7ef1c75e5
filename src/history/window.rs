use rust_decimal::Decimal;

use crate::history::HistoryData;

#[derive(Debug)]
pub struct PriceHistory {
    series: HistoryData,
}

impl PriceHistory {
    pub fn new(series: HistoryData) -> Self {
        Self { series }
    }

    // Fixed-length window: drop the oldest point, append the newest. An
    // asset whose seed fetch failed has an empty series and is never rolled.
    pub fn roll(&mut self, id: &str, price: Decimal) {
        if let Some(series) = self.series.get_mut(id) {
            if !series.is_empty() {
                series.remove(0);
                series.push(price);
            }
        }
    }

    pub fn series(&self, id: &str) -> Option<&[Decimal]> {
        self.series.get(id).map(|series| series.as_slice())
    }
}
