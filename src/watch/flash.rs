use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

// Tracks the reference asset's price between ticks. Independent of the
// baseline math: the very first observation only records, equal prices
// signal nothing.
#[derive(Debug, Default)]
pub struct FlashTracker {
    last: Option<Decimal>,
}

impl FlashTracker {
    pub fn observe(&mut self, price: Decimal) -> Option<Direction> {
        let direction = match self.last {
            Some(last) if price > last => Some(Direction::Up),
            Some(last) if price < last => Some(Direction::Down),
            _ => None,
        };
        self.last = Some(price);
        direction
    }
}
