#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Asset {
    pub symbol: &'static str,
    pub id: &'static str,
    pub name: &'static str,
}

// Declaration order is load-bearing: performance ties resolve to the
// earliest entry, and the first entry is the flash reference asset.
pub static ASSETS: [Asset; 5] = [
    Asset {
        symbol: "BTCUSDT",
        id: "btc",
        name: "BITCOIN",
    },
    Asset {
        symbol: "ETHUSDT",
        id: "eth",
        name: "ETHEREUM",
    },
    Asset {
        symbol: "SOLUSDT",
        id: "sol",
        name: "SOLANA",
    },
    Asset {
        symbol: "DOGEUSDT",
        id: "doge",
        name: "DOGECOIN",
    },
    Asset {
        symbol: "BNBUSDT",
        id: "bnb",
        name: "BINANCE COIN",
    },
];

pub fn reference() -> &'static Asset {
    &ASSETS[0]
}

pub fn find(symbol: &str) -> Option<&'static Asset> {
    ASSETS.iter().find(|asset| asset.symbol == symbol)
}
