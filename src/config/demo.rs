/// A market the default scan walks through: (symbol, exchange, screener)
pub struct MarketResources {
    pub markets: &'static [(&'static str, &'static str, &'static str)],
}

pub struct DemoConfig {
    pub resources: MarketResources,
}

pub const DEMO: DemoConfig = DemoConfig {
    resources: MarketResources {
        markets: &[
            ("XRPUSDT", "BINANCE", "crypto"),
            ("QQQ", "NASDAQ", "america"),
        ],
    },
};
