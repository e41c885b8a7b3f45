use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Signal {
    Buy,
    Sell,
    Neutral,
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Signal::Buy => write!(f, "Buy"),
            Signal::Sell => write!(f, "Sell"),
            Signal::Neutral => write!(f, "Neutral"),
        }
    }
}

/// A market-context indicator with its qualitative reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSignal {
    pub metric: String,
    pub value: String,
    pub signal: Signal,
}

impl MarketSignal {
    pub fn new(metric: impl Into<String>, value: impl Into<String>, signal: Signal) -> Self {
        Self {
            metric: metric.into(),
            value: value.into(),
            signal,
        }
    }
}

/// How many indicators point each way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalCounts {
    pub buy: usize,
    pub neutral: usize,
    pub sell: usize,
}
