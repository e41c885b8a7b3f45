use serde::{Deserialize, Serialize};

/// One named outcome of the portfolio, weighted by its probability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Display name (e.g., "Bear", "Base")
    pub name: String,

    /// Portfolio-level return assumed by this scenario, in percent
    pub return_pct: f64,

    /// Resulting portfolio value in USD
    pub portfolio_value: f64,

    /// Probability weight in [0, 1]; the weights of a table sum to 1
    pub probability: f64,
}

impl Scenario {
    pub fn new(
        name: impl Into<String>,
        return_pct: f64,
        portfolio_value: f64,
        probability: f64,
    ) -> Self {
        Self {
            name: name.into(),
            return_pct,
            portfolio_value,
            probability,
        }
    }
}
