use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::asset::normalize_symbol;

/// A planned buy of one asset during a DCA week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Purchase {
    pub symbol: String,
    pub amount: f64,
}

impl Purchase {
    pub fn new(symbol: impl Into<String>, amount: f64) -> Self {
        Self {
            symbol: normalize_symbol(&symbol.into()),
            amount,
        }
    }
}

/// One week of the dollar-cost-averaging plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DcaWeek {
    /// Display label (e.g., "Week 1")
    pub label: String,

    /// First day of the week's buying window
    pub start_date: NaiveDate,

    pub purchases: Vec<Purchase>,

    #[serde(default)]
    pub note: String,
}

impl DcaWeek {
    pub fn new(
        label: impl Into<String>,
        start_date: NaiveDate,
        purchases: Vec<Purchase>,
        note: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            start_date,
            purchases,
            note: note.into(),
        }
    }

    /// Total dollars deployed this week.
    #[must_use]
    pub fn amount(&self) -> f64 {
        self.purchases.iter().map(|p| p.amount).sum()
    }

    /// One-line summary of the purchases, e.g. "BTC $350, ETH $200".
    #[must_use]
    pub fn focus(&self) -> String {
        self.purchases
            .iter()
            .map(|p| format!("{} ${}", p.symbol, p.amount))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// One point of the cumulative-investment curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CumulativePoint {
    /// "Start", then each week's label
    pub label: String,
    pub invested: f64,
}
