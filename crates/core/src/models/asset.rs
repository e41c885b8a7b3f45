use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::math::{round_half_up, DOLLAR_EPSILON};

/// Qualitative confidence label attached to an asset's thesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Conviction {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for Conviction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Conviction::High => write!(f, "High"),
            Conviction::Medium => write!(f, "Medium"),
            Conviction::Low => write!(f, "Low"),
        }
    }
}

/// Which of the three price targets to evaluate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetCase {
    Bear,
    Base,
    Bull,
}

impl std::fmt::Display for TargetCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TargetCase::Bear => write!(f, "Bear"),
            TargetCase::Base => write!(f, "Base"),
            TargetCase::Bull => write!(f, "Bull"),
        }
    }
}

/// Canonical form of a ticker symbol: trimmed and uppercased.
pub fn normalize_symbol(symbol: &str) -> String {
    symbol.trim().to_uppercase()
}

/// A single position in the strategy.
///
/// Assets are immutable once the catalog has been built. The ATH drop and the
/// upside figures are always derived from `price`, `ath` and the targets, so
/// they cannot drift away from the stored prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    /// Ticker symbol, uppercased (e.g., "BTC", "ETH")
    pub symbol: String,

    /// Human-readable name (e.g., "Bitcoin")
    pub name: String,

    /// Current spot price in USD
    pub price: f64,

    /// All-time-high price in USD
    pub ath: f64,

    /// Share of the total investment, in percent
    pub allocation: f64,

    /// Dollar amount allocated (`allocation / 100 * total_investment`)
    pub dollar_amount: f64,

    pub conviction: Conviction,

    /// 1 (lowest) to 10
    pub risk_level: u8,

    /// 1 (lowest) to 10
    pub reward_potential: u8,

    /// Category label (e.g., "Store of Value")
    pub category: String,

    pub bear_target: f64,
    pub base_target: f64,
    pub bull_target: f64,

    /// Headline metric shown next to the catalyst (e.g., "$68.2B TVL")
    #[serde(default)]
    pub key_metric: String,

    #[serde(default)]
    pub catalyst: String,

    #[serde(default)]
    pub rationale: String,
}

impl Asset {
    /// Create an asset with a price pair and empty allocation/targets.
    /// Use the `with_*` helpers to fill in the remaining fields.
    pub fn new(symbol: impl Into<String>, name: impl Into<String>, price: f64, ath: f64) -> Self {
        Self {
            symbol: normalize_symbol(&symbol.into()),
            name: name.into(),
            price,
            ath,
            allocation: 0.0,
            dollar_amount: 0.0,
            conviction: Conviction::Medium,
            risk_level: 5,
            reward_potential: 5,
            category: String::new(),
            bear_target: price,
            base_target: price,
            bull_target: price,
            key_metric: String::new(),
            catalyst: String::new(),
            rationale: String::new(),
        }
    }

    pub fn with_allocation(mut self, allocation: f64, dollar_amount: f64) -> Self {
        self.allocation = allocation;
        self.dollar_amount = dollar_amount;
        self
    }

    pub fn with_targets(mut self, bear: f64, base: f64, bull: f64) -> Self {
        self.bear_target = bear;
        self.base_target = base;
        self.bull_target = bull;
        self
    }

    pub fn with_profile(
        mut self,
        conviction: Conviction,
        risk_level: u8,
        reward_potential: u8,
    ) -> Self {
        self.conviction = conviction;
        self.risk_level = risk_level;
        self.reward_potential = reward_potential;
        self
    }

    pub fn with_thesis(
        mut self,
        category: impl Into<String>,
        key_metric: impl Into<String>,
        catalyst: impl Into<String>,
        rationale: impl Into<String>,
    ) -> Self {
        self.category = category.into();
        self.key_metric = key_metric.into();
        self.catalyst = catalyst.into();
        self.rationale = rationale.into();
        self
    }

    /// Price target for the given case.
    #[must_use]
    pub fn target(&self, case: TargetCase) -> f64 {
        match case {
            TargetCase::Bear => self.bear_target,
            TargetCase::Base => self.base_target,
            TargetCase::Bull => self.bull_target,
        }
    }

    /// Percentage decline from the all-time high, rounded half-up.
    pub fn ath_drop(&self) -> Result<i64, CoreError> {
        if !self.ath.is_finite() || !self.price.is_finite() {
            return Err(CoreError::ValidationError(format!(
                "ATH drop for {}: price and all-time high must be finite",
                self.symbol
            )));
        }
        if self.ath <= 0.0 {
            return Err(CoreError::DivisionByZero(format!(
                "ATH drop for {}: all-time high is not positive",
                self.symbol
            )));
        }
        round_half_up((self.ath - self.price) / self.ath * 100.0)
    }

    /// Check every per-asset invariant against the portfolio's total investment.
    pub fn validate(&self, total_investment: f64) -> Result<(), CoreError> {
        let fail = |reason: String| CoreError::MalformedAsset {
            symbol: self.symbol.clone(),
            reason,
        };

        if self.symbol.trim().is_empty() {
            return Err(fail("symbol must not be empty".into()));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(fail(format!("price must be a non-negative number (got {})", self.price)));
        }
        if !self.ath.is_finite() || self.ath <= 0.0 {
            return Err(fail(format!("all-time high must be positive (got {})", self.ath)));
        }
        if self.price > self.ath {
            return Err(fail(format!(
                "price {} is above the all-time high {}",
                self.price, self.ath
            )));
        }
        if !self.allocation.is_finite() || self.allocation <= 0.0 || self.allocation > 100.0 {
            return Err(fail(format!(
                "allocation must be in (0, 100] (got {})",
                self.allocation
            )));
        }

        let expected_dollars = self.allocation / 100.0 * total_investment;
        if (self.dollar_amount - expected_dollars).abs() > DOLLAR_EPSILON {
            return Err(fail(format!(
                "dollar amount {} does not match {}% of {} ({})",
                self.dollar_amount, self.allocation, total_investment, expected_dollars
            )));
        }

        for (case, target) in [
            (TargetCase::Bear, self.bear_target),
            (TargetCase::Base, self.base_target),
            (TargetCase::Bull, self.bull_target),
        ] {
            if !target.is_finite() || target < 0.0 {
                return Err(fail(format!(
                    "{case} target must be a non-negative number (got {target})"
                )));
            }
        }
        if self.bear_target > self.base_target || self.base_target > self.bull_target {
            return Err(fail(format!(
                "targets must satisfy bear <= base <= bull (got {} / {} / {})",
                self.bear_target, self.base_target, self.bull_target
            )));
        }

        if !(1..=10).contains(&self.risk_level) {
            return Err(fail(format!("risk level must be 1-10 (got {})", self.risk_level)));
        }
        if !(1..=10).contains(&self.reward_potential) {
            return Err(fail(format!(
                "reward potential must be 1-10 (got {})",
                self.reward_potential
            )));
        }

        Ok(())
    }
}
