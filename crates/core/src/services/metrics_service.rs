use std::collections::HashMap;

use crate::errors::CoreError;
use crate::math::{round_half_up, PROBABILITY_EPSILON};
use crate::models::analytics::{AllocationSlice, ConvictionSlice, UpsideRow};
use crate::models::asset::{normalize_symbol, Asset, Conviction, TargetCase};
use crate::models::catalog::AssetCatalog;
use crate::models::dca::DcaWeek;
use crate::models::market::{MarketSignal, Signal, SignalCounts};
use crate::models::scenario::Scenario;

/// Derived analytics over the catalog and the static strategy tables.
///
/// Pure business logic: no state, no I/O. Everything is recomputed on each
/// call, which is cheap for a handful of assets. Malformed input is rejected
/// with an error instead of leaking NaN or infinity into the view.
pub struct MetricsService;

impl MetricsService {
    pub fn new() -> Self {
        Self
    }

    /// Percentage move from the current price to `target`, rounded half-up.
    pub fn upside_percent(&self, asset: &Asset, target: f64) -> Result<i64, CoreError> {
        if !asset.price.is_finite() || asset.price < 0.0 {
            return Err(CoreError::ValidationError(format!(
                "upside for {}: price {} is not a non-negative number",
                asset.symbol, asset.price
            )));
        }
        if asset.price == 0.0 {
            return Err(CoreError::DivisionByZero(format!(
                "upside for {}: price is zero",
                asset.symbol
            )));
        }
        if !target.is_finite() {
            return Err(CoreError::ValidationError(format!(
                "upside for {}: target {target} is not a finite number",
                asset.symbol
            )));
        }
        round_half_up((target - asset.price) / asset.price * 100.0)
    }

    /// Upside for one of the asset's own targets.
    pub fn upside_for_case(&self, asset: &Asset, case: TargetCase) -> Result<i64, CoreError> {
        self.upside_percent(asset, asset.target(case))
    }

    /// Bear/base/bull upside for every asset. Values that cannot be computed
    /// are left as `None` so a single bad asset does not blank the table.
    pub fn upside_table(&self, catalog: &AssetCatalog) -> Vec<UpsideRow> {
        catalog
            .assets()
            .iter()
            .map(|asset| {
                let pick = |case: TargetCase| match self.upside_for_case(asset, case) {
                    Ok(v) => Some(v),
                    Err(e) => {
                        tracing::warn!(symbol = %asset.symbol, %case, "upside unavailable: {e}");
                        None
                    }
                };
                UpsideRow {
                    symbol: asset.symbol.clone(),
                    bear: pick(TargetCase::Bear),
                    base: pick(TargetCase::Base),
                    bull: pick(TargetCase::Bull),
                }
            })
            .collect()
    }

    /// Σ probability × portfolio value. The weights must already form a full
    /// distribution; they are never normalized here.
    pub fn weighted_expected_value(&self, scenarios: &[Scenario]) -> Result<f64, CoreError> {
        Self::check_distribution(scenarios)?;
        for s in scenarios {
            if !s.portfolio_value.is_finite() {
                return Err(CoreError::ValidationError(format!(
                    "scenario '{}' has a non-finite portfolio value",
                    s.name
                )));
            }
        }
        Ok(scenarios.iter().map(|s| s.probability * s.portfolio_value).sum())
    }

    /// Expected return relative to `total_investment`, whole percent.
    pub fn expected_return_pct(
        &self,
        scenarios: &[Scenario],
        total_investment: f64,
    ) -> Result<i64, CoreError> {
        if total_investment == 0.0 {
            return Err(CoreError::DivisionByZero(
                "expected return: total investment is zero".into(),
            ));
        }
        let ev = self.weighted_expected_value(scenarios)?;
        round_half_up((ev - total_investment) / total_investment * 100.0)
    }

    /// Gain (or loss, if negative) of the named scenario over the investment.
    pub fn scenario_gain(
        &self,
        scenarios: &[Scenario],
        name: &str,
        total_investment: f64,
    ) -> Result<f64, CoreError> {
        let scenario = scenarios
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| CoreError::ValidationError(format!("no scenario named '{name}'")))?;
        Ok(scenario.portfolio_value - total_investment)
    }

    /// Loss in the worst scenario, zero if no scenario loses money.
    pub fn worst_case_loss(
        &self,
        scenarios: &[Scenario],
        total_investment: f64,
    ) -> Result<f64, CoreError> {
        let worst = scenarios
            .iter()
            .map(|s| s.portfolio_value)
            .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |a| a.min(v))))
            .ok_or_else(|| CoreError::ValidationError("scenario table is empty".into()))?;
        Ok((total_investment - worst).max(0.0))
    }

    /// Running total of the weekly amounts, starting with a zero for "Start".
    pub fn cumulative_schedule(&self, weekly_amounts: &[f64]) -> Result<Vec<f64>, CoreError> {
        let mut out = Vec::with_capacity(weekly_amounts.len() + 1);
        let mut running = 0.0;
        out.push(running);
        for (i, amount) in weekly_amounts.iter().enumerate() {
            if !amount.is_finite() || *amount < 0.0 {
                return Err(CoreError::ValidationError(format!(
                    "weekly amount #{} must be a non-negative number (got {amount})",
                    i + 1
                )));
            }
            running += amount;
            out.push(running);
        }
        Ok(out)
    }

    /// Total planned purchases per symbol across the whole schedule.
    pub fn dca_totals_by_asset(&self, schedule: &[DcaWeek]) -> HashMap<String, f64> {
        let mut totals = HashMap::new();
        for week in schedule {
            for purchase in &week.purchases {
                let key = normalize_symbol(&purchase.symbol);
                *totals.entry(key).or_insert(0.0) += purchase.amount;
            }
        }
        totals
    }

    /// Mean ATH drop across `assets`, rounded to the nearest integer.
    pub fn average_ath_drop(&self, assets: &[Asset]) -> Result<i64, CoreError> {
        let drops = assets
            .iter()
            .map(Asset::ath_drop)
            .collect::<Result<Vec<_>, _>>()?;
        self.average_percent(&drops)
    }

    /// Mean of whole-percent values, rounded to the nearest integer.
    pub fn average_percent(&self, values: &[i64]) -> Result<i64, CoreError> {
        if values.is_empty() {
            return Err(CoreError::ValidationError("cannot average an empty list".into()));
        }
        let sum: i64 = values.iter().sum();
        round_half_up(sum as f64 / values.len() as f64)
    }

    /// Allocation chart data, in catalog order.
    pub fn allocation_breakdown(&self, catalog: &AssetCatalog) -> Vec<AllocationSlice> {
        catalog
            .assets()
            .iter()
            .map(|a| AllocationSlice {
                symbol: a.symbol.clone(),
                allocation_pct: a.allocation,
                dollars: a.dollar_amount,
            })
            .collect()
    }

    /// Allocation summed per conviction tier, High first. Empty tiers are skipped.
    pub fn allocation_by_conviction(&self, catalog: &AssetCatalog) -> Vec<ConvictionSlice> {
        [Conviction::High, Conviction::Medium, Conviction::Low]
            .into_iter()
            .filter_map(|tier| {
                let members: Vec<&Asset> = catalog
                    .assets()
                    .iter()
                    .filter(|a| a.conviction == tier)
                    .collect();
                if members.is_empty() {
                    return None;
                }
                Some(ConvictionSlice {
                    conviction: tier,
                    allocation_pct: members.iter().map(|a| a.allocation).sum(),
                    dollars: members.iter().map(|a| a.dollar_amount).sum(),
                    asset_count: members.len(),
                })
            })
            .collect()
    }

    pub fn signal_counts(&self, signals: &[MarketSignal]) -> SignalCounts {
        signals.iter().fold(SignalCounts::default(), |mut acc, s| {
            match s.signal {
                Signal::Buy => acc.buy += 1,
                Signal::Neutral => acc.neutral += 1,
                Signal::Sell => acc.sell += 1,
            }
            acc
        })
    }

    // ── Internal ────────────────────────────────────────────────────

    fn check_distribution(scenarios: &[Scenario]) -> Result<(), CoreError> {
        let sum: f64 = scenarios.iter().map(|s| s.probability).sum();
        let weights_ok = scenarios
            .iter()
            .all(|s| s.probability.is_finite() && (0.0..=1.0).contains(&s.probability));
        if !weights_ok || !sum.is_finite() || (sum - 1.0).abs() > PROBABILITY_EPSILON {
            return Err(CoreError::InvalidProbabilityDistribution { sum });
        }
        Ok(())
    }
}

impl Default for MetricsService {
    fn default() -> Self {
        Self::new()
    }
}
