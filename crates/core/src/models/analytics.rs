use serde::{Deserialize, Serialize};

use super::asset::Conviction;

/// Bear/base/bull upside of one asset, in whole percent.
///
/// A `None` value means the figure could not be computed (e.g. the asset's
/// price is zero) and must be rendered as "unavailable".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpsideRow {
    pub symbol: String,
    pub bear: Option<i64>,
    pub base: Option<i64>,
    pub bull: Option<i64>,
}

/// One slice of the allocation chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationSlice {
    pub symbol: String,

    /// Share of the portfolio, in percent
    pub allocation_pct: f64,

    /// Dollar amount behind the slice
    pub dollars: f64,
}

/// Allocation summed per conviction tier (High = core, the rest = satellite).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvictionSlice {
    pub conviction: Conviction,
    pub allocation_pct: f64,
    pub dollars: f64,
    pub asset_count: usize,
}

/// Headline numbers shown at the top of the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    /// Total amount to be invested, in USD
    pub total_investment: f64,

    pub asset_count: usize,

    /// Mean ATH drop across all assets, whole percent
    pub average_ath_drop: Option<i64>,

    /// Probability-weighted portfolio value computed from the scenario table
    pub expected_value: Option<f64>,

    /// (expected_value - total_investment) / total_investment * 100, whole percent
    pub expected_return_pct: Option<i64>,

    /// Expected value as published alongside the strategy, if configured
    pub published_expected_value: Option<f64>,

    /// expected_value - published_expected_value
    pub expected_value_discrepancy: Option<f64>,

    /// Base scenario value minus the total investment
    pub base_case_gain: Option<f64>,

    /// Total investment minus the lowest scenario value
    pub worst_case_loss: Option<f64>,
}

/// Completion of the action plan, overall or per category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistProgress {
    /// `None` for the overall figure, the category label otherwise
    pub category: Option<String>,
    pub completed: usize,
    pub total: usize,
}

impl ChecklistProgress {
    /// Completed share in [0, 1]; zero for an empty group.
    #[must_use]
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.completed as f64 / self.total as f64
        }
    }
}
