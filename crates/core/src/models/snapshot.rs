use serde::Serialize;

use super::action::ActionItem;
use super::analytics::{
    AllocationSlice, ChecklistProgress, ConvictionSlice, DashboardSummary, UpsideRow,
};
use super::asset::Asset;
use super::dca::{CumulativePoint, DcaWeek};
use super::market::{MarketSignal, SignalCounts};
use super::scenario::Scenario;

/// Everything the presentation layer needs for one render.
///
/// A snapshot is an owned copy: the view can hold on to it freely and can only
/// change the dashboard by sending intents back through `StrategyDashboard`.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub summary: DashboardSummary,
    pub assets: Vec<AssetView>,
    pub allocation: Vec<AllocationSlice>,
    pub allocation_by_conviction: Vec<ConvictionSlice>,
    pub upside: Vec<UpsideRow>,
    pub scenarios: Vec<Scenario>,
    pub dca_schedule: Vec<DcaWeek>,
    pub cumulative_investment: Vec<CumulativePoint>,
    pub market_signals: Vec<MarketSignal>,
    pub signal_counts: SignalCounts,
    pub expanded_asset: Option<String>,
    pub tasks: Vec<TaskView>,
    pub progress: ChecklistProgress,
    pub progress_by_category: Vec<ChecklistProgress>,
}

/// An asset row plus its view state.
#[derive(Debug, Clone, Serialize)]
pub struct AssetView {
    pub asset: Asset,
    pub ath_drop: Option<i64>,
    pub expanded: bool,
}

/// A checklist row plus its completion flag.
#[derive(Debug, Clone, Serialize)]
pub struct TaskView {
    pub item: ActionItem,
    pub category_label: &'static str,
    pub done: bool,
}
