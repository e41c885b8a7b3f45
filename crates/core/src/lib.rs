pub mod errors;
pub mod math;
pub mod models;
pub mod services;
pub mod state;

use models::{
    action::{ActionCategory, ActionItem},
    analytics::{AllocationSlice, ChecklistProgress, ConvictionSlice, DashboardSummary, UpsideRow},
    asset::{normalize_symbol, Asset, TargetCase},
    catalog::AssetCatalog,
    config::StrategyConfig,
    dca::{CumulativePoint, DcaWeek},
    market::MarketSignal,
    scenario::Scenario,
    snapshot::{AssetView, DashboardSnapshot, TaskView},
};
use services::{metrics_service::MetricsService, validation_service::ValidationService};
use state::{checklist::ChecklistState, selection::SelectionState};

use errors::CoreError;

/// Main entry point for the strategy dashboard core library.
///
/// Owns the validated catalog, the static strategy tables and the two pieces
/// of view state. All mutation goes through `select_asset` and `toggle_task`;
/// the presentation layer reads owned [`DashboardSnapshot`]s.
#[must_use]
pub struct StrategyDashboard {
    catalog: AssetCatalog,
    scenarios: Vec<Scenario>,
    dca_schedule: Vec<DcaWeek>,
    action_items: Vec<ActionItem>,
    market_signals: Vec<MarketSignal>,
    published_expected_value: Option<f64>,
    selection: SelectionState,
    checklist: ChecklistState,
    metrics: MetricsService,
}

impl std::fmt::Debug for StrategyDashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StrategyDashboard")
            .field("assets", &self.catalog.len())
            .field("total_investment", &self.catalog.total_investment())
            .field("expanded", &self.selection.selected())
            .field("completed", &self.checklist.count())
            .finish()
    }
}

impl StrategyDashboard {
    /// Build a dashboard from a strategy config.
    ///
    /// Fails if any load-time invariant is violated: the dashboard never
    /// starts with an inconsistent catalog.
    pub fn new(config: StrategyConfig) -> Result<Self, CoreError> {
        let StrategyConfig {
            total_investment,
            max_position_pct,
            assets,
            scenarios,
            mut dca_schedule,
            action_items,
            market_signals,
            default_expanded,
            published_expected_value,
        } = config;

        for purchase in dca_schedule.iter_mut().flat_map(|w| w.purchases.iter_mut()) {
            purchase.symbol = normalize_symbol(&purchase.symbol);
        }

        let catalog = AssetCatalog::new(total_investment, assets, max_position_pct)?;

        let validation = ValidationService::new();
        validation.validate_dca_schedule(&catalog, &dca_schedule)?;
        validation.validate_action_items(&action_items)?;

        let selection = match default_expanded {
            Some(symbol) => SelectionState::with_default(&catalog.get(&symbol)?.symbol),
            None => SelectionState::new(),
        };
        let checklist = ChecklistState::new(action_items.iter().map(|i| i.id.clone()))?;

        let dashboard = Self {
            catalog,
            scenarios,
            dca_schedule,
            action_items,
            market_signals,
            published_expected_value,
            selection,
            checklist,
            metrics: MetricsService::new(),
        };

        tracing::info!(
            assets = dashboard.catalog.len(),
            total_investment = dashboard.catalog.total_investment(),
            tasks = dashboard.checklist.total(),
            "strategy dashboard ready"
        );
        dashboard.warn_on_published_discrepancy();

        Ok(dashboard)
    }

    /// Dashboard over the built-in strategy.
    pub fn with_defaults() -> Result<Self, CoreError> {
        Self::new(StrategyConfig::default())
    }

    /// Build from a JSON strategy document.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        Self::new(StrategyConfig::from_json(json)?)
    }

    /// Build from a JSON strategy file (native only, not WASM).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Self, CoreError> {
        Self::new(StrategyConfig::load_from_file(path)?)
    }

    // ── Catalog ─────────────────────────────────────────────────────

    #[must_use]
    pub fn catalog(&self) -> &AssetCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn assets(&self) -> &[Asset] {
        self.catalog.assets()
    }

    /// Look up an asset by symbol (case-insensitive).
    pub fn get_asset(&self, symbol: &str) -> Result<&Asset, CoreError> {
        self.catalog.get(symbol)
    }

    #[must_use]
    pub fn total_investment(&self) -> f64 {
        self.catalog.total_investment()
    }

    #[must_use]
    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    #[must_use]
    pub fn dca_schedule(&self) -> &[DcaWeek] {
        &self.dca_schedule
    }

    #[must_use]
    pub fn action_items(&self) -> &[ActionItem] {
        &self.action_items
    }

    #[must_use]
    pub fn market_signals(&self) -> &[MarketSignal] {
        &self.market_signals
    }

    // ── Derived Metrics ─────────────────────────────────────────────

    /// Upside of one asset's bear/base/bull target, whole percent.
    pub fn upside(&self, symbol: &str, case: TargetCase) -> Result<i64, CoreError> {
        let asset = self.catalog.get(symbol)?;
        self.metrics.upside_for_case(asset, case)
    }

    #[must_use]
    pub fn upside_table(&self) -> Vec<UpsideRow> {
        self.metrics.upside_table(&self.catalog)
    }

    /// Probability-weighted portfolio value over the scenario table.
    pub fn expected_value(&self) -> Result<f64, CoreError> {
        self.metrics.weighted_expected_value(&self.scenarios)
    }

    /// Computed expected value minus the published one, if a published figure
    /// is configured.
    pub fn expected_value_discrepancy(&self) -> Result<Option<f64>, CoreError> {
        Ok(self.discrepancy_from(self.expected_value()?))
    }

    pub fn average_ath_drop(&self) -> Result<i64, CoreError> {
        self.metrics.average_ath_drop(self.catalog.assets())
    }

    /// Cumulative dollars deployed: "Start" at zero, then one point per week.
    pub fn cumulative_investment(&self) -> Result<Vec<CumulativePoint>, CoreError> {
        let weekly: Vec<f64> = self.dca_schedule.iter().map(DcaWeek::amount).collect();
        let running = self.metrics.cumulative_schedule(&weekly)?;
        let week_labels = self.dca_schedule.iter().map(|w| w.label.as_str());
        let labels = std::iter::once("Start").chain(week_labels);
        Ok(labels
            .zip(running)
            .map(|(label, invested)| CumulativePoint {
                label: label.to_string(),
                invested,
            })
            .collect())
    }

    #[must_use]
    pub fn allocation_breakdown(&self) -> Vec<AllocationSlice> {
        self.metrics.allocation_breakdown(&self.catalog)
    }

    #[must_use]
    pub fn allocation_by_conviction(&self) -> Vec<ConvictionSlice> {
        self.metrics.allocation_by_conviction(&self.catalog)
    }

    /// Headline figures. Any figure that cannot be computed is `None`.
    #[must_use]
    pub fn summary(&self) -> DashboardSummary {
        let total = self.catalog.total_investment();
        let expected_value = Self::available("expected value", self.expected_value());
        DashboardSummary {
            total_investment: total,
            asset_count: self.catalog.len(),
            average_ath_drop: Self::available("average ATH drop", self.average_ath_drop()),
            expected_value,
            expected_return_pct: Self::available(
                "expected return",
                self.metrics.expected_return_pct(&self.scenarios, total),
            ),
            published_expected_value: self.published_expected_value,
            expected_value_discrepancy: expected_value.and_then(|ev| self.discrepancy_from(ev)),
            base_case_gain: Self::available(
                "base case gain",
                self.metrics.scenario_gain(&self.scenarios, "Base", total),
            ),
            worst_case_loss: Self::available(
                "worst case loss",
                self.metrics.worst_case_loss(&self.scenarios, total),
            ),
        }
    }

    // ── Selection ───────────────────────────────────────────────────

    /// Toggle the expanded asset row. Unknown symbols are rejected and the
    /// selection is left unchanged.
    pub fn select_asset(&mut self, symbol: &str) -> Result<Option<&str>, CoreError> {
        let canonical = self.catalog.get(symbol)?.symbol.clone();
        let selected = self.selection.toggle(&canonical);
        tracing::debug!(symbol = %canonical, expanded = ?selected, "asset selection toggled");
        Ok(selected)
    }

    #[must_use]
    pub fn expanded_asset(&self) -> Option<&str> {
        self.selection.selected()
    }

    #[must_use]
    pub fn is_expanded(&self, symbol: &str) -> bool {
        self.selection.is_selected(symbol)
    }

    // ── Checklist ───────────────────────────────────────────────────

    /// Flip a task's completion flag. Returns the new flag.
    pub fn toggle_task(&mut self, id: &str) -> Result<bool, CoreError> {
        let done = self.checklist.toggle(id)?;
        tracing::debug!(
            task = id,
            done,
            completed = self.checklist.count(),
            total = self.checklist.total(),
            "task toggled"
        );
        Ok(done)
    }

    #[must_use]
    pub fn is_task_done(&self, id: &str) -> bool {
        self.checklist.is_done(id)
    }

    #[must_use]
    pub fn checklist(&self) -> &ChecklistState {
        &self.checklist
    }

    #[must_use]
    pub fn progress(&self) -> ChecklistProgress {
        ChecklistProgress {
            category: None,
            completed: self.checklist.count(),
            total: self.checklist.total(),
        }
    }

    /// Completion per action category, in first-appearance order.
    #[must_use]
    pub fn progress_by_category(&self) -> Vec<ChecklistProgress> {
        let mut order: Vec<ActionCategory> = Vec::new();
        for item in &self.action_items {
            if !order.contains(&item.category) {
                order.push(item.category);
            }
        }
        order
            .into_iter()
            .map(|category| {
                let items = self.action_items.iter().filter(|i| i.category == category);
                let (total, completed) = items.fold((0, 0), |(t, c), i| {
                    (t + 1, c + usize::from(self.checklist.is_done(&i.id)))
                });
                ChecklistProgress {
                    category: Some(category.label().to_string()),
                    completed,
                    total,
                }
            })
            .collect()
    }

    // ── Render Boundary ─────────────────────────────────────────────

    /// Owned copy of everything a render needs.
    #[must_use]
    pub fn snapshot(&self) -> DashboardSnapshot {
        let assets = self
            .catalog
            .assets()
            .iter()
            .map(|a| AssetView {
                asset: a.clone(),
                ath_drop: Self::available("ATH drop", a.ath_drop()),
                expanded: self.selection.is_selected(&a.symbol),
            })
            .collect();

        let tasks = self
            .action_items
            .iter()
            .map(|item| TaskView {
                item: item.clone(),
                category_label: item.category.label(),
                done: self.checklist.is_done(&item.id),
            })
            .collect();

        DashboardSnapshot {
            summary: self.summary(),
            assets,
            allocation: self.allocation_breakdown(),
            allocation_by_conviction: self.allocation_by_conviction(),
            upside: self.upside_table(),
            scenarios: self.scenarios.clone(),
            dca_schedule: self.dca_schedule.clone(),
            cumulative_investment: Self::available(
                "cumulative investment",
                self.cumulative_investment(),
            )
            .unwrap_or_default(),
            market_signals: self.market_signals.clone(),
            signal_counts: self.metrics.signal_counts(&self.market_signals),
            expanded_asset: self.selection.selected().map(str::to_string),
            tasks,
            progress: self.progress(),
            progress_by_category: self.progress_by_category(),
        }
    }

    /// Serialize the current snapshot as pretty JSON.
    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(&self.snapshot())
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize snapshot: {e}")))
    }

    // ── Internal ────────────────────────────────────────────────────

    /// Turn a per-value failure into the "unavailable" marker.
    fn available<T>(what: &str, result: Result<T, CoreError>) -> Option<T> {
        match result {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!("{what} unavailable: {e}");
                None
            }
        }
    }

    /// `computed` minus the published expected value, if one is configured.
    fn discrepancy_from(&self, computed: f64) -> Option<f64> {
        self.published_expected_value.map(|published| computed - published)
    }

    fn warn_on_published_discrepancy(&self) {
        let Ok(computed) = self.expected_value() else {
            return;
        };
        if let Some(diff) = self.discrepancy_from(computed) {
            if diff.abs() > f64::EPSILON {
                tracing::warn!(
                    computed,
                    published = ?self.published_expected_value,
                    discrepancy = diff,
                    "published expected value differs from the scenario table"
                );
            }
        }
    }
}
