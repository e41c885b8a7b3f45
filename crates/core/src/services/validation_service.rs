use std::collections::HashSet;

use crate::errors::CoreError;
use crate::math::DOLLAR_EPSILON;
use crate::models::action::ActionItem;
use crate::models::catalog::AssetCatalog;
use crate::models::dca::DcaWeek;
use crate::services::metrics_service::MetricsService;

/// Startup checks for the tables that hang off the catalog.
///
/// The catalog validates itself on construction; this service checks that the
/// DCA schedule and the action plan agree with it. Any failure here is fatal:
/// the dashboard refuses to start rather than show inconsistent figures.
pub struct ValidationService {
    metrics: MetricsService,
}

impl ValidationService {
    pub fn new() -> Self {
        Self {
            metrics: MetricsService::new(),
        }
    }

    /// Every purchase must name a catalog asset, weeks must add up to the total
    /// investment and each asset's purchases must add up to its dollar amount.
    /// An empty schedule is accepted (the plan simply has no DCA tab).
    pub fn validate_dca_schedule(
        &self,
        catalog: &AssetCatalog,
        schedule: &[DcaWeek],
    ) -> Result<(), CoreError> {
        if schedule.is_empty() {
            return Ok(());
        }

        for week in schedule {
            for purchase in &week.purchases {
                catalog.get(&purchase.symbol)?;
                if !purchase.amount.is_finite() || purchase.amount <= 0.0 {
                    return Err(CoreError::MalformedCatalog(format!(
                        "{}: purchase of {} must be a positive amount (got {})",
                        week.label, purchase.symbol, purchase.amount
                    )));
                }
            }
        }

        for pair in schedule.windows(2) {
            if pair[1].start_date <= pair[0].start_date {
                return Err(CoreError::MalformedCatalog(format!(
                    "{} does not start after {}",
                    pair[1].label, pair[0].label
                )));
            }
        }

        let deployed: f64 = schedule.iter().map(DcaWeek::amount).sum();
        if (deployed - catalog.total_investment()).abs() > DOLLAR_EPSILON {
            return Err(CoreError::MalformedCatalog(format!(
                "DCA schedule deploys {deployed} but the total investment is {}",
                catalog.total_investment()
            )));
        }

        let totals = self.metrics.dca_totals_by_asset(schedule);
        for asset in catalog.assets() {
            let planned = totals.get(&asset.symbol).copied().unwrap_or(0.0);
            if (planned - asset.dollar_amount).abs() > DOLLAR_EPSILON {
                return Err(CoreError::MalformedAsset {
                    symbol: asset.symbol.clone(),
                    reason: format!(
                        "DCA schedule buys {planned} but the position is {}",
                        asset.dollar_amount
                    ),
                });
            }
        }

        Ok(())
    }

    /// Task ids must be non-empty and unique.
    pub fn validate_action_items(&self, items: &[ActionItem]) -> Result<(), CoreError> {
        let mut seen = HashSet::new();
        for item in items {
            if item.id.trim().is_empty() {
                return Err(CoreError::ValidationError(format!(
                    "action item '{}' has an empty id",
                    item.task
                )));
            }
            if !seen.insert(item.id.as_str()) {
                return Err(CoreError::ValidationError(format!(
                    "duplicate action item id '{}'",
                    item.id
                )));
            }
        }
        Ok(())
    }
}

impl Default for ValidationService {
    fn default() -> Self {
        Self::new()
    }
}
