use std::collections::HashSet;

use serde::Serialize;

use super::asset::{normalize_symbol, Asset};
use crate::errors::CoreError;
use crate::math::ALLOCATION_EPSILON;

/// Default ceiling for a single position, in percent of the portfolio.
pub const DEFAULT_MAX_POSITION_PCT: f64 = 50.0;

/// The validated, read-only list of assets plus the total investment amount.
///
/// Construction is the only place invariants are checked; once built, the
/// catalog cannot be mutated, so every reader sees a consistent set of figures.
#[derive(Debug, Clone, Serialize)]
pub struct AssetCatalog {
    total_investment: f64,
    assets: Vec<Asset>,
}

impl AssetCatalog {
    /// Build a catalog, rejecting it if any asset or catalog-level invariant fails.
    ///
    /// Symbols are stored trimmed and uppercased, whatever form they were
    /// loaded in.
    pub fn new(
        total_investment: f64,
        mut assets: Vec<Asset>,
        max_position_pct: f64,
    ) -> Result<Self, CoreError> {
        if !total_investment.is_finite() || total_investment <= 0.0 {
            return Err(CoreError::MalformedCatalog(format!(
                "total investment must be positive (got {total_investment})"
            )));
        }
        if assets.is_empty() {
            return Err(CoreError::MalformedCatalog("catalog has no assets".into()));
        }

        for asset in &mut assets {
            asset.symbol = normalize_symbol(&asset.symbol);
        }

        let mut seen = HashSet::new();
        for asset in &assets {
            asset.validate(total_investment)?;
            if !seen.insert(asset.symbol.as_str()) {
                return Err(CoreError::MalformedCatalog(format!(
                    "duplicate symbol {}",
                    asset.symbol
                )));
            }
            if asset.allocation > max_position_pct + ALLOCATION_EPSILON {
                return Err(CoreError::MalformedAsset {
                    symbol: asset.symbol.clone(),
                    reason: format!(
                        "allocation {}% exceeds the {}% position ceiling",
                        asset.allocation, max_position_pct
                    ),
                });
            }
        }

        let allocation_sum: f64 = assets.iter().map(|a| a.allocation).sum();
        if (allocation_sum - 100.0).abs() > ALLOCATION_EPSILON {
            return Err(CoreError::MalformedCatalog(format!(
                "allocations must sum to 100 (got {allocation_sum})"
            )));
        }

        Ok(Self {
            total_investment,
            assets,
        })
    }

    /// Assets in display order.
    #[must_use]
    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    #[must_use]
    pub fn total_investment(&self) -> f64 {
        self.total_investment
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    /// Always false for a successfully built catalog.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Look up an asset by symbol (case-insensitive).
    pub fn get(&self, symbol: &str) -> Result<&Asset, CoreError> {
        let wanted = normalize_symbol(symbol);
        self.assets
            .iter()
            .find(|a| a.symbol == wanted)
            .ok_or_else(|| CoreError::UnknownSymbol(symbol.to_string()))
    }

    #[must_use]
    pub fn contains(&self, symbol: &str) -> bool {
        self.get(symbol).is_ok()
    }

    /// Symbols in display order.
    #[must_use]
    pub fn symbols(&self) -> Vec<&str> {
        self.assets.iter().map(|a| a.symbol.as_str()).collect()
    }
}
