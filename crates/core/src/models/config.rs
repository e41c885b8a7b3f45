use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::action::{ActionCategory, ActionItem};
use super::asset::{Asset, Conviction};
use super::catalog::DEFAULT_MAX_POSITION_PCT;
use super::dca::{DcaWeek, Purchase};
use super::market::{MarketSignal, Signal};
use super::scenario::Scenario;
use crate::errors::CoreError;

/// Static strategy data, loaded once at startup and never mutated.
///
/// `Default` yields the built-in February 2026 strategy. Alternative
/// strategies can be supplied as JSON with the same shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyConfig {
    /// Total amount to invest, in USD
    pub total_investment: f64,

    /// Ceiling for any single position, in percent
    #[serde(default = "default_max_position_pct")]
    pub max_position_pct: f64,

    pub assets: Vec<Asset>,

    pub scenarios: Vec<Scenario>,

    #[serde(default)]
    pub dca_schedule: Vec<DcaWeek>,

    pub action_items: Vec<ActionItem>,

    #[serde(default)]
    pub market_signals: Vec<MarketSignal>,

    /// Asset row expanded when the dashboard opens
    #[serde(default)]
    pub default_expanded: Option<String>,

    /// Expected value quoted in the strategy write-up. Kept verbatim so the
    /// dashboard can show it next to the computed figure.
    #[serde(default)]
    pub published_expected_value: Option<f64>,
}

fn default_max_position_pct() -> f64 {
    DEFAULT_MAX_POSITION_PCT
}

impl StrategyConfig {
    /// Parse a strategy from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a strategy from a JSON file on disk (native only, not WASM).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Self, CoreError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize config: {e}")))
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            total_investment: 2000.0,
            max_position_pct: DEFAULT_MAX_POSITION_PCT,
            assets: default_assets(),
            scenarios: vec![
                Scenario::new("Bear", -30.0, 1400.0, 0.2),
                Scenario::new("Flat", 0.0, 2000.0, 0.0),
                Scenario::new("Base", 60.0, 3200.0, 0.5),
                Scenario::new("Bull", 150.0, 5000.0, 0.3),
            ],
            dca_schedule: default_dca_schedule(),
            action_items: default_action_items(),
            market_signals: default_market_signals(),
            default_expanded: Some("BTC".into()),
            published_expected_value: Some(3180.0),
        }
    }
}

fn default_assets() -> Vec<Asset> {
    vec![
        Asset::new("BTC", "Bitcoin", 62000.0, 126210.0)
            .with_allocation(50.0, 1000.0)
            .with_profile(Conviction::High, 3, 7)
            .with_targets(45000.0, 95000.0, 150000.0)
            .with_thesis(
                "Store of Value",
                "58-60% dominance",
                "Institutional adoption, ETF inflows, halving cycle",
                "The anchor. Post-crash entry with strong institutional backing. ETF flows remain \
                 positive despite the pullback. The halving cycle has historically preceded major \
                 rallies 12-18 months out.",
            ),
        Asset::new("ETH", "Ethereum", 2088.0, 4954.0)
            .with_allocation(25.0, 500.0)
            .with_profile(Conviction::High, 4, 8)
            .with_targets(1400.0, 3800.0, 5500.0)
            .with_thesis(
                "Smart Contract Platform",
                "$68.2B TVL",
                "L2 ecosystem growth, DeFi TVL recovery, Pectra upgrade",
                "DeFi backbone trading at a deep discount. The ETH/BTC ratio at multi-year lows \
                 creates strong relative value. Pectra and L2 maturation are near-term catalysts.",
            ),
        Asset::new("SOL", "Solana", 87.0, 293.0)
            .with_allocation(10.0, 200.0)
            .with_profile(Conviction::Medium, 7, 9)
            .with_targets(45.0, 135.0, 250.0)
            .with_thesis(
                "High-Performance L1",
                "$4.1B TVL",
                "Firedancer client, DePIN adoption, institutional interest",
                "Fast-growing ecosystem with real usage in payments, DePIN and consumer apps. \
                 Firedancer could dramatically improve reliability. High-beta position.",
            ),
        Asset::new("XRP", "XRP", 1.60, 3.84)
            .with_allocation(10.0, 200.0)
            .with_profile(Conviction::Medium, 5, 7)
            .with_targets(0.80, 2.80, 4.50)
            .with_thesis(
                "Payments & Settlement",
                "RLUSD $1.5B AUM",
                "SEC clarity, RLUSD stablecoin at $1.5B, institutional partnerships",
                "Regulatory clarity is a strong tailwind. RLUSD adoption shows institutional \
                 demand and the cross-border payment use case keeps growing.",
            ),
        Asset::new("ADA", "Cardano", 0.30, 3.08)
            .with_allocation(3.0, 60.0)
            .with_profile(Conviction::Low, 7, 9)
            .with_targets(0.12, 0.85, 2.00)
            .with_thesis(
                "Research-Driven L1",
                "$350M TVL",
                "Hydra scaling production-ready, Midnight privacy chain",
                "Deep discount from ATH creates asymmetric upside if execution improves. \
                 Moonshot allocation only.",
            ),
        Asset::new("AVAX", "Avalanche", 8.80, 146.0)
            .with_allocation(2.0, 40.0)
            .with_profile(Conviction::Low, 8, 9)
            .with_targets(4.00, 20.00, 45.00)
            .with_thesis(
                "Subnet Architecture",
                "$1.1B TVL",
                "RWA tokenization partnerships, subnet adoption",
                "Deepest discount in the basket. Subnets suit institutional and RWA use. Small \
                 speculative position for a potential 2-5x.",
            ),
    ]
}

fn default_dca_schedule() -> Vec<DcaWeek> {
    vec![
        DcaWeek::new(
            "Week 1",
            date(2026, 2, 13),
            vec![
                Purchase::new("BTC", 350.0),
                Purchase::new("ETH", 200.0),
                Purchase::new("SOL", 100.0),
                Purchase::new("XRP", 50.0),
            ],
            "Initial positions in highest-conviction assets",
        ),
        DcaWeek::new(
            "Week 2",
            date(2026, 2, 20),
            vec![
                Purchase::new("BTC", 250.0),
                Purchase::new("ETH", 150.0),
                Purchase::new("XRP", 100.0),
            ],
            "Add to core, start XRP position",
        ),
        DcaWeek::new(
            "Week 3",
            date(2026, 2, 27),
            vec![
                Purchase::new("BTC", 200.0),
                Purchase::new("ETH", 100.0),
                Purchase::new("ADA", 60.0),
                Purchase::new("AVAX", 40.0),
            ],
            "Fill remaining allocations",
        ),
        DcaWeek::new(
            "Week 4",
            date(2026, 3, 6),
            vec![
                Purchase::new("BTC", 200.0),
                Purchase::new("ETH", 50.0),
                Purchase::new("SOL", 100.0),
                Purchase::new("XRP", 50.0),
            ],
            "Final entries, complete strategy",
        ),
    ]
}

fn default_action_items() -> Vec<ActionItem> {
    use ActionCategory::*;
    vec![
        ActionItem::new(
            "a1",
            "Feb 13",
            "Execute Week 1 purchases ($700)",
            "BTC $350, ETH $200, SOL $100, XRP $50. Use limit orders 1-2% below spot.",
            Buy,
        ),
        ActionItem::new(
            "a2",
            "Feb 13",
            "Enable 2FA on exchange accounts",
            "Use an authenticator app, not SMS. Store backup codes securely.",
            Security,
        ),
        ActionItem::new(
            "a3",
            "Feb 14",
            "Set stop-loss alerts at -20% from entries",
            "Configure price alerts on the exchange or a tracking app.",
            Review,
        ),
        ActionItem::new(
            "a4",
            "Feb 20",
            "Execute Week 2 purchases ($500)",
            "BTC $250, ETH $150, XRP $100. Check for large moves before ordering.",
            Buy,
        ),
        ActionItem::new(
            "a5",
            "Feb 27",
            "Execute Week 3 purchases ($400)",
            "BTC $200, ETH $100, ADA $60, AVAX $40. Completes satellite allocations.",
            Buy,
        ),
        ActionItem::new(
            "a6",
            "Mar 6",
            "Execute Week 4 (final) purchases ($400)",
            "BTC $200, ETH $50, SOL $100, XRP $50. Full strategy deployed.",
            Buy,
        ),
        ActionItem::new(
            "a7",
            "Mar 7-14",
            "Transfer all holdings to hardware wallet",
            "Move funds off exchange. Store the seed phrase offline.",
            Security,
        ),
        ActionItem::new(
            "a8",
            "Mar 15",
            "Record all entry prices and amounts",
            "Log average entry, coins held and cost basis for tax purposes.",
            Review,
        ),
        ActionItem::new(
            "a9",
            "Monthly",
            "15-minute portfolio check-in",
            "Review total value and major news. No action unless a stop-loss triggers.",
            Review,
        ),
        ActionItem::new(
            "a10",
            "Quarterly",
            "Deep thesis review for each position",
            "Re-evaluate catalysts, on-chain metrics and macro. Adjust conviction if needed.",
            Review,
        ),
        ActionItem::new(
            "a11",
            "When 3x",
            "Take original investment off the table",
            "If an altcoin hits 3x, sell enough to recover cost basis.",
            Rebalance,
        ),
        ActionItem::new(
            "a12",
            "12-18mo",
            "Full portfolio review and exit strategy",
            "Decide whether to hold, take profits or reallocate.",
            Rebalance,
        ),
    ]
}

fn default_market_signals() -> Vec<MarketSignal> {
    vec![
        MarketSignal::new("Fear & Greed Index", "11 (Extreme Fear)", Signal::Buy),
        MarketSignal::new("BTC Dominance", "58-60%", Signal::Neutral),
        MarketSignal::new("Total Market Cap", "~$2.1T (down from $3.9T)", Signal::Buy),
        MarketSignal::new("ETH/BTC Ratio", "Multi-year low", Signal::Buy),
        MarketSignal::new("Spot ETF Flows", "Positive despite crash", Signal::Buy),
        MarketSignal::new("Stablecoin Supply", "$210B+ (near ATH)", Signal::Buy),
    ]
}
