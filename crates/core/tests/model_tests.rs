// ═══════════════════════════════════════════════════════════════════
// Model Tests — Asset, AssetCatalog, DcaWeek, ActionItem, StrategyConfig
// ═══════════════════════════════════════════════════════════════════

use chrono::NaiveDate;
use strategy_dashboard_core::errors::CoreError;
use strategy_dashboard_core::models::action::ActionCategory;
use strategy_dashboard_core::models::asset::{normalize_symbol, Asset, Conviction, TargetCase};
use strategy_dashboard_core::models::catalog::{AssetCatalog, DEFAULT_MAX_POSITION_PCT};
use strategy_dashboard_core::models::config::StrategyConfig;
use strategy_dashboard_core::models::dca::{DcaWeek, Purchase};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn btc() -> Asset {
    Asset::new("btc", "Bitcoin", 62000.0, 126210.0)
        .with_allocation(50.0, 1000.0)
        .with_profile(Conviction::High, 3, 7)
        .with_targets(45000.0, 95000.0, 150000.0)
}

fn eth() -> Asset {
    Asset::new("ETH", "Ethereum", 2088.0, 4954.0)
        .with_allocation(50.0, 1000.0)
        .with_profile(Conviction::High, 4, 8)
        .with_targets(1400.0, 3800.0, 5500.0)
}

/// Round-trip `asset` through JSON with its symbol replaced verbatim, the way
/// a hand-written strategy file would carry it (bypassing `Asset::new`).
fn from_json_with_symbol(asset: &Asset, symbol: &str) -> Asset {
    let mut value = serde_json::to_value(asset).unwrap();
    value["symbol"] = serde_json::Value::from(symbol);
    serde_json::from_value(value).unwrap()
}

// ═══════════════════════════════════════════════════════════════════
//  Asset
// ═══════════════════════════════════════════════════════════════════

mod asset {
    use super::*;

    #[test]
    fn new_uppercases_symbol() {
        assert_eq!(btc().symbol, "BTC");
    }

    #[test]
    fn conviction_display() {
        assert_eq!(Conviction::High.to_string(), "High");
        assert_eq!(Conviction::Medium.to_string(), "Medium");
        assert_eq!(Conviction::Low.to_string(), "Low");
    }

    #[test]
    fn target_by_case() {
        let a = btc();
        assert_eq!(a.target(TargetCase::Bear), 45000.0);
        assert_eq!(a.target(TargetCase::Base), 95000.0);
        assert_eq!(a.target(TargetCase::Bull), 150000.0);
    }

    #[test]
    fn ath_drop_is_derived_from_prices() {
        assert_eq!(btc().ath_drop().unwrap(), 51);
        assert_eq!(eth().ath_drop().unwrap(), 58);
    }

    #[test]
    fn ath_drop_at_ath_is_zero() {
        let a = Asset::new("X", "X", 10.0, 10.0);
        assert_eq!(a.ath_drop().unwrap(), 0);
    }

    #[test]
    fn ath_drop_zero_ath_is_division_error() {
        let a = Asset::new("X", "X", 0.0, 0.0);
        assert!(matches!(a.ath_drop(), Err(CoreError::DivisionByZero(_))));
    }

    #[test]
    fn ath_drop_nan_ath_is_rejected() {
        let a = Asset::new("X", "X", 10.0, f64::NAN);
        assert!(matches!(a.ath_drop(), Err(CoreError::ValidationError(_))));
    }

    #[test]
    fn ath_drop_nan_price_is_rejected() {
        let a = Asset::new("X", "X", f64::NAN, 10.0);
        assert!(matches!(a.ath_drop(), Err(CoreError::ValidationError(_))));
    }

    #[test]
    fn ath_drop_negative_ath_is_rejected() {
        let a = Asset::new("X", "X", 1.0, -10.0);
        assert!(a.ath_drop().is_err());
    }

    #[test]
    fn normalize_symbol_trims_and_uppercases() {
        assert_eq!(normalize_symbol(" btc "), "BTC");
        assert_eq!(normalize_symbol("Eth"), "ETH");
        assert_eq!(Asset::new(" sol ", "Solana", 1.0, 2.0).symbol, "SOL");
    }

    #[test]
    fn valid_asset_passes() {
        btc().validate(2000.0).unwrap();
    }

    #[test]
    fn zero_price_is_allowed_at_load() {
        let a = Asset::new("ZERO", "Zero", 0.0, 5.0)
            .with_allocation(10.0, 200.0)
            .with_targets(0.0, 1.0, 2.0);
        a.validate(2000.0).unwrap();
    }

    #[test]
    fn rejects_unordered_targets() {
        let a = btc().with_targets(100000.0, 95000.0, 150000.0);
        let err = a.validate(2000.0).unwrap_err();
        assert!(matches!(err, CoreError::MalformedAsset { ref symbol, .. } if symbol == "BTC"));
    }

    #[test]
    fn rejects_base_above_bull() {
        let a = btc().with_targets(45000.0, 200000.0, 150000.0);
        assert!(matches!(a.validate(2000.0), Err(CoreError::MalformedAsset { .. })));
    }

    #[test]
    fn rejects_dollar_amount_mismatch() {
        let a = btc().with_allocation(50.0, 900.0);
        assert!(matches!(a.validate(2000.0), Err(CoreError::MalformedAsset { .. })));
    }

    #[test]
    fn rejects_price_above_ath() {
        let a = Asset::new("X", "X", 11.0, 10.0).with_allocation(50.0, 1000.0);
        assert!(matches!(a.validate(2000.0), Err(CoreError::MalformedAsset { .. })));
    }

    #[test]
    fn rejects_negative_price() {
        let a = Asset::new("X", "X", -1.0, 10.0).with_allocation(50.0, 1000.0);
        assert!(matches!(a.validate(2000.0), Err(CoreError::MalformedAsset { .. })));
    }

    #[test]
    fn rejects_nan_target() {
        let a = btc().with_targets(f64::NAN, 95000.0, 150000.0);
        assert!(matches!(a.validate(2000.0), Err(CoreError::MalformedAsset { .. })));
    }

    #[test]
    fn rejects_risk_out_of_range() {
        let a = btc().with_profile(Conviction::High, 0, 7);
        assert!(matches!(a.validate(2000.0), Err(CoreError::MalformedAsset { .. })));
        let a = btc().with_profile(Conviction::High, 3, 11);
        assert!(matches!(a.validate(2000.0), Err(CoreError::MalformedAsset { .. })));
    }

    #[test]
    fn rejects_empty_symbol() {
        let a = Asset::new("  ", "Nothing", 1.0, 2.0).with_allocation(50.0, 1000.0);
        assert!(matches!(a.validate(2000.0), Err(CoreError::MalformedAsset { .. })));
    }

    #[test]
    fn serde_roundtrip_json() {
        let a = btc().with_thesis(
            "Store of Value",
            "58-60% dominance",
            "ETF inflows",
            "The anchor.",
        );
        let json = serde_json::to_string(&a).unwrap();
        let back: Asset = serde_json::from_str(&json).unwrap();
        assert_eq!(a, back);
    }

    #[test]
    fn deserialize_without_optional_text() {
        let json = r#"{
            "symbol": "BTC", "name": "Bitcoin", "price": 1.0, "ath": 2.0,
            "allocation": 100.0, "dollar_amount": 10.0, "conviction": "High",
            "risk_level": 3, "reward_potential": 7, "category": "SoV",
            "bear_target": 1.0, "base_target": 2.0, "bull_target": 3.0
        }"#;
        let a: Asset = serde_json::from_str(json).unwrap();
        assert!(a.catalyst.is_empty());
        assert!(a.rationale.is_empty());
        assert!(a.key_metric.is_empty());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  AssetCatalog
// ═══════════════════════════════════════════════════════════════════

mod catalog {
    use super::*;

    fn catalog() -> AssetCatalog {
        AssetCatalog::new(2000.0, vec![btc(), eth()], DEFAULT_MAX_POSITION_PCT).unwrap()
    }

    #[test]
    fn keeps_display_order() {
        assert_eq!(catalog().symbols(), vec!["BTC", "ETH"]);
    }

    #[test]
    fn exposes_total_investment() {
        assert_eq!(catalog().total_investment(), 2000.0);
        assert_eq!(catalog().len(), 2);
        assert!(!catalog().is_empty());
    }

    #[test]
    fn get_is_case_insensitive() {
        let c = catalog();
        assert_eq!(c.get("eth").unwrap().name, "Ethereum");
        assert_eq!(c.get(" Btc ").unwrap().name, "Bitcoin");
    }

    #[test]
    fn get_unknown_is_not_found() {
        let err = catalog().get("DOGE").unwrap_err();
        assert!(matches!(err, CoreError::UnknownSymbol(ref s) if s == "DOGE"));
        assert!(!catalog().contains("DOGE"));
    }

    #[test]
    fn rejects_allocation_sum_not_100() {
        let short = eth().with_allocation(40.0, 800.0);
        let err =
            AssetCatalog::new(2000.0, vec![btc(), short], DEFAULT_MAX_POSITION_PCT).unwrap_err();
        assert!(matches!(err, CoreError::MalformedCatalog(_)));
    }

    #[test]
    fn rejects_duplicate_symbols() {
        let err =
            AssetCatalog::new(2000.0, vec![btc(), btc()], DEFAULT_MAX_POSITION_PCT).unwrap_err();
        assert!(matches!(err, CoreError::MalformedCatalog(ref m) if m.contains("duplicate")));
    }

    #[test]
    fn deserialized_symbols_are_normalized() {
        let assets = vec![
            from_json_with_symbol(&btc(), "btc"),
            from_json_with_symbol(&eth(), " Eth "),
        ];
        assert_eq!(assets[0].symbol, "btc");

        let c = AssetCatalog::new(2000.0, assets, DEFAULT_MAX_POSITION_PCT).unwrap();
        assert_eq!(c.symbols(), vec!["BTC", "ETH"]);
        assert_eq!(c.get("btc").unwrap().name, "Bitcoin");
        assert_eq!(c.get("BTC").unwrap().name, "Bitcoin");
        assert_eq!(c.get("eth").unwrap().name, "Ethereum");
        assert!(c.contains("ETH"));
    }

    #[test]
    fn duplicates_are_detected_across_case_and_whitespace() {
        let lower = from_json_with_symbol(&btc(), "btc");
        let padded = from_json_with_symbol(&eth(), " BTC ");
        let err = AssetCatalog::new(2000.0, vec![lower, padded], DEFAULT_MAX_POSITION_PCT)
            .unwrap_err();
        assert!(matches!(err, CoreError::MalformedCatalog(ref m) if m.contains("duplicate")));
    }

    #[test]
    fn rejects_position_above_ceiling() {
        let big = btc().with_allocation(60.0, 1200.0);
        let small = eth().with_allocation(40.0, 800.0);
        let err =
            AssetCatalog::new(2000.0, vec![big, small], DEFAULT_MAX_POSITION_PCT).unwrap_err();
        assert!(matches!(err, CoreError::MalformedAsset { ref symbol, .. } if symbol == "BTC"));
    }

    #[test]
    fn custom_ceiling_allows_larger_position() {
        let big = btc().with_allocation(60.0, 1200.0);
        let small = eth().with_allocation(40.0, 800.0);
        AssetCatalog::new(2000.0, vec![big, small], 60.0).unwrap();
    }

    #[test]
    fn rejects_empty_catalog() {
        let err = AssetCatalog::new(2000.0, vec![], DEFAULT_MAX_POSITION_PCT).unwrap_err();
        assert!(matches!(err, CoreError::MalformedCatalog(_)));
    }

    #[test]
    fn rejects_non_positive_total() {
        let err = AssetCatalog::new(0.0, vec![btc(), eth()], DEFAULT_MAX_POSITION_PCT).unwrap_err();
        assert!(matches!(err, CoreError::MalformedCatalog(_)));
    }

    #[test]
    fn propagates_asset_errors() {
        let bad = eth().with_targets(5000.0, 3800.0, 5500.0);
        let err =
            AssetCatalog::new(2000.0, vec![btc(), bad], DEFAULT_MAX_POSITION_PCT).unwrap_err();
        assert!(matches!(err, CoreError::MalformedAsset { ref symbol, .. } if symbol == "ETH"));
    }
}

// ═══════════════════════════════════════════════════════════════════
//  DCA, Action items
// ═══════════════════════════════════════════════════════════════════

mod dca_week {
    use super::*;

    #[test]
    fn amount_sums_purchases() {
        let w = DcaWeek::new(
            "Week 1",
            d(2026, 2, 13),
            vec![Purchase::new("btc", 350.0), Purchase::new("ETH", 200.0)],
            "",
        );
        assert_eq!(w.amount(), 550.0);
        assert_eq!(w.purchases[0].symbol, "BTC");
    }

    #[test]
    fn focus_lists_purchases() {
        let w = DcaWeek::new(
            "Week 1",
            d(2026, 2, 13),
            vec![Purchase::new("BTC", 350.0), Purchase::new("ETH", 200.0)],
            "",
        );
        assert_eq!(w.focus(), "BTC $350, ETH $200");
    }

    #[test]
    fn empty_week_is_zero() {
        let w = DcaWeek::new("Week 0", d(2026, 1, 1), vec![], "");
        assert_eq!(w.amount(), 0.0);
        assert_eq!(w.focus(), "");
    }
}

mod action_category {
    use super::*;

    #[test]
    fn labels() {
        assert_eq!(ActionCategory::Buy.label(), "Purchase");
        assert_eq!(ActionCategory::Security.label(), "Security");
        assert_eq!(ActionCategory::Review.label(), "Review");
        assert_eq!(ActionCategory::Rebalance.label(), "Rebalance");
        assert_eq!(ActionCategory::Buy.to_string(), "Purchase");
    }
}

// ═══════════════════════════════════════════════════════════════════
//  StrategyConfig
// ═══════════════════════════════════════════════════════════════════

mod config {
    use super::*;

    #[test]
    fn default_targets_are_ordered() {
        for a in StrategyConfig::default().assets {
            assert!(a.bear_target <= a.base_target, "{}", a.symbol);
            assert!(a.base_target <= a.bull_target, "{}", a.symbol);
        }
    }

    #[test]
    fn default_allocations_sum_to_100() {
        let sum: f64 = StrategyConfig::default().assets.iter().map(|a| a.allocation).sum();
        assert!((sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn default_probabilities_sum_to_1() {
        let sum: f64 = StrategyConfig::default().scenarios.iter().map(|s| s.probability).sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn default_has_twelve_tasks_and_btc_expanded() {
        let c = StrategyConfig::default();
        assert_eq!(c.action_items.len(), 12);
        assert_eq!(c.default_expanded.as_deref(), Some("BTC"));
        assert_eq!(c.published_expected_value, Some(3180.0));
    }

    #[test]
    fn default_dca_weeks() {
        let c = StrategyConfig::default();
        let amounts: Vec<f64> = c.dca_schedule.iter().map(DcaWeek::amount).collect();
        assert_eq!(amounts, vec![700.0, 500.0, 400.0, 400.0]);
        assert_eq!(c.dca_schedule[0].start_date, d(2026, 2, 13));
        assert_eq!(c.dca_schedule[3].start_date, d(2026, 3, 6));
    }

    #[test]
    fn json_roundtrip() {
        let c = StrategyConfig::default();
        let json = c.to_json().unwrap();
        assert_eq!(StrategyConfig::from_json(&json).unwrap(), c);
    }

    #[test]
    fn optional_fields_default() {
        let json = r#"{
            "total_investment": 100.0,
            "assets": [],
            "scenarios": [],
            "action_items": []
        }"#;
        let c = StrategyConfig::from_json(json).unwrap();
        assert_eq!(c.max_position_pct, DEFAULT_MAX_POSITION_PCT);
        assert!(c.dca_schedule.is_empty());
        assert!(c.market_signals.is_empty());
        assert!(c.default_expanded.is_none());
        assert!(c.published_expected_value.is_none());
    }

    #[test]
    fn invalid_json_is_deserialization_error() {
        let err = StrategyConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, CoreError::Deserialization(_)));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("strategy.json");
        std::fs::write(&path, StrategyConfig::default().to_json().unwrap()).unwrap();
        let c = StrategyConfig::load_from_file(&path).unwrap();
        assert_eq!(c.assets.len(), 6);
    }

    #[test]
    fn load_from_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = StrategyConfig::load_from_file(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, CoreError::FileIO(_)));
    }
}
