//! End-to-end trade-up scenarios.
//!
//! Drives the public engine entry point and the catalog runner with
//! hand-built catalogs whose expected opportunities are known exactly.

use rust_decimal_macros::dec;

use tradeup::catalog::file::{parse_snapshot, FileCatalog};
use tradeup::catalog::{CatalogSource, DEFAULT_EXCLUDED_WEAPONS};
use tradeup::compute_trade_up_opportunities;
use tradeup::engine::scanner::CatalogScanner;
use tradeup::strategy::ladder::next_tier;
use tradeup::strategy::TradeUpScanner;
use tradeup::types::{PriceEntry, PriceVariant};

use crate::mock_catalog::{item, price, MockCatalog};

use tradeup::types::WearGrade::{
    BattleScarred as BS, FactoryNew as FN, FieldTested as FT, MinimalWear as MW,
};

#[test]
fn test_single_collection_two_tiers() {
    let items = vec![
        item("c1", "Consumer Grade", &["Alpha"], vec![price(FN, dec!(1.00))]),
        item("i1", "Industrial Grade", &["Alpha"], vec![price(FN, dec!(15.00))]),
        item("i2", "Industrial Grade", &["Alpha"], vec![price(FN, dec!(8.00))]),
    ];

    let opps = compute_trade_up_opportunities(&items);
    assert_eq!(opps.len(), 1);
    let o = &opps[0];
    assert_eq!(o.collection_name, "Alpha");
    assert_eq!(o.wear_grade, FN);
    assert_eq!(o.lower_rarity, "Consumer Grade");
    assert_eq!(o.higher_rarity, "Industrial Grade");
    assert_eq!(o.cheapest_lower_item.id, "c1");
    assert_eq!(o.unit_price, dec!(1));
    assert_eq!(o.bundle_cost, dec!(10));
    assert_eq!(o.profitable_outcome_count, 1);
    assert_eq!(o.total_higher_tier_item_count, 2);
    assert_eq!(o.hit_probability_percent, dec!(50));
    assert_eq!(o.expected_profit, dec!(2.5));
    assert_eq!(o.representative_higher_item.id, "i1");
    assert_eq!(o.representative_price, dec!(15));
    assert_eq!(o.profit, dec!(5));
}

#[test]
fn test_wear_fallback_counts_as_profitable() {
    let items = vec![
        item("in", "Industrial Grade", &["Alpha"], vec![price(FN, dec!(1))]),
        item("out", "Mil-Spec", &["Alpha"], vec![price(MW, dec!(20))]),
    ];

    let opps = compute_trade_up_opportunities(&items);
    assert_eq!(opps.len(), 1);
    let o = &opps[0];
    assert_eq!(o.wear_grade, FN);
    assert_eq!(o.bundle_cost, dec!(10));
    assert_eq!(o.representative_price, dec!(20));
    assert_eq!(o.representative_wear, MW);
    assert!(o.used_wear_fallback());
    assert_eq!(o.expected_profit, dec!(10));
}

#[test]
fn test_no_profit_does_not_stop_other_combinations() {
    let items = vec![
        // FN: bundle 10, outputs 4 and 6 → nothing.
        // FT: bundle 1, outputs 4 and 6 → profitable.
        item("in", "Restricted", &["Alpha"], vec![price(FN, dec!(1)), price(FT, dec!(0.1))]),
        item("o1", "Classified", &["Alpha"], vec![price(FN, dec!(4)), price(FT, dec!(4))]),
        item("o2", "Classified", &["Alpha"], vec![price(FN, dec!(6)), price(FT, dec!(6))]),
        // A later tier pair in the same collection still gets evaluated.
        item("c1", "Classified", &["Alpha"], vec![price(BS, dec!(0.5))]),
        item("cv", "Covert", &["Alpha"], vec![price(BS, dec!(9))]),
    ];

    let opps = compute_trade_up_opportunities(&items);
    assert!(opps.iter().all(|o| o.wear_grade != FN));
    assert!(opps.iter().any(|o| o.wear_grade == FT && o.lower_rarity == "Restricted"));
    assert!(opps.iter().any(|o| o.wear_grade == BS && o.lower_rarity == "Classified"));

    // c1 is Classified too: it joins the outcome pool and falls back to a
    // BS price below the bundle cost.
    let ft = opps.iter().find(|o| o.wear_grade == FT).unwrap();
    assert_eq!(ft.profitable_outcome_count, 2);
    assert_eq!(ft.total_higher_tier_item_count, 3);
    assert_eq!(ft.expected_profit, dec!(8) / dec!(3));
}

#[test]
fn test_mil_spec_aliases_share_one_rung() {
    assert_eq!(next_tier("Mil-Spec"), Some("Restricted"));
    assert_eq!(next_tier("Mil-Spec Grade"), Some("Restricted"));

    let items = vec![
        item("ms", "Mil-Spec", &["Alpha"], vec![price(FT, dec!(0.5))]),
        item("msg", "Mil-Spec Grade", &["Alpha"], vec![price(FT, dec!(0.4))]),
        item("r1", "Restricted", &["Alpha"], vec![price(FT, dec!(7))]),
    ];

    let opps = compute_trade_up_opportunities(&items);
    assert_eq!(opps.len(), 2);
    for o in &opps {
        assert_eq!(o.higher_rarity, "Restricted");
        assert_ne!(o.lower_rarity, "Restricted");
    }
    // Neither alias ever targets the other.
    assert!(opps
        .iter()
        .all(|o| !(o.higher_rarity.starts_with("Mil-Spec"))));
}

#[test]
fn test_multi_collection_item() {
    // "Collection A" is listed twice on purpose.
    let shared = item(
        "shared",
        "Restricted",
        &["Collection A", "Collection B", "Collection A"],
        vec![price(MW, dec!(2))],
    );
    let items = vec![
        shared,
        item("a_out", "Classified", &["Collection A"], vec![price(MW, dec!(30))]),
        item("b_out1", "Classified", &["Collection B"], vec![price(MW, dec!(25))]),
        item("b_out2", "Classified", &["Collection B"], vec![price(MW, dec!(5))]),
    ];

    let opps = compute_trade_up_opportunities(&items);
    assert_eq!(opps.len(), 2);

    let a = opps.iter().find(|o| o.collection_name == "Collection A").unwrap();
    let b = opps.iter().find(|o| o.collection_name == "Collection B").unwrap();
    assert_eq!(a.cheapest_lower_item.id, "shared");
    assert_eq!(b.cheapest_lower_item.id, "shared");
    assert_eq!(a.bundle_cost, dec!(20));
    assert_eq!(a.expected_profit, dec!(10));
    assert_eq!(b.total_higher_tier_item_count, 2);
    assert_eq!(b.expected_profit, dec!(2.5));
}

#[test]
fn test_multi_tagged_output_not_double_counted() {
    let items = vec![
        item("in", "Restricted", &["A"], vec![price(FN, dec!(1))]),
        item("out", "Classified", &["A", "A"], vec![price(FN, dec!(30))]),
    ];
    let opps = compute_trade_up_opportunities(&items);
    assert_eq!(opps[0].total_higher_tier_item_count, 1);
    assert_eq!(opps[0].expected_profit, dec!(20));
}

#[test]
fn test_defensive_catalog_shapes() {
    let items = vec![
        // No prices, no tags.
        item("bare", "Restricted", &[], Vec::new()),
        // Unknown rarity.
        item("odd", "Contraband", &["A"], vec![price(FN, dec!(1))]),
        // Disabled, zero, and StatTrak-only prices.
        item(
            "in",
            "Restricted",
            &["A"],
            vec![
                PriceEntry { enabled: false, ..price(FN, dec!(0.5)) },
                price(FN, dec!(0)),
                PriceEntry { variant: PriceVariant::Stattrak, ..price(FN, dec!(0.2)) },
            ],
        ),
        item("out", "Classified", &["A"], vec![price(FN, dec!(50))]),
    ];
    assert!(compute_trade_up_opportunities(&items).is_empty());
    assert!(compute_trade_up_opportunities(&[]).is_empty());
}

#[tokio::test]
async fn test_runner_with_mock_catalog() {
    let catalog = MockCatalog::with_items(
        "mock",
        vec![
            item("in", "Classified", &["A"], vec![price(FT, dec!(3))]),
            item("out", "Covert", &["A"], vec![price(FT, dec!(40))]),
        ],
    );
    let scanner = CatalogScanner::new(Box::new(catalog), TradeUpScanner::default(), Vec::new());

    let report = scanner.run().await.unwrap();
    assert_eq!(report.source, "mock");
    assert_eq!(report.opportunities.len(), 1);
    assert_eq!(report.opportunities[0].expected_profit, dec!(10));
}

#[tokio::test]
async fn test_mock_catalog_fetch_and_errors() {
    let catalog = MockCatalog::with_items(
        "mock",
        vec![item("a", "Covert", &["A"], vec![price(FN, dec!(1))])],
    );
    assert_eq!(catalog.fetch_items().await.unwrap().len(), 1);
    assert_eq!(catalog.name(), "mock");

    catalog.set_error("simulated backend outage");
    assert!(catalog.fetch_items().await.is_err());
    catalog.clear_error();
    assert!(catalog.fetch_items().await.is_ok());
    assert_eq!(catalog.fetch_count(), 3);
}

#[tokio::test]
async fn test_runner_reports_source_failure() {
    let catalog = MockCatalog::with_items("mock", Vec::new());
    catalog.set_error("simulated backend outage");
    let scanner = CatalogScanner::new(Box::new(catalog), TradeUpScanner::default(), Vec::new());

    let err = scanner.run().await.unwrap_err();
    assert!(format!("{err:#}").contains("simulated backend outage"));
}

#[test]
fn test_extreme_snapshot_prices_do_not_abort_scan() {
    // Both outputs parse fine, but their combined margin exceeds the
    // Decimal range; only that contract is dropped.
    let raw = r#"[
        {"id": 1, "rarity": "Restricted", "collectionTags": ["Huge"],
         "priceEntries": [{"wearGrade": "FN", "price": 1}]},
        {"id": 2, "rarity": "Classified", "collectionTags": ["Huge"],
         "priceEntries": [{"wearGrade": "FN", "price": 50000000000000000000000000000}]},
        {"id": 3, "rarity": "Classified", "collectionTags": ["Huge"],
         "priceEntries": [{"wearGrade": "FN", "price": 50000000000000000000000000000}]},
        {"id": 4, "rarity": "Restricted", "collectionTags": ["Sane"],
         "priceEntries": [{"wearGrade": "FN", "price": 1}]},
        {"id": 5, "rarity": "Classified", "collectionTags": ["Sane"],
         "priceEntries": [{"wearGrade": "FN", "price": 30}]}
    ]"#;
    let items = parse_snapshot(raw).unwrap();
    assert_eq!(items.len(), 5);

    let opps = compute_trade_up_opportunities(&items);
    assert_eq!(opps.len(), 1);
    assert_eq!(opps[0].collection_name, "Sane");
    assert_eq!(opps[0].expected_profit, dec!(20));
}

#[tokio::test]
async fn test_sample_catalog_file() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/data/catalog_sample.json");
    let excluded: Vec<String> = DEFAULT_EXCLUDED_WEAPONS.iter().map(|s| s.to_string()).collect();
    let scanner = CatalogScanner::new(
        Box::new(FileCatalog::new(path)),
        TradeUpScanner::default(),
        excluded,
    );

    let report = scanner.run().await.unwrap();
    assert_eq!(report.items_scanned, 10);
    assert_eq!(report.items_excluded, 1);
    // Dust 2, Mirage, Other
    assert_eq!(report.collections, 3);
    assert_eq!(report.opportunities.len(), 6);

    let best = &report.opportunities[0];
    assert_eq!(best.collection_name, "The Mirage Collection");
    assert_eq!(best.wear_grade, FT);
    assert_eq!(best.lower_rarity, "Restricted");
    assert_eq!(best.expected_profit, dec!(19));

    let evs: Vec<_> = report.opportunities.iter().map(|o| o.expected_profit).collect();
    assert_eq!(evs, vec![dec!(19), dec!(5), dec!(0.55), dec!(0.30), dec!(0.25), dec!(0.10)]);
}
