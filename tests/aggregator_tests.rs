use everflow_charts::aggregator::{
    group_by_key, rank_all, rank_dimension, Dimension, DimensionGroup,
};
use everflow_charts::chart::ChartRequest;
use everflow_charts::parser::{normalize_rows, EntityId, FlatRecord, RawRow};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::path::Path;

fn raw_rows(value: serde_json::Value) -> Vec<RawRow> {
    serde_json::from_value(value).unwrap()
}

fn record(offer: (u64, &str), affiliate: (u64, &str), profit: f64) -> FlatRecord {
    FlatRecord {
        offer_id: Some(EntityId::from(offer.0)),
        offer_name: Some(offer.1.to_string()),
        affiliate_id: Some(EntityId::from(affiliate.0)),
        affiliate_name: Some(affiliate.1.to_string()),
        revenue: profit.max(0.0),
        payout: (-profit).max(0.0),
        profit,
        ..Default::default()
    }
}

fn names(groups: &[DimensionGroup]) -> Vec<String> {
    groups
        .iter()
        .map(|g| g.name.clone().unwrap_or_default())
        .collect()
}

#[test]
fn test_two_rows_same_offer_aggregate() {
    let rows = raw_rows(json!([
        {"columns": {"offer": {"id": 1, "name": "A"}}, "metrics": {"revenue": 100, "payout": 40}},
        {"columns": {"offer": {"id": 1, "name": "A"}}, "metrics": {"revenue": 10, "payout": 5}}
    ]));

    let records = normalize_rows(&rows).unwrap();
    let table = rank_dimension(&records, Dimension::Offer, 15);

    assert_eq!(table.groups.len(), 1);
    assert_eq!(table.groups[0].id, Some(EntityId::from(1u64)));
    assert_eq!(table.groups[0].name.as_deref(), Some("A"));
    assert_eq!(table.groups[0].profit, 65.0);
}

#[test]
fn test_profit_conservation_per_dimension() {
    let records = vec![
        record((1, "A"), (10, "X"), 12.5),
        record((2, "B"), (10, "X"), -3.25),
        record((1, "A"), (11, "Y"), 7.0),
        record((3, "C"), (12, "Z"), 0.5),
        FlatRecord {
            profit: 4.0,
            revenue: 4.0,
            ..Default::default()
        },
    ];
    let expected: f64 = records.iter().map(|r| r.profit).sum();

    for dimension in Dimension::ALL {
        let groups = group_by_key(&records, |r| dimension.key(r));
        let grouped: f64 = groups.iter().map(|g| g.profit).sum();
        let counted: usize = groups.iter().map(|g| g.records).sum();

        assert!((grouped - expected).abs() < 1e-9, "{} lost profit", dimension);
        assert_eq!(counted, records.len());
    }
}

#[test]
fn test_every_record_contributes_to_all_tables() {
    let records = vec![record((1, "A"), (10, "X"), 5.0), record((2, "B"), (11, "Y"), 3.0)];
    let tables = rank_all(&records, 15);

    assert_eq!(tables[0].total_groups, 2);
    assert_eq!(tables[1].total_groups, 2);
    // no advertiser data: both rows share the empty key
    assert_eq!(tables[2].total_groups, 1);
    assert_eq!(tables[2].groups[0].profit, 8.0);
}

#[test]
fn test_truncation_keeps_greatest_with_stable_ties() {
    // 20 groups; profits 0..=18 plus a duplicate 10 appearing later
    let mut records: Vec<FlatRecord> = (0..19)
        .map(|i| record((i, &format!("offer-{}", i)), (1, "X"), i as f64))
        .collect();
    records.push(record((99, "offer-99"), (1, "X"), 10.0));

    let table = rank_dimension(&records, Dimension::Offer, 15);

    assert_eq!(table.total_groups, 20);
    assert_eq!(table.groups.len(), 15);
    assert_eq!(table.groups[0].name.as_deref(), Some("offer-18"));

    let tie_first = table.groups.iter().position(|g| g.name.as_deref() == Some("offer-10"));
    let tie_second = table.groups.iter().position(|g| g.name.as_deref() == Some("offer-99"));
    assert_eq!(tie_second, tie_first.map(|i| i + 1));

    // 18..=11, both 10s, then 9..=5
    let smallest = table.groups.last().unwrap().profit;
    assert_eq!(smallest, 5.0);
}

#[test]
fn test_fewer_groups_than_limit() {
    let records = vec![record((1, "A"), (1, "X"), 1.0), record((2, "B"), (1, "X"), 2.0)];
    let table = rank_dimension(&records, Dimension::Offer, 15);
    assert_eq!(table.groups.len(), 2);
}

#[test]
fn test_tie_order_follows_first_appearance() {
    let forward = vec![
        record((1, "A"), (1, "X"), 10.0),
        record((2, "B"), (1, "X"), 10.0),
        record((3, "C"), (1, "X"), 20.0),
    ];
    let swapped = vec![
        record((2, "B"), (1, "X"), 10.0),
        record((1, "A"), (1, "X"), 10.0),
        record((3, "C"), (1, "X"), 20.0),
    ];

    let a = rank_dimension(&forward, Dimension::Offer, 15);
    let b = rank_dimension(&swapped, Dimension::Offer, 15);

    assert_eq!(names(&a.groups), vec!["C", "A", "B"]);
    assert_eq!(names(&b.groups), vec!["C", "B", "A"]);
}

#[test]
fn test_chart_draw_order_is_reverse_of_table() {
    let records = vec![record((1, "A"), (1, "X"), 65.0), record((2, "B"), (1, "X"), 30.0)];
    let table = rank_dimension(&records, Dimension::Offer, 15);
    assert_eq!(names(&table.groups), vec!["A", "B"]);

    let request = ChartRequest::from_table(&table, Path::new("out"));
    let drawn: Vec<(String, f64)> = request
        .bars
        .iter()
        .map(|b| (b.label.clone(), b.value))
        .collect();

    assert_eq!(
        drawn,
        vec![("B".to_string(), 30.0), ("A".to_string(), 65.0)]
    );
}
