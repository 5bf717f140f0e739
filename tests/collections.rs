mod support;

use context_store::{Identified, IdentityCollection, RemovalCounting, StatisticsCounter, StoreConfig};
use proptest::prelude::*;
use support::{record, Record, TradeFacet};

fn seeded() -> IdentityCollection<Record> {
    IdentityCollection::from_vec(vec![record("1"), record("2"), record("3")])
        .with_statistics(StatisticsCounter::new())
}

#[test]
fn add_then_remove_scenario() {
    let mut collection = seeded();
    let second = collection.as_slice()[1].clone();

    collection.add(record("4"), None);
    assert_eq!(collection.len(), 4);
    {
        let statistics = collection.statistics().unwrap();
        assert_eq!(statistics.total_processed(), 1);
        assert_eq!(statistics.successes(), 1);
    }

    assert!(collection.remove(&second));
    assert_eq!(collection.len(), 3);
    let statistics = collection.statistics().unwrap();
    assert_eq!(statistics.total_processed(), 2);
    assert_eq!(statistics.deleted_count(), 1);
    assert!(collection.find_by_id(&"2".to_string()).is_none());
}

#[test]
fn derive_uses_field_named_id() {
    let record = record("abc");
    assert_eq!(Identified::id(&record), "abc");
}

#[test]
fn derive_uses_tagged_field() {
    let mut facets: IdentityCollection<TradeFacet> = IdentityCollection::new();
    facets.add(
        TradeFacet {
            facet_ref: 41,
            label: "price".into(),
        },
        None,
    );
    facets.add(
        TradeFacet {
            facet_ref: 42,
            label: "qty".into(),
        },
        Some(0),
    );

    assert_eq!(facets.position_of(&42), Some(0));
    assert_eq!(facets.find_by_id(&41).unwrap().label, "price");
}

#[test]
fn absent_seed_is_empty() {
    let collection: IdentityCollection<Record> = IdentityCollection::from_option(None);
    assert!(collection.is_empty());
    assert_eq!(collection.find_by_id(&"1".to_string()), None);
}

#[test]
fn configured_collection_counts_removals_only() {
    let config = StoreConfig::from_json(r#"{"removal_counting": "removals"}"#).unwrap();
    let mut collection = seeded().with_config(&config);
    assert_eq!(collection.removal_counting(), RemovalCounting::Removals);

    collection.remove(&record("missing"));
    collection.remove(&record("1"));
    assert_eq!(collection.statistics().unwrap().total_processed(), 1);
}

#[derive(Debug, Clone)]
enum Op {
    Add(u8, Option<usize>),
    Remove(u8),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u8..8, proptest::option::of(0usize..10)).prop_map(|(id, index)| Op::Add(id, index)),
        (0u8..8).prop_map(Op::Remove),
    ]
}

proptest! {
    #[test]
    fn total_processed_counts_every_call(ops in proptest::collection::vec(op(), 0..40)) {
        let mut collection: IdentityCollection<Record> =
            IdentityCollection::new().with_statistics(StatisticsCounter::new());
        for op in &ops {
            match op {
                Op::Add(id, index) => {
                    collection.add(record(&id.to_string()), *index);
                }
                Op::Remove(id) => {
                    collection.remove(&record(&id.to_string()));
                }
            }
        }
        prop_assert_eq!(
            collection.statistics().unwrap().total_processed(),
            ops.len() as u64
        );
    }

    #[test]
    fn find_returns_added_record(ids in proptest::collection::hash_set("[a-z]{1,6}", 1..20)) {
        let mut collection: IdentityCollection<Record> = IdentityCollection::new();
        for id in &ids {
            collection.add(record(id), None);
        }
        for id in &ids {
            prop_assert_eq!(collection.find_by_id(id), Some(&record(id)));
        }
    }
}
