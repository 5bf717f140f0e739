//! End-to-end flow: mutations go through the store, subscribers react.

#[path = "../support/mod.rs"]
mod support;

mod adapters;

use adapters::{Panel, PendingWrites};
use context_store::{
    CollectionChannel, CollectionEvent, ContextChannel, ContextStore, ContextValue,
    ContextValueCell, EventBus, IdentityCollection, ObservableCollection, ObservableContext,
    StatisticsCounter,
};
use support::{at, dashboard_schema, record, sink, Record};

fn dashboard() -> ObservableContext {
    let store = ContextStore::defaults(&dashboard_schema(), at(1_000));
    ObservableContext::new(store, EventBus::new())
}

#[test]
fn subscribers_see_each_changed_field() {
    let mut context = dashboard();
    let writes = PendingWrites::default();
    let panel = Panel::default();
    writes.attach(context.bus());
    panel.attach(context.bus());

    let updates = vec![
        (
            "currency".to_string(),
            ContextValueCell::new("currency", ContextValue::from("USD"), at(2_000)),
        ),
        (
            "refreshSeconds".to_string(),
            ContextValueCell::new("refreshSeconds", ContextValue::Int(5), at(2_000)),
        ),
    ];
    context.apply_field_update(updates, at(2_000)).unwrap();

    let mut fields = writes.fields();
    fields.sort();
    assert_eq!(fields, vec!["currency", "refreshSeconds"]);
    assert_eq!(panel.renders(), 2);
}

#[test]
fn readers_keep_their_snapshot() {
    let mut context = dashboard();
    let before = context.snapshot();

    context.toggle_field("minusEightPlus10", None).unwrap();
    context.toggle_field("showWeekends", None).unwrap();

    assert!(before.bool("minusEightPlus10").unwrap());
    assert!(!before.bool("showWeekends").unwrap());
    assert!(!context.store().bool("minusEightPlus10").unwrap());
    assert!(context.store().bool("showWeekends").unwrap());
    assert!(context.store().updated() > before.updated());
}

#[test]
fn unsubscribed_panel_stops_rendering() {
    let mut context = dashboard();
    let panel = Panel::default();
    let id = panel.attach(context.bus());

    context.set_field("zoom", 1.25, None).unwrap();
    assert!(context.bus().off(&ContextChannel::FieldChanged, id));
    context.set_field("zoom", 1.5, None).unwrap();

    assert_eq!(panel.renders(), 1);
    assert_eq!(context.statistics().successes(), 2);
}

#[test]
fn rejected_update_leaves_store_and_subscribers_alone() {
    let mut context = dashboard();
    let panel = Panel::default();
    panel.attach(context.bus());
    let before = context.snapshot();

    assert!(context.set_field("currency", false, None).is_err());
    assert!(context.set_field("unknown", 1, None).is_err());

    assert_eq!(context.store(), &before);
    assert_eq!(panel.renders(), 0);
    assert_eq!(context.statistics().failures(), 2);
}

#[test]
fn collection_events_follow_mutations() {
    let bus: EventBus<CollectionChannel, CollectionEvent<String>> = EventBus::new();
    let (added, on_added) = sink::<CollectionEvent<String>>();
    let (removed, on_removed) = sink::<CollectionEvent<String>>();
    bus.on(CollectionChannel::Added, on_added);
    bus.on(CollectionChannel::Removed, on_removed);

    let seed: IdentityCollection<Record> =
        IdentityCollection::from_vec(vec![record("1"), record("2"), record("3")])
            .with_statistics(StatisticsCounter::new());
    let mut records = ObservableCollection::new(seed, bus);

    records.add(record("4"), Some(1));
    records.remove(&record("2"));
    records.remove(&record("nope"));

    assert_eq!(
        *added.lock().unwrap(),
        vec![CollectionEvent::Added {
            id: "4".to_string(),
            index: 1
        }]
    );
    assert_eq!(
        *removed.lock().unwrap(),
        vec![CollectionEvent::Removed {
            id: "2".to_string()
        }]
    );
    let statistics = records.collection().statistics().unwrap();
    assert_eq!(statistics.total_processed(), 3);
    assert_eq!(statistics.deleted_count(), 2);
    assert!(statistics.message_string().starts_with("Processed 3"));
}
