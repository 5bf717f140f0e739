//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use context_store::{ContextSchema, Identified, Timestamp};

/// A dashboard configuration schema resembling the one the UI loads.
pub fn dashboard_schema() -> Arc<ContextSchema> {
    ContextSchema::builder("dashboard")
        .field("minusEightPlus10", true)
        .field("showWeekends", false)
        .field("refreshSeconds", 30)
        .field("currency", "EUR")
        .field("zoom", 1.0)
        .build()
        .unwrap()
}

#[derive(Debug, Clone, PartialEq, Identified)]
pub struct Record {
    pub id: String,
}

pub fn record(id: &str) -> Record {
    Record { id: id.to_string() }
}

#[derive(Debug, Clone, PartialEq, Identified)]
pub struct TradeFacet {
    #[identified(id)]
    pub facet_ref: u64,
    pub label: String,
}

pub fn at(millis: i64) -> Option<Timestamp> {
    Some(Timestamp::from_millis(millis))
}

/// Collects every payload a handler receives.
pub fn sink<T: Clone + Send + 'static>() -> (Arc<Mutex<Vec<T>>>, impl Fn(&T) + Send + Sync + 'static) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let shared = Arc::clone(&seen);
    (seen, move |payload: &T| shared.lock().unwrap().push(payload.clone()))
}
