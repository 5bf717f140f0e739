use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::bus::{EmitReport, EventBus};
use crate::clock::Timestamp;
use crate::config::StoreConfig;
use crate::context::{ContextError, ContextStore, ContextValue, ContextValueCell};
use crate::statistics::StatisticsCounter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContextChannel {
    FieldChanged,
    StoreReplaced,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ContextEvent {
    #[serde(rename_all = "camelCase")]
    FieldChanged {
        store_id: String,
        field: String,
        value: ContextValue,
        updated: Timestamp,
    },
    #[serde(rename_all = "camelCase")]
    StoreReplaced { store_id: String, updated: Timestamp },
}

impl ContextEvent {
    pub fn channel(&self) -> ContextChannel {
        match self {
            ContextEvent::FieldChanged { .. } => ContextChannel::FieldChanged,
            ContextEvent::StoreReplaced { .. } => ContextChannel::StoreReplaced,
        }
    }
}

/// Holds the current [`ContextStore`] snapshot and announces every change.
///
/// Each successful update swaps in the new snapshot, then publishes one
/// `FieldChanged` per cell that was replaced. Readers that took a snapshot
/// earlier keep seeing it unchanged.
pub struct ObservableContext {
    current: ContextStore,
    bus: EventBus<ContextChannel, ContextEvent>,
    statistics: StatisticsCounter,
}

impl ObservableContext {
    pub fn new(store: ContextStore, bus: EventBus<ContextChannel, ContextEvent>) -> Self {
        ObservableContext {
            current: store,
            bus,
            statistics: StatisticsCounter::new(),
        }
    }

    /// Wraps `store` with a fresh bus using the configured fault policy.
    pub fn with_config(store: ContextStore, config: &StoreConfig) -> Self {
        Self::new(store, EventBus::with_config(config))
    }

    pub fn store(&self) -> &ContextStore {
        &self.current
    }

    /// A snapshot that stays valid whatever happens to this context later.
    pub fn snapshot(&self) -> ContextStore {
        self.current.clone()
    }

    pub fn bus(&self) -> &EventBus<ContextChannel, ContextEvent> {
        &self.bus
    }

    pub fn statistics(&self) -> &StatisticsCounter {
        &self.statistics
    }

    pub fn set_field(
        &mut self,
        name: &str,
        value: impl Into<ContextValue>,
        at: Option<Timestamp>,
    ) -> Result<ContextStore, ContextError> {
        let next = self.current.set_field(name, value, at);
        self.commit(next)
    }

    pub fn toggle_field(&mut self, name: &str, at: Option<Timestamp>) -> Result<ContextStore, ContextError> {
        let next = self.current.toggle_field(name, at);
        self.commit(next)
    }

    pub fn apply_field_update<I>(&mut self, updates: I, at: Option<Timestamp>) -> Result<ContextStore, ContextError>
    where
        I: IntoIterator<Item = (String, ContextValueCell<ContextValue>)>,
    {
        let next = self.current.apply_field_update(updates, at);
        self.commit(next)
    }

    /// Swaps in a whole new snapshot (e.g. one reloaded from storage).
    pub fn replace(&mut self, store: ContextStore) -> EmitReport {
        self.current = store;
        self.statistics.add_processed(format!("replaced {}", self.current.id()));
        let event = ContextEvent::StoreReplaced {
            store_id: self.current.id().to_string(),
            updated: self.current.updated(),
        };
        self.publish(&event)
    }

    fn commit(&mut self, next: Result<ContextStore, ContextError>) -> Result<ContextStore, ContextError> {
        let next = match next {
            Ok(next) => next,
            Err(err) => {
                self.statistics.add_failure_with(err.to_string());
                return Err(err);
            }
        };

        let changed: Vec<ContextEvent> = next
            .fields()
            .filter(|(name, _)| {
                !matches!(
                    (self.current.cell(name), next.cell(name)),
                    (Some(old), Some(new)) if Arc::ptr_eq(old, new)
                )
            })
            .map(|(name, cell)| ContextEvent::FieldChanged {
                store_id: next.id().to_string(),
                field: name.to_string(),
                value: cell.value().clone(),
                updated: cell.updated(),
            })
            .collect();

        debug!(store = %next.id(), changed = changed.len(), "context committed");
        self.current = next;
        for event in &changed {
            if let ContextEvent::FieldChanged { field, .. } = event {
                self.statistics.add_success_with(format!("{} updated", field));
            }
            self.publish(event);
        }
        Ok(self.current.clone())
    }

    fn publish(&mut self, event: &ContextEvent) -> EmitReport {
        let report = self.bus.emit(&event.channel(), event);
        for fault in &report.faults {
            self.statistics.add_failure_with(fault.to_string());
        }
        report
    }
}
