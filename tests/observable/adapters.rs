//! Stand-ins for the collaborators that react to store events.

use std::sync::{Arc, Mutex};

use context_store::{ContextChannel, ContextEvent, EventBus, SubscriptionId, Timestamp};

/// Records the field changes it is told about, the way a persistence adapter
/// would queue writes.
#[derive(Clone, Default)]
pub struct PendingWrites {
    writes: Arc<Mutex<Vec<(String, Timestamp)>>>,
}

impl PendingWrites {
    pub fn attach(&self, bus: &EventBus<ContextChannel, ContextEvent>) -> SubscriptionId {
        let writes = Arc::clone(&self.writes);
        bus.on(ContextChannel::FieldChanged, move |event| {
            if let ContextEvent::FieldChanged { field, updated, .. } = event {
                writes.lock().unwrap().push((field.clone(), *updated));
            }
        })
    }

    pub fn fields(&self) -> Vec<String> {
        self.writes
            .lock()
            .unwrap()
            .iter()
            .map(|(field, _)| field.clone())
            .collect()
    }
}

/// Counts refreshes, the way a UI panel would re-render.
#[derive(Clone, Default)]
pub struct Panel {
    renders: Arc<Mutex<usize>>,
}

impl Panel {
    pub fn attach(&self, bus: &EventBus<ContextChannel, ContextEvent>) -> SubscriptionId {
        let renders = Arc::clone(&self.renders);
        bus.on(ContextChannel::FieldChanged, move |_| {
            *renders.lock().unwrap() += 1;
        })
    }

    pub fn renders(&self) -> usize {
        *self.renders.lock().unwrap()
    }
}
