use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{EmitReport, EventBus, FaultPolicy, HandlerError, SubscriptionId};

/// A bus bound to one fixed channel, for single-purpose notifications.
///
/// Construct one per purpose and hand it to the parties that need it; there
/// is no process-wide instance.
pub struct Signal<P> {
    name: String,
    bus: EventBus<String, P>,
}

impl<P> Clone for Signal<P> {
    fn clone(&self) -> Self {
        Signal {
            name: self.name.clone(),
            bus: self.bus.clone(),
        }
    }
}

impl<P> Signal<P> {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_policy(name, FaultPolicy::default())
    }

    pub fn with_policy(name: impl Into<String>, policy: FaultPolicy) -> Self {
        Signal {
            name: name.into(),
            bus: EventBus::with_policy(policy),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn on<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&P) + Send + Sync + 'static,
    {
        self.bus.on(self.name.clone(), handler)
    }

    pub fn try_on<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&P) -> Result<(), HandlerError> + Send + Sync + 'static,
    {
        self.bus.try_on(self.name.clone(), handler)
    }

    pub fn off(&self, id: SubscriptionId) -> bool {
        self.bus.off(&self.name, id)
    }

    pub fn emit(&self, payload: &P) -> EmitReport {
        self.bus.emit(&self.name, payload)
    }

    pub fn handler_count(&self) -> usize {
        self.bus.handler_count(&self.name)
    }
}

/// Boolean lock/unlock notification.
pub type LockSignal = Signal<bool>;

impl Signal<bool> {
    pub fn lock() -> Self {
        Signal::new("lock")
    }
}

/// Payload announcing that a named value of some entity changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityChange {
    pub id: String,
    pub name: String,
    pub value: Value,
}

pub type EntityChangedSignal = Signal<EntityChange>;

impl Signal<EntityChange> {
    pub fn entity_changed() -> Self {
        Signal::new("entity_changed")
    }
}
