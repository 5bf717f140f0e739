use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use super::{Channel, FaultKind, HandlerError, HandlerFault};
use crate::config::StoreConfig;

type Handler<P> = Arc<dyn Fn(&P) -> Result<(), HandlerError> + Send + Sync>;

/// Handle returned by `on`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How `emit` reacts when a handler fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaultPolicy {
    /// Record the fault and keep invoking the remaining handlers.
    #[default]
    Isolate,
    /// Stop at the first fault; later handlers are skipped.
    Abort,
}

/// Outcome of one `emit` call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmitReport {
    /// Handlers that ran to completion.
    pub delivered: usize,
    /// Handlers not invoked because an earlier one faulted under `Abort`.
    pub skipped: usize,
    pub faults: Vec<HandlerFault>,
}

impl EmitReport {
    pub fn is_clean(&self) -> bool {
        self.faults.is_empty()
    }
}

struct Registry<C, P> {
    next_id: u64,
    channels: HashMap<C, Vec<(SubscriptionId, Handler<P>)>>,
}

/// Synchronous publish/subscribe registry keyed by channel.
///
/// Handlers for a channel run inline on the emitting call, in subscription
/// order. Channels are independent. Clones share the same registry, so a bus
/// is passed explicitly to whoever needs to publish or subscribe.
pub struct EventBus<C, P> {
    registry: Arc<RwLock<Registry<C, P>>>,
    policy: FaultPolicy,
}

impl<C, P> Clone for EventBus<C, P> {
    fn clone(&self) -> Self {
        EventBus {
            registry: Arc::clone(&self.registry),
            policy: self.policy,
        }
    }
}

impl<C: Channel, P> Default for EventBus<C, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Channel, P> EventBus<C, P> {
    pub fn new() -> Self {
        Self::with_policy(FaultPolicy::default())
    }

    pub fn with_policy(policy: FaultPolicy) -> Self {
        EventBus {
            registry: Arc::new(RwLock::new(Registry {
                next_id: 1,
                channels: HashMap::new(),
            })),
            policy,
        }
    }

    pub fn with_config(config: &StoreConfig) -> Self {
        Self::with_policy(config.fault_policy)
    }

    pub fn policy(&self) -> FaultPolicy {
        self.policy
    }

    /// Subscribes an infallible handler.
    pub fn on<F>(&self, channel: C, handler: F) -> SubscriptionId
    where
        F: Fn(&P) + Send + Sync + 'static,
    {
        self.try_on(channel, move |payload| {
            handler(payload);
            Ok(())
        })
    }

    /// Subscribes a handler that may report failure.
    pub fn try_on<F>(&self, channel: C, handler: F) -> SubscriptionId
    where
        F: Fn(&P) -> Result<(), HandlerError> + Send + Sync + 'static,
    {
        let handler: Handler<P> = Arc::new(handler);
        let mut registry = self.registry.write().unwrap_or_else(PoisonError::into_inner);
        let id = SubscriptionId(registry.next_id);
        registry.next_id += 1;
        trace!(?channel, %id, "subscribe");
        registry
            .channels
            .entry(channel)
            .or_default()
            .push((id, handler));
        id
    }

    /// Unsubscribes `id` from `channel`. Returns false if it was not subscribed.
    pub fn off(&self, channel: &C, id: SubscriptionId) -> bool {
        let mut registry = self.registry.write().unwrap_or_else(PoisonError::into_inner);
        let Some(handlers) = registry.channels.get_mut(channel) else {
            return false;
        };
        let before = handlers.len();
        handlers.retain(|(subscribed, _)| *subscribed != id);
        let removed = handlers.len() != before;
        if handlers.is_empty() {
            registry.channels.remove(channel);
        }
        removed
    }

    /// Invokes every handler subscribed to `channel`, in subscription order.
    ///
    /// The handler list is captured before the first call, so subscriptions
    /// made or dropped by a handler take effect from the next emit.
    pub fn emit(&self, channel: &C, payload: &P) -> EmitReport {
        let handlers: Vec<(SubscriptionId, Handler<P>)> = {
            let registry = self.registry.read().unwrap_or_else(PoisonError::into_inner);
            registry.channels.get(channel).cloned().unwrap_or_default()
        };
        trace!(?channel, handlers = handlers.len(), "emit");

        let mut report = EmitReport::default();
        for (position, (id, handler)) in handlers.iter().enumerate() {
            let kind = match catch_unwind(AssertUnwindSafe(|| handler(payload))) {
                Ok(Ok(())) => {
                    report.delivered += 1;
                    continue;
                }
                Ok(Err(err)) => FaultKind::Failed(err.to_string()),
                Err(panic) => FaultKind::Panicked(panic_message(panic.as_ref())),
            };

            let fault = HandlerFault {
                channel: format!("{:?}", channel),
                subscription: *id,
                kind,
            };
            warn!(%fault, "event handler fault");
            report.faults.push(fault);

            if self.policy == FaultPolicy::Abort {
                report.skipped = handlers.len() - position - 1;
                break;
            }
        }
        report
    }

    pub fn handler_count(&self, channel: &C) -> usize {
        let registry = self.registry.read().unwrap_or_else(PoisonError::into_inner);
        registry.channels.get(channel).map_or(0, Vec::len)
    }

    /// Drops every handler on `channel`.
    pub fn clear(&self, channel: &C) {
        let mut registry = self.registry.write().unwrap_or_else(PoisonError::into_inner);
        registry.channels.remove(channel);
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
