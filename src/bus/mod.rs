//! Event Bus - synchronous, channel-scoped publish/subscribe.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 EventBus<C, P> (cloneable)                  │
//! │  - on / try_on / off per channel                            │
//! │  - emit(channel, payload) runs handlers in order, inline    │
//! └─────────────────────────────────────────────────────────────┘
//!                            │
//!          ┌─────────────────┴──────────────────┐
//!          ▼                                    ▼
//! ┌──────────────────────┐          ┌──────────────────────────┐
//! │ Channel (enum or     │          │ Signal<P>                │
//! │ String fallback)     │          │ one fixed channel        │
//! └──────────────────────┘          └──────────────────────────┘
//! ```
//!
//! A handler that fails (returns `Err` or panics) is reported in the
//! [`EmitReport`]; under [`FaultPolicy::Isolate`] the remaining handlers still run.
//!
//! ## Usage
//!
//! ```ignore
//! #[derive(Debug, Clone, PartialEq, Eq, Hash)]
//! enum Panel { Refresh, Close }
//!
//! let bus: EventBus<Panel, String> = EventBus::new();
//! let id = bus.on(Panel::Refresh, |name| println!("refresh {}", name));
//! bus.emit(&Panel::Refresh, &"trades".to_string());
//! bus.off(&Panel::Refresh, id);
//! ```

mod channel;
mod error;
mod event_bus;
mod signal;

pub use channel::Channel;
pub use error::{FaultKind, HandlerError, HandlerFault};
pub use event_bus::{EmitReport, EventBus, FaultPolicy, SubscriptionId};
pub use signal::{EntityChange, EntityChangedSignal, LockSignal, Signal};
