//! Observable in-process state store.
//!
//! - [`IdentityCollection`]: ordered records keyed by identity, with optional
//!   [`StatisticsCounter`] reporting.
//! - [`ContextValueCell`] / [`ContextStore`]: timestamped values and
//!   copy-on-write snapshots of them, updated last-write-wins.
//! - [`EventBus`] / [`Signal`]: synchronous publish/subscribe for reacting to
//!   changes.
//!
//! The crate performs no I/O. Loading and persisting state is left to the
//! caller, which exchanges plain serde data ([`StoreSnapshot`],
//! [`StatisticsCounter`]) with it.

extern crate self as context_store;

pub mod bus;
pub mod clock;
pub mod collection;
pub mod config;
pub mod context;
pub mod observable;
pub mod statistics;

pub use bus::{
    Channel, EmitReport, EntityChange, EntityChangedSignal, EventBus, FaultKind, FaultPolicy,
    HandlerError, HandlerFault, LockSignal, Signal, SubscriptionId,
};
pub use clock::Timestamp;
pub use collection::{Identified, IdentityCollection, RemovalCounting};
pub use config::{ConfigError, StoreConfig};
pub use context::{
    ContextError, ContextSchema, ContextSchemaBuilder, ContextStore, ContextValue,
    ContextValueCell, FieldSpec, StoreSnapshot, ValueKind,
};
pub use observable::{
    CollectionChannel, CollectionEvent, ContextChannel, ContextEvent, ObservableCollection,
    ObservableContext,
};
pub use statistics::{LogMessage, StatisticsCounter};

// Derive macro for `Identified`, re-exported under the trait's name.
#[cfg(feature = "derive")]
pub use context_store_macros::Identified;
