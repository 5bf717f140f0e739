//! Observable wrappers - route mutations through stores and collections and
//! publish what changed on an injected [`EventBus`](crate::bus::EventBus).
//!
//! Subscribers (panels, caches, persistence adapters) react to the published
//! events; they never mutate the wrapped state directly.

mod collection;
mod context;

pub use collection::{CollectionChannel, CollectionEvent, ObservableCollection};
pub use context::{ContextChannel, ContextEvent, ObservableContext};
