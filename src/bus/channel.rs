use std::fmt::Debug;
use std::hash::Hash;

/// Key of an event bus channel.
///
/// Any hashable, comparable value qualifies. A fieldless enum with one variant
/// per event gives an exhaustively checked registry; `String` and
/// `&'static str` work as the untyped fallback.
pub trait Channel: Clone + Eq + Hash + Debug + Send + Sync + 'static {}

impl<T> Channel for T where T: Clone + Eq + Hash + Debug + Send + Sync + 'static {}
