//! Identity collections - ordered, in-place mutable sequences of records that
//! each carry an identity.
//!
//! ## Example
//!
//! ```ignore
//! use context_store::{Identified, IdentityCollection, StatisticsCounter};
//!
//! #[derive(Clone, PartialEq, Identified)]
//! struct Panel {
//!     id: String,
//!     title: String,
//! }
//!
//! let mut panels = IdentityCollection::new().with_statistics(StatisticsCounter::new());
//! panels.add(Panel { id: "p-1".into(), title: "Trades".into() }, None);
//! assert!(panels.find_by_id(&"p-1".to_string()).is_some());
//! ```

mod collection;
mod identified;

pub use collection::{IdentityCollection, RemovalCounting};
pub use identified::Identified;
