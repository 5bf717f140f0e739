//! Context - timestamped value cells and the copy-on-write stores that group them.
//!
//! A [`ContextStore`] is an immutable snapshot of named [`ContextValueCell`]s
//! drawn from a closed [`ContextSchema`]. Every update returns a new snapshot
//! that shares the untouched cells with the old one.
//!
//! ## Example
//!
//! ```ignore
//! use context_store::{ContextSchema, ContextStore};
//!
//! let schema = ContextSchema::builder("dashboard")
//!     .field("minusEightPlus10", true)
//!     .field("refreshSeconds", 30)
//!     .build()?;
//!
//! let store = ContextStore::defaults(&schema, None);
//! let toggled = store.toggle_field("minusEightPlus10", None)?;
//! assert_eq!(toggled.bool("minusEightPlus10")?, false);
//! ```

mod cell;
mod error;
mod schema;
mod store;
mod value;

pub use cell::ContextValueCell;
pub use error::ContextError;
pub use schema::{ContextSchema, ContextSchemaBuilder, FieldSpec, RESERVED_FIELDS};
pub use store::{ContextStore, StoreSnapshot};
pub use value::{ContextValue, ValueKind};
