use std::collections::BTreeMap;
use std::sync::Arc;

use im::OrdMap;
use serde::{Deserialize, Serialize, Serializer};
use tracing::debug;

use super::{ContextError, ContextSchema, ContextValue, ContextValueCell, ValueKind};
use crate::clock::Timestamp;
use crate::collection::Identified;

type Cell = ContextValueCell<ContextValue>;

/// Immutable snapshot of named cells drawn from a closed schema.
///
/// Updates never mutate a snapshot; they return a new one that shares every
/// untouched cell (same `Arc`) with its predecessor, so readers holding an
/// older snapshot keep a consistent view.
///
/// `updated` is always at least the newest `updated` among the cells.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextStore {
    id: String,
    updated: Timestamp,
    schema: Arc<ContextSchema>,
    cells: OrdMap<String, Arc<Cell>>,
}

/// Plain-data form of a [`ContextStore`] with cells flattened as named fields,
/// for external persistence and transport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    pub id: String,
    pub updated: Timestamp,
    #[serde(flatten)]
    pub cells: BTreeMap<String, Cell>,
}

impl ContextStore {
    /// A store with every schema field at its default, stamped `at` (or now).
    pub fn defaults(schema: &Arc<ContextSchema>, at: Option<Timestamp>) -> Self {
        let at = Timestamp::or_now(at);
        let cells = schema
            .fields()
            .iter()
            .map(|spec| {
                let cell = ContextValueCell::new(spec.name(), spec.default_value().clone(), Some(at));
                (spec.name().to_string(), Arc::new(cell))
            })
            .collect();

        ContextStore {
            id: schema.name().to_string(),
            updated: at,
            schema: Arc::clone(schema),
            cells,
        }
    }

    /// Defaults overlaid with whole replacement cells.
    pub fn defaults_with<I>(
        schema: &Arc<ContextSchema>,
        overrides: I,
        at: Option<Timestamp>,
    ) -> Result<Self, ContextError>
    where
        I: IntoIterator<Item = (String, Cell)>,
    {
        let mut store = Self::defaults(schema, at);
        let overrides = store.validate(overrides)?;
        for (name, cell) in overrides {
            store.cells.insert(name, Arc::new(cell));
        }
        store.updated = store.updated.max(store.newest_cell());
        Ok(store)
    }

    /// Rebuilds a store from plain data, filling absent fields from the schema.
    pub fn restore(schema: &Arc<ContextSchema>, snapshot: StoreSnapshot) -> Result<Self, ContextError> {
        let StoreSnapshot { id, updated, cells } = snapshot;
        let cells = cells.into_iter().map(|(name, cell)| {
            let cell = match schema.field(&name) {
                Some(spec) => {
                    let declared = spec.kind();
                    cell.map(|value| value.coerce_to(declared))
                }
                None => cell,
            };
            (name, cell)
        });
        let store = Self::defaults_with(schema, cells, Some(updated))?;
        Ok(store.with_id(id))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn updated(&self) -> Timestamp {
        self.updated
    }

    pub fn schema(&self) -> &Arc<ContextSchema> {
        &self.schema
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn get(&self, name: &str) -> Option<&Cell> {
        self.cells.get(name).map(Arc::as_ref)
    }

    /// The shared cell itself; unchanged fields are pointer-equal across
    /// snapshots.
    pub fn cell(&self, name: &str) -> Option<&Arc<Cell>> {
        self.cells.get(name)
    }

    pub fn value(&self, name: &str) -> Option<&ContextValue> {
        self.get(name).map(ContextValueCell::value)
    }

    pub fn bool(&self, name: &str) -> Result<bool, ContextError> {
        let value = self.require(name)?.value();
        value.as_bool().ok_or_else(|| ContextError::TypeMismatch {
            field: name.to_string(),
            expected: ValueKind::Bool,
            found: value.kind(),
        })
    }

    /// Cells in schema declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Cell)> + '_ {
        self.schema
            .fields()
            .iter()
            .filter_map(move |spec| self.get(spec.name()).map(|cell| (spec.name(), cell)))
    }

    /// Returns a store with the named cells replaced and `updated` set to `at`
    /// (or now), raised to the previous `updated` or the newest cell when
    /// either is ahead of it.
    ///
    /// Every name is checked before anything is replaced; a single unknown
    /// field or mistyped value rejects the whole update.
    pub fn apply_field_update<I>(&self, updates: I, at: Option<Timestamp>) -> Result<Self, ContextError>
    where
        I: IntoIterator<Item = (String, Cell)>,
    {
        let updates = self.validate(updates)?;
        let mut cells = self.cells.clone();
        for (name, cell) in updates {
            debug!(store = %self.id, field = %name, updated = ?cell.updated(), "context field update");
            cells.insert(name, Arc::new(cell));
        }

        let mut next = ContextStore {
            id: self.id.clone(),
            updated: Timestamp::or_now(at).max(self.updated),
            schema: Arc::clone(&self.schema),
            cells,
        };
        next.updated = next.updated.max(next.newest_cell());
        Ok(next)
    }

    /// Replaces one cell, keeping `updated` at or past both the old store and
    /// the new cell.
    pub fn with_field(&self, name: &str, cell: Cell) -> Result<Self, ContextError> {
        self.schema.check(name, cell.value())?;
        let updated = self.updated.max(cell.updated());
        Ok(ContextStore {
            id: self.id.clone(),
            updated,
            schema: Arc::clone(&self.schema),
            cells: self.cells.update(name.to_string(), Arc::new(cell)),
        })
    }

    pub fn set_field(
        &self,
        name: &str,
        value: impl Into<ContextValue>,
        at: Option<Timestamp>,
    ) -> Result<Self, ContextError> {
        let cell = self.require(name)?.set(value.into(), at)?;
        self.apply_field_update([(name.to_string(), cell)], at)
    }

    pub fn toggle_field(&self, name: &str, at: Option<Timestamp>) -> Result<Self, ContextError> {
        let cell = self.require(name)?.toggle(at)?;
        self.apply_field_update([(name.to_string(), cell)], at)
    }

    /// Per-cell last-write-wins merge of two snapshots of the same schema.
    /// Cells from `other` win ties.
    pub fn merge(&self, other: &ContextStore) -> Result<Self, ContextError> {
        let mut cells = self.cells.clone();
        for (name, theirs) in other.cells.iter() {
            self.schema.check(name, theirs.value())?;
            let keep_ours = self
                .cells
                .get(name)
                .is_some_and(|ours| ours.is_newer_than(theirs));
            if !keep_ours {
                cells.insert(name.clone(), Arc::clone(theirs));
            }
        }

        let mut merged = ContextStore {
            id: self.id.clone(),
            updated: self.updated.max(other.updated),
            schema: Arc::clone(&self.schema),
            cells,
        };
        merged.updated = merged.updated.max(merged.newest_cell());
        Ok(merged)
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            id: self.id.clone(),
            updated: self.updated,
            cells: self
                .cells
                .iter()
                .map(|(name, cell)| (name.clone(), cell.as_ref().clone()))
                .collect(),
        }
    }

    fn require(&self, name: &str) -> Result<&Cell, ContextError> {
        self.get(name).ok_or_else(|| ContextError::UnknownField {
            field: name.to_string(),
        })
    }

    fn validate<I>(&self, updates: I) -> Result<Vec<(String, Cell)>, ContextError>
    where
        I: IntoIterator<Item = (String, Cell)>,
    {
        let updates: Vec<(String, Cell)> = updates.into_iter().collect();
        for (name, cell) in &updates {
            self.schema.check(name, cell.value())?;
        }
        Ok(updates)
    }

    fn newest_cell(&self) -> Timestamp {
        self.cells
            .values()
            .map(|cell| cell.updated())
            .max()
            .unwrap_or(self.updated)
    }
}

impl Identified for ContextStore {
    type Id = String;

    fn id(&self) -> &String {
        &self.id
    }
}

impl Serialize for ContextStore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.snapshot().serialize(serializer)
    }
}
