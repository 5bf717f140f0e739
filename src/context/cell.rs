use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{ContextError, ContextValue};
use crate::clock::Timestamp;
use crate::collection::Identified;

/// A named value paired with the time it was last written.
///
/// Cells are immutable values: every update returns a new cell and leaves the
/// original untouched. `updated` never moves backward through [`set`] or
/// [`toggle`]; only [`force_set`] may rewind it.
///
/// [`set`]: ContextValueCell::set
/// [`toggle`]: ContextValueCell::toggle
/// [`force_set`]: ContextValueCell::force_set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextValueCell<T> {
    id: String,
    value: T,
    updated: Timestamp,
}

impl<T> ContextValueCell<T> {
    pub fn new(id: impl Into<String>, value: T, at: Option<Timestamp>) -> Self {
        ContextValueCell {
            id: id.into(),
            value,
            updated: Timestamp::or_now(at),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn updated(&self) -> Timestamp {
        self.updated
    }

    pub fn into_value(self) -> T {
        self.value
    }

    /// Returns a cell holding `value`, stamped `at` (or now).
    ///
    /// An explicit timestamp older than the stored one is rejected; use
    /// [`force_set`](Self::force_set) to write it anyway. Without a timestamp
    /// the write is stamped now, clamped so it never precedes the stored one.
    pub fn set(&self, value: T, at: Option<Timestamp>) -> Result<Self, ContextError> {
        let updated = self.next_timestamp(at)?;
        Ok(ContextValueCell {
            id: self.id.clone(),
            value,
            updated,
        })
    }

    /// Writes `value` stamped `at`, even when that rewinds the cell.
    pub fn force_set(&self, value: T, at: Timestamp) -> Self {
        ContextValueCell {
            id: self.id.clone(),
            value,
            updated: at,
        }
    }

    pub fn is_newer_than(&self, other: &Self) -> bool {
        self.updated > other.updated
    }

    /// Last-write-wins: the cell with the greater `updated` survives; on a
    /// tie `other`, the later-applied write, wins.
    pub fn merge(&self, other: &Self) -> Self
    where
        T: Clone,
    {
        if self.is_newer_than(other) {
            self.clone()
        } else {
            other.clone()
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ContextValueCell<U> {
        ContextValueCell {
            id: self.id,
            value: f(self.value),
            updated: self.updated,
        }
    }

    fn next_timestamp(&self, at: Option<Timestamp>) -> Result<Timestamp, ContextError> {
        match at {
            Some(at) if at < self.updated => {
                warn!(id = %self.id, stored = ?self.updated, attempted = ?at, "stale cell write rejected");
                Err(ContextError::StaleWrite {
                    id: self.id.clone(),
                    stored: self.updated,
                    attempted: at,
                })
            }
            Some(at) => Ok(at),
            None => Ok(Timestamp::now().max(self.updated)),
        }
    }
}

impl ContextValueCell<bool> {
    /// Flips the flag, stamped `at` (or now).
    pub fn toggle(&self, at: Option<Timestamp>) -> Result<Self, ContextError> {
        self.set(!self.value, at)
    }
}

impl ContextValueCell<ContextValue> {
    /// Flips a boolean value; any other kind is an [`InvalidToggleType`].
    ///
    /// [`InvalidToggleType`]: ContextError::InvalidToggleType
    pub fn toggle(&self, at: Option<Timestamp>) -> Result<Self, ContextError> {
        match self.value {
            ContextValue::Bool(flag) => self.set(ContextValue::Bool(!flag), at),
            ref other => Err(ContextError::InvalidToggleType {
                field: self.id.clone(),
                kind: other.kind(),
            }),
        }
    }

    /// Converts a typed cell into the dynamic form a store holds.
    pub fn from_typed<T: Into<ContextValue>>(cell: ContextValueCell<T>) -> Self {
        cell.map(Into::into)
    }
}

impl<T> Identified for ContextValueCell<T> {
    type Id = String;

    fn id(&self) -> &String {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(millis: i64) -> Option<Timestamp> {
        Some(Timestamp::from_millis(millis))
    }

    #[test]
    fn set_is_pure() {
        let cell = ContextValueCell::new("currency", "EUR".to_string(), at(10));
        let next = cell.set("USD".to_string(), at(20)).unwrap();

        assert_eq!(cell.value(), "EUR");
        assert_eq!(next.value(), "USD");
        assert_eq!(next.updated(), Timestamp::from_millis(20));
        assert_eq!(next.id(), "currency");
    }

    #[test]
    fn set_without_timestamp_uses_now() {
        let cell = ContextValueCell::new("n", 1, at(10));
        let before = Timestamp::now();
        let next = cell.set(2, None).unwrap();
        assert!(next.updated() > before);
    }

    #[test]
    fn set_never_rewinds_future_cell() {
        let future = Timestamp::now().as_millis() + 60_000;
        let cell = ContextValueCell::new("n", 1, at(future));
        let next = cell.set(2, None).unwrap();
        assert_eq!(next.updated(), Timestamp::from_millis(future));
    }

    #[test]
    fn stale_set_rejected_unless_forced() {
        let cell = ContextValueCell::new("n", 1, at(100));
        let err = cell.set(2, at(50)).unwrap_err();
        assert_eq!(
            err,
            ContextError::StaleWrite {
                id: "n".into(),
                stored: Timestamp::from_millis(100),
                attempted: Timestamp::from_millis(50),
            }
        );

        let forced = cell.force_set(2, Timestamp::from_millis(50));
        assert_eq!(*forced.value(), 2);
        assert_eq!(forced.updated(), Timestamp::from_millis(50));
    }

    #[test]
    fn equal_timestamp_is_accepted() {
        let cell = ContextValueCell::new("n", 1, at(100));
        assert_eq!(*cell.set(5, at(100)).unwrap().value(), 5);
    }

    #[test]
    fn toggle_twice_restores_value_and_advances() {
        let cell = ContextValueCell::new("flag", true, None);
        let once = cell.toggle(None).unwrap();
        let twice = once.toggle(None).unwrap();

        assert!(!once.value());
        assert!(once.updated() > cell.updated());
        assert_eq!(twice.value(), cell.value());
        assert!(twice.updated() > once.updated());
    }

    #[test]
    fn dynamic_toggle_rejects_non_bool() {
        let cell = ContextValueCell::new("limit", ContextValue::Int(3), None);
        assert!(matches!(
            cell.toggle(None),
            Err(ContextError::InvalidToggleType { .. })
        ));

        let flag = ContextValueCell::new("flag", ContextValue::Bool(false), None);
        assert_eq!(
            flag.toggle(None).unwrap().value(),
            &ContextValue::Bool(true)
        );
    }

    #[test]
    fn merge_prefers_newer_then_later_applied() {
        let older = ContextValueCell::new("n", 1, at(10));
        let newer = ContextValueCell::new("n", 2, at(20));
        assert_eq!(*older.merge(&newer).value(), 2);
        assert_eq!(*newer.merge(&older).value(), 2);

        let tie = ContextValueCell::new("n", 3, at(20));
        assert_eq!(*newer.merge(&tie).value(), 3);
    }

    #[test]
    fn serialize_shape() {
        let cell = ContextValueCell::new("flag", true, at(2234443));
        let json = serde_json::to_string(&cell).unwrap();
        assert_eq!(json, r#"{"id":"flag","value":true,"updated":2234443}"#);
    }

    #[test]
    fn from_typed() {
        let cell = ContextValueCell::new("flag", true, at(1));
        let dynamic = ContextValueCell::from_typed(cell);
        assert_eq!(dynamic.value(), &ContextValue::Bool(true));
        assert_eq!(dynamic.updated(), Timestamp::from_millis(1));
    }
}
