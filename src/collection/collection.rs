use serde::{Deserialize, Serialize};
use tracing::debug;

use super::Identified;
use crate::config::StoreConfig;
use crate::statistics::StatisticsCounter;

/// What a `remove` call reports to the attached counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovalCounting {
    /// Every call counts as a deletion, whether or not a record matched.
    #[default]
    Attempts,
    /// Only calls that actually removed a record count.
    Removals,
}

/// Ordered collection of identity-bearing records.
///
/// Identities are not deduplicated: `add` always inserts, and uniqueness is a
/// policy left to the caller. The collection takes ownership of the sequence
/// it is built from, without copying it.
#[derive(Debug, Clone, PartialEq)]
pub struct IdentityCollection<T> {
    items: Vec<T>,
    statistics: Option<StatisticsCounter>,
    removal_counting: RemovalCounting,
}

impl<T> Default for IdentityCollection<T> {
    fn default() -> Self {
        IdentityCollection {
            items: Vec::new(),
            statistics: None,
            removal_counting: RemovalCounting::default(),
        }
    }
}

impl<T: Identified> IdentityCollection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_vec(items: Vec<T>) -> Self {
        IdentityCollection {
            items,
            ..Self::default()
        }
    }

    /// Builds from a possibly absent sequence; `None` yields an empty collection.
    pub fn from_option(items: Option<Vec<T>>) -> Self {
        Self::from_vec(items.unwrap_or_default())
    }

    pub fn with_statistics(mut self, statistics: StatisticsCounter) -> Self {
        self.statistics = Some(statistics);
        self
    }

    pub fn with_removal_counting(mut self, removal_counting: RemovalCounting) -> Self {
        self.removal_counting = removal_counting;
        self
    }

    pub fn with_config(self, config: &StoreConfig) -> Self {
        self.with_removal_counting(config.removal_counting)
    }

    /// Inserts `record` at `index` when it is in range, otherwise appends.
    /// Returns the position the record landed at.
    pub fn add(&mut self, record: T, index: Option<usize>) -> usize {
        let position = match index {
            Some(index) if index <= self.items.len() => index,
            _ => self.items.len(),
        };
        debug!(id = ?record.id(), position, "collection add");
        self.items.insert(position, record);

        if let Some(statistics) = self.statistics.as_mut() {
            statistics.add_success();
        }
        position
    }

    /// Removes the first record equal to `record`. Returns whether one was
    /// removed; a miss leaves the collection unchanged.
    pub fn remove(&mut self, record: &T) -> bool
    where
        T: PartialEq,
    {
        let removed = match self.items.iter().position(|item| item == record) {
            Some(position) => {
                self.items.remove(position);
                true
            }
            None => false,
        };
        debug!(id = ?record.id(), removed, "collection remove");
        self.count_removal(removed);
        removed
    }

    /// Removes and returns the first record with identity `id`.
    pub fn remove_by_id(&mut self, id: &T::Id) -> Option<T> {
        let removed = self
            .position_of(id)
            .map(|position| self.items.remove(position));
        debug!(?id, removed = removed.is_some(), "collection remove by id");
        self.count_removal(removed.is_some());
        removed
    }

    pub fn find_by_id(&self, id: &T::Id) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn find_by_id_mut(&mut self, id: &T::Id) -> Option<&mut T> {
        self.items.iter_mut().find(|item| item.id() == id)
    }

    pub fn contains_id(&self, id: &T::Id) -> bool {
        self.position_of(id).is_some()
    }

    pub fn position_of(&self, id: &T::Id) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    fn count_removal(&mut self, removed: bool) {
        let counts = match self.removal_counting {
            RemovalCounting::Attempts => true,
            RemovalCounting::Removals => removed,
        };
        if counts {
            if let Some(statistics) = self.statistics.as_mut() {
                statistics.deleted();
            }
        }
    }
}

impl<T> IdentityCollection<T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }

    pub fn removal_counting(&self) -> RemovalCounting {
        self.removal_counting
    }

    pub fn statistics(&self) -> Option<&StatisticsCounter> {
        self.statistics.as_ref()
    }

    pub fn statistics_mut(&mut self) -> Option<&mut StatisticsCounter> {
        self.statistics.as_mut()
    }

    pub fn take_statistics(&mut self) -> Option<StatisticsCounter> {
        self.statistics.take()
    }
}

impl<T: Identified> FromIterator<T> for IdentityCollection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<T> IntoIterator for IdentityCollection<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a IdentityCollection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
