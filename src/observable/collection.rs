use tracing::debug;

use crate::bus::{EmitReport, EventBus};
use crate::collection::{Identified, IdentityCollection};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionChannel {
    Added,
    Removed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CollectionEvent<Id> {
    Added { id: Id, index: usize },
    Removed { id: Id },
}

impl<Id> CollectionEvent<Id> {
    pub fn channel(&self) -> CollectionChannel {
        match self {
            CollectionEvent::Added { .. } => CollectionChannel::Added,
            CollectionEvent::Removed { .. } => CollectionChannel::Removed,
        }
    }
}

/// An [`IdentityCollection`] that publishes `Added`/`Removed` events.
///
/// A `remove` that matches nothing publishes nothing, whatever the
/// collection's counting policy records.
pub struct ObservableCollection<T: Identified> {
    collection: IdentityCollection<T>,
    bus: EventBus<CollectionChannel, CollectionEvent<T::Id>>,
}

impl<T> ObservableCollection<T>
where
    T: Identified,
    T::Id: Clone,
{
    pub fn new(
        collection: IdentityCollection<T>,
        bus: EventBus<CollectionChannel, CollectionEvent<T::Id>>,
    ) -> Self {
        ObservableCollection { collection, bus }
    }

    pub fn collection(&self) -> &IdentityCollection<T> {
        &self.collection
    }

    pub fn bus(&self) -> &EventBus<CollectionChannel, CollectionEvent<T::Id>> {
        &self.bus
    }

    pub fn into_inner(self) -> IdentityCollection<T> {
        self.collection
    }

    pub fn find_by_id(&self, id: &T::Id) -> Option<&T> {
        self.collection.find_by_id(id)
    }

    pub fn add(&mut self, record: T, index: Option<usize>) -> usize {
        let id = record.id().clone();
        let index = self.collection.add(record, index);
        self.publish(CollectionEvent::Added { id, index });
        index
    }

    pub fn remove(&mut self, record: &T) -> bool
    where
        T: PartialEq,
    {
        let removed = self.collection.remove(record);
        if removed {
            self.publish(CollectionEvent::Removed {
                id: record.id().clone(),
            });
        }
        removed
    }

    pub fn remove_by_id(&mut self, id: &T::Id) -> Option<T> {
        let removed = self.collection.remove_by_id(id);
        if removed.is_some() {
            self.publish(CollectionEvent::Removed { id: id.clone() });
        }
        removed
    }

    fn publish(&self, event: CollectionEvent<T::Id>) -> EmitReport {
        let report = self.bus.emit(&event.channel(), &event);
        debug!(event = ?event, delivered = report.delivered, "collection event");
        report
    }
}
