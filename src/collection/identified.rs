use std::fmt::Debug;

/// Capability of a record that carries a unique identity.
///
/// The identity is assumed immutable once the record is stored in a
/// collection. Derive it with `#[derive(Identified)]` (the field named `id`, or
/// the one tagged `#[identified(id)]`).
pub trait Identified {
    type Id: PartialEq + Debug;

    fn id(&self) -> &Self::Id;
}

impl<T: Identified + ?Sized> Identified for Box<T> {
    type Id = T::Id;

    fn id(&self) -> &Self::Id {
        (**self).id()
    }
}

impl<T: Identified + ?Sized> Identified for std::sync::Arc<T> {
    type Id = T::Id;

    fn id(&self) -> &Self::Id {
        (**self).id()
    }
}
