use std::any::TypeId;
use std::marker::PhantomData;

/// Typed handle to a context slot with compile-time type information.
///
/// Slot identity is the pair of name and value type, so two keys with the
/// same name but different types address different slots.
pub struct ContextKey<T: 'static> {
    name: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T: 'static> ContextKey<T> {
    pub const fn new(name: &'static str) -> Self {
        Self { name, _marker: PhantomData }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) fn slot_id(&self) -> SlotId {
        SlotId { name: self.name, type_id: TypeId::of::<T>() }
    }
}

impl<T: 'static> Clone for ContextKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> Copy for ContextKey<T> {}

impl<T: 'static> std::fmt::Debug for ContextKey<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContextKey").field("name", &self.name).finish()
    }
}

/// Identity of a slot inside a scope's storage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct SlotId {
    name: &'static str,
    type_id: TypeId,
}
