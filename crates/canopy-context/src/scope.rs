use std::any::Any;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::key::{ContextKey, SlotId};

/// Handle to one node of a context tree. Cloning shares the node.
///
/// A scope stands in for a component's position in a UI tree: children are
/// mounted with [`Scope::child`], values published with [`Scope::set`] are
/// visible to the whole subtree, and [`Scope::dispose`] models unmounting.
#[derive(Clone)]
pub struct Scope {
    inner: Arc<ScopeInner>,
}

struct ScopeInner {
    parent: Option<Scope>,
    state: Mutex<ScopeState>,
}

struct ScopeState {
    slots: BTreeMap<SlotId, Arc<dyn Any + Send + Sync>>,
    disposed: bool,
}

impl Scope {
    /// Creates the root of a fresh context tree.
    pub fn root() -> Self {
        Self::with_parent(None)
    }

    /// Mounts a child scope below this one.
    pub fn child(&self) -> Self {
        Self::with_parent(Some(self.clone()))
    }

    fn with_parent(parent: Option<Scope>) -> Self {
        Self {
            inner: Arc::new(ScopeInner {
                parent,
                state: Mutex::new(ScopeState { slots: BTreeMap::new(), disposed: false }),
            }),
        }
    }

    pub fn parent(&self) -> Option<&Scope> {
        self.inner.parent.as_ref()
    }

    /// Publishes `value` into this scope's slot for `key`, overwriting any
    /// earlier value published here. Writes to a disposed scope are ignored.
    pub fn set<T: Send + Sync + 'static>(&self, key: ContextKey<T>, value: T) {
        let mut state = self.lock();
        if state.disposed {
            return;
        }
        state.slots.insert(key.slot_id(), Arc::new(value));
    }

    /// Resolves `key` against this scope first, then each ancestor in turn.
    /// The nearest published value wins; `None` means no ancestor published
    /// one. Never panics.
    pub fn get<T: Send + Sync + 'static>(&self, key: ContextKey<T>) -> Option<Arc<T>> {
        let mut current = Some(self);
        while let Some(scope) = current {
            if let Some(value) = scope.local(key) {
                return Some(value);
            }
            current = scope.inner.parent.as_ref();
        }
        None
    }

    fn local<T: Send + Sync + 'static>(&self, key: ContextKey<T>) -> Option<Arc<T>> {
        let state = self.lock();
        if state.disposed {
            return None;
        }
        let slot = state.slots.get(&key.slot_id())?;
        Arc::clone(slot).downcast::<T>().ok()
    }

    /// Unmounts this scope: clears its slots and stops it from contributing
    /// to resolution. Descendants keep their own slots.
    pub fn dispose(&self) {
        let mut state = self.lock();
        state.disposed = true;
        state.slots.clear();
    }

    pub fn is_disposed(&self) -> bool {
        self.lock().disposed
    }

    fn lock(&self) -> MutexGuard<'_, ScopeState> {
        // A poisoned slot map is still structurally intact; reads must not panic.
        self.inner.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("Scope")
            .field("slots", &state.slots.len())
            .field("disposed", &state.disposed)
            .field("has_parent", &self.inner.parent.is_some())
            .finish()
    }
}
