//! The type-state query builder.
//!
//! A query starts in the [`Basic`] phase, which only accumulates attributes
//! and cannot be executed. It transitions one way into exactly one of the
//! executable phases — [`Save`], [`Search`], [`Update`], [`Delete`] — and
//! there is no path back or across: a different phase requires a fresh basic
//! query. Phase-violating calls do not compile:
//!
//! ```compile_fail
//! use credstore::{MemoryBackend, GENERIC_PASSWORD};
//!
//! let backend = MemoryBackend::new();
//! // A basic query has no `execute`.
//! GENERIC_PASSWORD.query().execute(&backend);
//! ```
//!
//! ```compile_fail
//! use credstore::{ReturnFlag, GENERIC_PASSWORD};
//!
//! // A save query has no `set_return`.
//! GENERIC_PASSWORD.save_query().set_return(ReturnFlag::Data, true);
//! ```
//!
//! Builders are immutable values: every setter returns a new builder and
//! leaves the receiver untouched, so a builder can be shared and branched
//! into different phases without coordination.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::backend::{Backend, FoundItem};
use crate::category::Category;
use crate::error::{CredStoreResult, StatusError};
use crate::executor;
use crate::key::{AttributeKey, ReturnFlag, SelectorKey, ValueKey};
use crate::selector::Selector;
use crate::value::{Payload, Value};

mod sealed {
    pub trait Sealed {}
}

/// Marker trait for query phases. Sealed; implemented only by the five
/// phases in this module.
pub trait Phase: sealed::Sealed + Clone + fmt::Debug + Send + 'static {}

/// Initial phase: attributes only, not executable.
#[derive(Debug, Clone, Copy, Default)]
pub struct Basic;

/// Executable phase persisting a new item.
#[derive(Debug, Clone, Copy, Default)]
pub struct Save;

/// Executable phase fetching at most one item.
#[derive(Debug, Clone, Copy, Default)]
pub struct Search;

/// Executable phase applying changes to matched items.
///
/// Carries the second, independent attributes-to-change mapping.
#[derive(Debug, Clone, Default)]
pub struct Update {
    changes: Selector,
}

/// Executable phase removing matched items.
#[derive(Debug, Clone, Copy, Default)]
pub struct Delete;

impl sealed::Sealed for Basic {}
impl sealed::Sealed for Save {}
impl sealed::Sealed for Search {}
impl sealed::Sealed for Update {}
impl sealed::Sealed for Delete {}

impl Phase for Basic {}
impl Phase for Save {}
impl Phase for Search {}
impl Phase for Update {}
impl Phase for Delete {}

/// An immutable query over one credential item category.
///
/// `C` fixes the category (and thereby which typed attribute setters exist);
/// `P` fixes the phase (and thereby which operations exist). Every query,
/// regardless of phase, contains exactly one category entry, set at
/// construction and unreachable from any setter.
pub struct Query<C: Category, P: Phase> {
    selector: Selector,
    phase: P,
    _category: PhantomData<C>,
}

impl<C: Category, P: Phase> Clone for Query<C, P> {
    fn clone(&self) -> Self {
        Self {
            selector: self.selector.clone(),
            phase: self.phase.clone(),
            _category: PhantomData,
        }
    }
}

impl<C: Category, P: Phase> fmt::Debug for Query<C, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query")
            .field("category", &C::ID)
            .field("phase", &self.phase)
            .field("selector", &self.selector)
            .finish()
    }
}

impl<C: Category, P: Phase> Query<C, P> {
    fn updated(&self, selector: Selector) -> Self {
        Self {
            selector,
            phase: self.phase.clone(),
            _category: PhantomData,
        }
    }

    /// Sets an attribute, returning a new query (copy-on-write,
    /// last-write-wins on duplicate keys).
    ///
    /// This generic setter accepts any attribute key; out-of-scope keys are
    /// reported by the backend at execution time. The typed per-category
    /// setters reject them at compile time instead.
    #[must_use]
    pub fn set_attribute(&self, key: AttributeKey, value: Value) -> Self {
        self.updated(self.selector.with(SelectorKey::Attribute(key), value))
    }

    /// The accumulated selector mapping.
    #[must_use]
    pub const fn selector(&self) -> &Selector {
        &self.selector
    }
}

impl<C: Category> Query<C, Basic> {
    pub(crate) fn seeded() -> Self {
        Self {
            selector: Selector::seeded(C::ID),
            phase: Basic,
            _category: PhantomData,
        }
    }

    fn into_phase<P: Phase>(&self, phase: P) -> Query<C, P> {
        Query {
            selector: self.selector.clone(),
            phase,
            _category: PhantomData,
        }
    }

    /// Transitions into the save phase, carrying the selector forward.
    #[must_use]
    pub fn for_save(&self) -> Query<C, Save> {
        self.into_phase(Save)
    }

    /// Transitions into the search phase, carrying the selector forward.
    #[must_use]
    pub fn for_search(&self) -> Query<C, Search> {
        self.into_phase(Search)
    }

    /// Transitions into the update phase, carrying the selector forward.
    /// The attributes-to-change mapping starts empty.
    #[must_use]
    pub fn for_update(&self) -> Query<C, Update> {
        self.into_phase(Update::default())
    }

    /// Transitions into the delete phase, carrying the selector forward.
    #[must_use]
    pub fn for_delete(&self) -> Query<C, Delete> {
        self.into_phase(Delete)
    }
}

impl<C: Category> Query<C, Save> {
    /// Sets a payload slot on the selector.
    #[must_use]
    pub fn set_value(&self, key: ValueKey, value: Value) -> Self {
        self.updated(self.selector.with(SelectorKey::Value(key), value))
    }

    /// Sets the secret bytes to persist.
    #[must_use]
    pub fn value_data<T: Into<Payload>>(&self, payload: T) -> Self {
        self.set_value(ValueKey::Data, Value::Bytes(payload.into()))
    }

    /// Adds the item. Fails with `DuplicateItem` if an item with the same
    /// identifying attributes already exists; use
    /// [`execute_upsert`](Self::execute_upsert) for replace semantics.
    ///
    /// # Errors
    ///
    /// Returns the mapped [`StatusError`] when the backend rejects the add.
    pub fn execute<B: Backend>(&self, backend: &B) -> CredStoreResult<()> {
        executor::save(backend, &self.selector)
    }

    /// Deletes any existing match, then adds the item.
    ///
    /// This trades idempotence on conflict for losing `DuplicateItem` as a
    /// distinguishable failure; prefer [`execute`](Self::execute) when the
    /// caller needs to observe conflicts.
    ///
    /// # Errors
    ///
    /// Returns the mapped [`StatusError`] when either backend call fails
    /// (an absent item on the delete leg is not a failure).
    pub fn execute_upsert<B: Backend>(&self, backend: &B) -> CredStoreResult<()> {
        executor::save_upsert(backend, &self.selector)
    }

    /// Asynchronous veneer over [`execute`](Self::execute): identical
    /// semantics, run on a blocking worker.
    ///
    /// # Errors
    ///
    /// Returns the same errors as the synchronous form.
    pub async fn execute_async<B: Backend + 'static>(
        self,
        backend: Arc<B>,
    ) -> CredStoreResult<()> {
        run_blocking(move || executor::save(backend.as_ref(), &self.selector)).await
    }

    /// Asynchronous veneer over [`execute_upsert`](Self::execute_upsert).
    ///
    /// # Errors
    ///
    /// Returns the same errors as the synchronous form.
    pub async fn execute_upsert_async<B: Backend + 'static>(
        self,
        backend: Arc<B>,
    ) -> CredStoreResult<()> {
        run_blocking(move || executor::save_upsert(backend.as_ref(), &self.selector)).await
    }
}

impl<C: Category> Query<C, Search> {
    /// Sets a return flag controlling what the search yields.
    #[must_use]
    pub fn set_return(&self, flag: ReturnFlag, enabled: bool) -> Self {
        self.updated(
            self.selector
                .with(SelectorKey::Return(flag), Value::Boolean(enabled)),
        )
    }

    /// Fetches at most one matching item.
    ///
    /// # Errors
    ///
    /// Returns `ItemNotFound` when nothing matches, or the mapped
    /// [`StatusError`] for any other backend failure.
    pub fn execute<B: Backend>(&self, backend: &B) -> CredStoreResult<FoundItem> {
        executor::search(backend, &self.selector)
    }

    /// Asynchronous veneer over [`execute`](Self::execute).
    ///
    /// # Errors
    ///
    /// Returns the same errors as the synchronous form.
    pub async fn execute_async<B: Backend + 'static>(
        self,
        backend: Arc<B>,
    ) -> CredStoreResult<FoundItem> {
        run_blocking(move || executor::search(backend.as_ref(), &self.selector)).await
    }
}

impl<C: Category> Query<C, Update> {
    /// Sets an attribute in the attributes-to-change mapping (not the
    /// selector). Copy-on-write, last-write-wins.
    #[must_use]
    pub fn set_attribute_to_update(&self, key: AttributeKey, value: Value) -> Self {
        self.with_changes(
            self.phase
                .changes
                .with(SelectorKey::Attribute(key), value),
        )
    }

    /// Sets a payload slot in the attributes-to-change mapping.
    #[must_use]
    pub fn set_value_to_update(&self, key: ValueKey, value: Value) -> Self {
        self.with_changes(self.phase.changes.with(SelectorKey::Value(key), value))
    }

    /// The accumulated attributes-to-change mapping.
    #[must_use]
    pub const fn changes(&self) -> &Selector {
        &self.phase.changes
    }

    fn with_changes(&self, changes: Selector) -> Self {
        Self {
            selector: self.selector.clone(),
            phase: Update { changes },
            _category: PhantomData,
        }
    }

    /// Applies the changes to the item(s) matched by the selector.
    ///
    /// # Errors
    ///
    /// Returns `ItemNotFound` when nothing matches, or the mapped
    /// [`StatusError`] for any other backend failure.
    pub fn execute<B: Backend>(&self, backend: &B) -> CredStoreResult<()> {
        executor::update(backend, &self.selector, &self.phase.changes)
    }

    /// Asynchronous veneer over [`execute`](Self::execute).
    ///
    /// # Errors
    ///
    /// Returns the same errors as the synchronous form.
    pub async fn execute_async<B: Backend + 'static>(
        self,
        backend: Arc<B>,
    ) -> CredStoreResult<()> {
        run_blocking(move || {
            executor::update(backend.as_ref(), &self.selector, &self.phase.changes)
        })
        .await
    }
}

impl<C: Category> Query<C, Delete> {
    /// Removes the item(s) matched by the selector. Removing an absent item
    /// succeeds (idempotent delete).
    ///
    /// # Errors
    ///
    /// Returns the mapped [`StatusError`] for backend failures other than
    /// an absent item.
    pub fn execute<B: Backend>(&self, backend: &B) -> CredStoreResult<()> {
        executor::delete(backend, &self.selector)
    }

    /// Asynchronous veneer over [`execute`](Self::execute).
    ///
    /// # Errors
    ///
    /// Returns the same errors as the synchronous form.
    pub async fn execute_async<B: Backend + 'static>(
        self,
        backend: Arc<B>,
    ) -> CredStoreResult<()> {
        run_blocking(move || executor::delete(backend.as_ref(), &self.selector)).await
    }
}

/// Runs the synchronous executor on a blocking worker. Cancellation of the
/// wrapping task cannot cancel a backend call already in flight.
async fn run_blocking<T, F>(call: F) -> CredStoreResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> CredStoreResult<T> + Send + 'static,
{
    tokio::task::spawn_blocking(call)
        .await
        .map_err(|join_error| {
            StatusError::unspecified(format!("executor worker failed: {join_error}"))
        })?
}
