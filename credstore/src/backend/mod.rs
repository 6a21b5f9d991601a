//! The boundary to the actual credential store.
//!
//! This crate's job stops at producing a correct flat selector mapping from
//! the typed builder state; everything past [`Backend`] — persistence,
//! encryption, locking, wire encoding — is the store's own concern. The
//! library imposes at most one in-flight call per `execute()` and makes no
//! cross-call atomicity guarantee.

mod memory;

pub use memory::MemoryBackend;

use std::collections::BTreeMap;

use crate::error::RawStatus;
use crate::key::AttributeKey;
use crate::selector::Selector;
use crate::value::{Payload, Value};

/// An in-process reference to a stored item, opaque to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemRef(pub u64);

/// Payload of a successful search, populated per the requested return flags.
///
/// At most one item is returned per fetch; fields the caller did not ask for
/// stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FoundItem {
    /// The item's raw secret bytes.
    pub data: Option<Payload>,
    /// The item's attribute mapping.
    pub attributes: Option<BTreeMap<AttributeKey, Value>>,
    /// An in-process reference to the item.
    pub reference: Option<ItemRef>,
    /// A persistent reference usable across processes.
    pub persistent_reference: Option<Vec<u8>>,
}

/// A credential store backend.
///
/// Implementations are responsible for their own internal concurrency and
/// locking discipline. All operations report a [`RawStatus`]; the executor
/// maps non-success statuses to typed errors.
pub trait Backend: Send + Sync {
    /// Adds the item described by `selector`.
    ///
    /// Must fail with [`RawStatus::DUPLICATE_ITEM`] if an item with the same
    /// category and identifying attributes already exists.
    fn add(&self, selector: &Selector) -> RawStatus;

    /// Fetches at most one item matching `selector`.
    ///
    /// Absence of a match is the distinguishable
    /// [`RawStatus::ITEM_NOT_FOUND`], not a generic failure.
    fn fetch(&self, selector: &Selector) -> (RawStatus, Option<FoundItem>);

    /// Applies `changes` to the item(s) matching `selector`.
    ///
    /// Fails with [`RawStatus::ITEM_NOT_FOUND`] if nothing matches, and with
    /// [`RawStatus::DUPLICATE_ITEM`] if the changed identifying attributes
    /// would collide with another stored item; nothing is applied in either
    /// case.
    fn modify(&self, selector: &Selector, changes: &Selector) -> RawStatus;

    /// Removes the item(s) matching `selector`.
    ///
    /// May report [`RawStatus::ITEM_NOT_FOUND`] when nothing matched; the
    /// executor normalizes that to success (idempotent delete).
    fn remove(&self, selector: &Selector) -> RawStatus;

    /// Returns a human-readable diagnostic for a status code, if the store
    /// can supply one.
    fn describe(&self, status: RawStatus) -> Option<String> {
        let _ = status;
        None
    }
}
