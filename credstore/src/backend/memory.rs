//! In-memory backend for testing and embedding.
//!
//! This implementation keeps items in process memory with no encryption at
//! rest. It is NOT a secure store; it exists to exercise the query builder
//! and executor, and as a reference for the backend contract.

// Lock poisoning can only happen if a writer panicked; unwrapping here
// matches the test-oriented role of this backend.
#![allow(clippy::missing_panics_doc)]

use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::category::CategoryId;
use crate::error::RawStatus;
use crate::key::{AttributeKey, ReturnFlag, SelectorKey, ValueKey};
use crate::selector::Selector;
use crate::value::{Payload, Value};

use super::{Backend, FoundItem, ItemRef};

#[derive(Debug, Clone)]
struct StoredItem {
    category: CategoryId,
    attributes: BTreeMap<AttributeKey, Value>,
    data: Option<Payload>,
    item_ref: u64,
}

impl StoredItem {
    /// An item matches when every attribute constraint in the selector is
    /// present with an equal value (subset matching), and the category
    /// agrees.
    fn matches(&self, selector: &Selector) -> bool {
        if selector.category() != Some(self.category) {
            return false;
        }
        selector
            .attributes()
            .all(|(key, value)| self.attributes.get(&key) == Some(value))
    }
}

/// Thread-safe in-memory credential store.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    items: RwLock<Vec<StoredItem>>,
    next_ref: RwLock<u64>,
}

impl MemoryBackend {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.read().unwrap().len()
    }

    /// Returns `true` if no items are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.read().unwrap().is_empty()
    }

    /// Removes all stored items (test isolation).
    pub fn clear(&self) {
        self.items.write().unwrap().clear();
    }

    fn allocate_ref(&self) -> u64 {
        let mut next = self.next_ref.write().unwrap();
        *next += 1;
        *next
    }

    fn build_found(item: &StoredItem, selector: &Selector) -> FoundItem {
        let mut found = FoundItem::default();
        if selector.return_flag(ReturnFlag::Data) {
            found.data.clone_from(&item.data);
        }
        if selector.return_flag(ReturnFlag::Attributes) {
            found.attributes = Some(item.attributes.clone());
        }
        if selector.return_flag(ReturnFlag::Reference) {
            found.reference = Some(ItemRef(item.item_ref));
        }
        if selector.return_flag(ReturnFlag::PersistentReference) {
            found.persistent_reference = Some(item.item_ref.to_be_bytes().to_vec());
        }
        found
    }

    fn payload_from(selector: &Selector) -> Result<Option<Payload>, RawStatus> {
        match selector.get(&SelectorKey::Value(ValueKey::Data)) {
            None => Ok(None),
            Some(Value::Bytes(payload)) => Ok(Some(payload.clone())),
            Some(_) => Err(RawStatus::TYPE_MISMATCH),
        }
    }
}

impl Backend for MemoryBackend {
    fn add(&self, selector: &Selector) -> RawStatus {
        let Some(category) = selector.category() else {
            return RawStatus::MISSING_ATTRIBUTE;
        };
        let attributes: BTreeMap<AttributeKey, Value> = selector
            .attributes()
            .map(|(key, value)| (key, value.clone()))
            .collect();
        if attributes.is_empty() {
            return RawStatus::MISSING_ATTRIBUTE;
        }
        let data = match Self::payload_from(selector) {
            Ok(data) => data,
            Err(status) => return status,
        };

        let mut items = self.items.write().unwrap();
        let duplicate = items
            .iter()
            .any(|item| item.category == category && item.attributes == attributes);
        if duplicate {
            return RawStatus::DUPLICATE_ITEM;
        }

        let item_ref = self.allocate_ref();
        items.push(StoredItem {
            category,
            attributes,
            data,
            item_ref,
        });
        RawStatus::OK
    }

    fn fetch(&self, selector: &Selector) -> (RawStatus, Option<FoundItem>) {
        let items = self.items.read().unwrap();
        items.iter().find(|item| item.matches(selector)).map_or(
            (RawStatus::ITEM_NOT_FOUND, None),
            |item| (RawStatus::OK, Some(Self::build_found(item, selector))),
        )
    }

    fn modify(&self, selector: &Selector, changes: &Selector) -> RawStatus {
        let new_data = match Self::payload_from(changes) {
            Ok(data) => data,
            Err(status) => return status,
        };

        let mut items = self.items.write().unwrap();
        let matched: Vec<usize> = items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.matches(selector))
            .map(|(index, _)| index)
            .collect();
        if matched.is_empty() {
            return RawStatus::ITEM_NOT_FOUND;
        }

        let changed: Vec<BTreeMap<AttributeKey, Value>> = matched
            .iter()
            .map(|&index| {
                let mut attributes = items[index].attributes.clone();
                for (key, value) in changes.attributes() {
                    attributes.insert(key, value.clone());
                }
                attributes
            })
            .collect();

        // Changed identifying attributes must not collide with another
        // stored item, or with each other; otherwise two items with
        // identical (category, attribute-set) would coexist, which `add`
        // never allows.
        let category = items[matched[0]].category;
        for (position, attributes) in changed.iter().enumerate() {
            let collides = items.iter().enumerate().any(|(index, item)| {
                !matched.contains(&index)
                    && item.category == category
                    && item.attributes == *attributes
            }) || changed[..position].contains(attributes);
            if collides {
                return RawStatus::DUPLICATE_ITEM;
            }
        }

        for (&index, attributes) in matched.iter().zip(changed) {
            items[index].attributes = attributes;
            if let Some(data) = &new_data {
                items[index].data = Some(data.clone());
            }
        }
        RawStatus::OK
    }

    fn remove(&self, selector: &Selector) -> RawStatus {
        let mut items = self.items.write().unwrap();
        let before = items.len();
        items.retain(|item| !item.matches(selector));
        if items.len() == before {
            RawStatus::ITEM_NOT_FOUND
        } else {
            RawStatus::OK
        }
    }

    fn describe(&self, status: RawStatus) -> Option<String> {
        let description = match status {
            RawStatus::OK => "success",
            RawStatus::ITEM_NOT_FOUND => "no item matched the selector",
            RawStatus::DUPLICATE_ITEM => "an item with these attributes already exists",
            RawStatus::MISSING_ATTRIBUTE => "a required attribute is absent or malformed",
            RawStatus::TYPE_MISMATCH => "an attribute value has the wrong type",
            _ => return None,
        };
        Some(description.to_string())
    }
}
