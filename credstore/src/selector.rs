//! The flat key/value mapping crossing the backend boundary.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::category::CategoryId;
use crate::key::{AttributeKey, ReturnFlag, SelectorKey};
use crate::value::Value;

/// An immutable flat mapping from [`SelectorKey`] to [`Value`].
///
/// Updates are copy-on-write: [`Selector::with`] returns a new selector and
/// leaves the original untouched, so selectors can be shared freely between
/// threads and branched without coordination. Setting the same key twice is
/// last-write-wins, silently.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selector {
    entries: BTreeMap<SelectorKey, Value>,
}

impl Selector {
    /// Creates a selector containing exactly the category entry.
    pub(crate) fn seeded(category: CategoryId) -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(SelectorKey::Category, Value::Category(category));
        Self { entries }
    }

    /// Returns a new selector with `key` set to `value`.
    #[must_use]
    pub fn with(&self, key: SelectorKey, value: Value) -> Self {
        let mut entries = self.entries.clone();
        entries.insert(key, value);
        Self { entries }
    }

    /// Looks up the value stored at `key`.
    #[must_use]
    pub fn get(&self, key: &SelectorKey) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Returns the category this selector targets, if present.
    #[must_use]
    pub fn category(&self) -> Option<CategoryId> {
        match self.entries.get(&SelectorKey::Category) {
            Some(Value::Category(id)) => Some(*id),
            _ => None,
        }
    }

    /// Looks up an attribute value.
    #[must_use]
    pub fn attribute(&self, key: AttributeKey) -> Option<&Value> {
        self.entries.get(&SelectorKey::Attribute(key))
    }

    /// Returns `true` if the given return flag is set.
    #[must_use]
    pub fn return_flag(&self, flag: ReturnFlag) -> bool {
        matches!(
            self.entries.get(&SelectorKey::Return(flag)),
            Some(Value::Boolean(true))
        )
    }

    /// Iterates over the attribute entries only.
    pub fn attributes(&self) -> impl Iterator<Item = (AttributeKey, &Value)> {
        self.entries.iter().filter_map(|(key, value)| match key {
            SelectorKey::Attribute(attribute) => Some((*attribute, value)),
            _ => None,
        })
    }

    /// Iterates over all entries.
    pub fn iter(&self) -> impl Iterator<Item = (&SelectorKey, &Value)> {
        self.entries.iter()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the selector has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
