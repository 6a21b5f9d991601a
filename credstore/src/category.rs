//! Credential item categories and the entry registry.
//!
//! Every query targets exactly one category. Categories exist both as a
//! runtime identifier ([`CategoryId`], stored in the selector and crossing
//! the backend boundary) and as zero-sized marker types implementing
//! [`Category`], which parameterize the query builder so that
//! category-specific attribute setters only exist where they are legal.

use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

use crate::query::{Basic, Delete, Query, Save, Search, Update};

/// Runtime identifier of a credential item category.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum CategoryId {
    /// A generic service/account password.
    GenericPassword,
    /// An internet password tied to a server.
    InternetPassword,
    /// A certificate.
    Certificate,
    /// A cryptographic key.
    CryptoKey,
    /// An identity (certificate plus private key).
    Identity,
}

mod sealed {
    pub trait Sealed {}
}

/// Marker trait for category types. Sealed; implemented only by the five
/// markers in this module.
pub trait Category: sealed::Sealed + Send + Sync + 'static {
    /// The runtime identifier seeded into every query for this category.
    const ID: CategoryId;
}

macro_rules! category_marker {
    ($(#[$doc:meta])* $name:ident => $id:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy)]
        pub struct $name;

        impl sealed::Sealed for $name {}

        impl Category for $name {
            const ID: CategoryId = CategoryId::$id;
        }
    };
}

category_marker!(
    /// Marker for [`CategoryId::GenericPassword`].
    GenericPassword => GenericPassword
);
category_marker!(
    /// Marker for [`CategoryId::InternetPassword`].
    InternetPassword => InternetPassword
);
category_marker!(
    /// Marker for [`CategoryId::Certificate`].
    Certificate => Certificate
);
category_marker!(
    /// Marker for [`CategoryId::CryptoKey`].
    CryptoKey => CryptoKey
);
category_marker!(
    /// Marker for [`CategoryId::Identity`].
    Identity => Identity
);

/// An immutable handle to one credential item category.
///
/// Handles carry only the category identifier and act as the seed for new
/// queries. Construction is total; there is no failure mode.
#[derive(Debug, Clone, Copy)]
pub struct Entry<C: Category> {
    _category: PhantomData<C>,
}

impl<C: Category> Entry<C> {
    /// Creates the handle.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _category: PhantomData,
        }
    }

    /// Starts a basic (not yet executable) query whose selector contains
    /// exactly the category entry.
    #[must_use]
    pub fn query(&self) -> Query<C, Basic> {
        Query::seeded()
    }

    /// Starts a save query directly.
    #[must_use]
    pub fn save_query(&self) -> Query<C, Save> {
        self.query().for_save()
    }

    /// Starts a search query directly.
    #[must_use]
    pub fn search_query(&self) -> Query<C, Search> {
        self.query().for_search()
    }

    /// Starts an update query directly.
    #[must_use]
    pub fn update_query(&self) -> Query<C, Update> {
        self.query().for_update()
    }

    /// Starts a delete query directly.
    #[must_use]
    pub fn delete_query(&self) -> Query<C, Delete> {
        self.query().for_delete()
    }
}

impl<C: Category> Default for Entry<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Entry for generic service/account passwords.
pub const GENERIC_PASSWORD: Entry<GenericPassword> = Entry::new();

/// Entry for internet passwords.
pub const INTERNET_PASSWORD: Entry<InternetPassword> = Entry::new();

/// Entry for certificates.
pub const CERTIFICATE: Entry<Certificate> = Entry::new();

/// Entry for cryptographic keys.
pub const CRYPTO_KEY: Entry<CryptoKey> = Entry::new();

/// Entry for identities.
pub const IDENTITY: Entry<Identity> = Entry::new();

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::SelectorKey;
    use crate::value::Value;

    #[test]
    fn test_query_is_seeded_with_exactly_the_category() {
        let query = GENERIC_PASSWORD.query();
        assert_eq!(query.selector().len(), 1);
        assert_eq!(
            query.selector().get(&SelectorKey::Category),
            Some(&Value::Category(CategoryId::GenericPassword))
        );

        let query = CRYPTO_KEY.query();
        assert_eq!(
            query.selector().get(&SelectorKey::Category),
            Some(&Value::Category(CategoryId::CryptoKey))
        );
    }

    #[test]
    fn test_every_phase_keeps_the_category_entry() {
        let basic = INTERNET_PASSWORD.query();
        let expected = Some(&Value::Category(CategoryId::InternetPassword));
        assert_eq!(
            basic.for_save().selector().get(&SelectorKey::Category),
            expected
        );
        assert_eq!(
            basic.for_search().selector().get(&SelectorKey::Category),
            expected
        );
        assert_eq!(
            basic.for_update().selector().get(&SelectorKey::Category),
            expected
        );
        assert_eq!(
            basic.for_delete().selector().get(&SelectorKey::Category),
            expected
        );
    }

    #[test]
    fn test_shortcut_constructors_seed_the_category() {
        let save = CERTIFICATE.save_query();
        assert_eq!(
            save.selector().get(&SelectorKey::Category),
            Some(&Value::Category(CategoryId::Certificate))
        );
        assert_eq!(save.selector().len(), 1);
    }
}
