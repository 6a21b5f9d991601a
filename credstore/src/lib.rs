//! Type-state query builder for secure key/value credential stores.
//!
//! This crate turns a stringly-typed, dictionary-based credential store
//! interface into a type-safe, chainable query-builder surface, and maps the
//! store's raw status codes into a small typed error taxonomy.
//!
//! # Architecture
//!
//! - **Entry registry** — one immutable [`Entry`] handle per item category
//!   (`GENERIC_PASSWORD`, `INTERNET_PASSWORD`, …) seeds new queries.
//! - **Query builder** — [`Query`] is an immutable value parameterized by
//!   category and phase. The `Basic` phase accumulates attributes and
//!   transitions one way into `Save`, `Search`, `Update`, or `Delete`; only
//!   those phases can execute, and phase-violating calls do not compile.
//!   Every setter is copy-on-write: it returns a new builder and leaves the
//!   receiver untouched.
//! - **Backend** — the [`Backend`] trait is the only boundary to the actual
//!   store. [`MemoryBackend`] is a thread-safe in-memory implementation for
//!   testing and embedding.
//! - **Status mapper** — raw backend codes become [`StatusError`]s with an
//!   equality-comparable [`StatusKind`].
//!
//! # Example
//!
//! ```
//! use credstore::{MemoryBackend, ReturnFlag, GENERIC_PASSWORD};
//!
//! let backend = MemoryBackend::new();
//!
//! let base = GENERIC_PASSWORD
//!     .query()
//!     .with_service("com.example.app")
//!     .with_account("alice");
//!
//! base.for_save()
//!     .with_label("login")
//!     .value_data("s3cret")
//!     .execute(&backend)?;
//!
//! let found = base
//!     .for_search()
//!     .set_return(ReturnFlag::Data, true)
//!     .execute(&backend)?;
//! assert_eq!(found.data.unwrap().as_bytes(), b"s3cret");
//!
//! base.for_delete().execute(&backend)?;
//! # Ok::<(), credstore::StatusError>(())
//! ```

mod attributes;
mod backend;
mod category;
mod error;
mod executor;
mod key;
mod query;
mod selector;
mod store;
mod value;

pub use backend::{Backend, FoundItem, ItemRef, MemoryBackend};
pub use category::{
    Category, CategoryId, Certificate, CryptoKey, Entry, GenericPassword, Identity,
    InternetPassword, CERTIFICATE, CRYPTO_KEY, GENERIC_PASSWORD, IDENTITY, INTERNET_PASSWORD,
};
pub use error::{CredStoreResult, RawStatus, StatusError, StatusKind};
pub use key::{AttributeKey, ReturnFlag, SelectorKey, ValueKey};
pub use query::{Basic, Delete, Phase, Query, Save, Search, Update};
pub use selector::Selector;
pub use store::Store;
pub use value::{
    Accessibility, AuthenticationScheme, KeyAlgorithm, KeyClass, NetworkProtocol, Payload,
    Synchronizability, Value,
};
