//! Namespaced convenience layer over the query builder.
//!
//! [`Store`] wraps a backend and a service namespace and exposes the common
//! set/get/delete flow without spelling out queries. All items live under
//! the generic password category, keyed by account name within the service.

use std::sync::Arc;

use crate::backend::Backend;
use crate::category::GENERIC_PASSWORD;
use crate::error::{CredStoreResult, StatusError};
use crate::key::ReturnFlag;
use crate::value::Payload;

/// A simple key/value view of a credential store backend.
#[derive(Debug)]
pub struct Store<B: Backend> {
    backend: Arc<B>,
    service: String,
}

// Not derived: cloning must not require `B: Clone`, the backend is shared.
impl<B: Backend> Clone for Store<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            service: self.service.clone(),
        }
    }
}

impl<B: Backend> Store<B> {
    /// Creates a store scoped to `service`.
    pub fn new<S: Into<String>>(backend: Arc<B>, service: S) -> Self {
        Self {
            backend,
            service: service.into(),
        }
    }

    /// The service namespace this store operates in.
    #[must_use]
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Stores `value` under `key`, replacing any existing value
    /// (delete-then-add upsert; a conflicting item is never reported).
    ///
    /// # Errors
    ///
    /// Returns a [`StatusError`] when the backend rejects the write.
    pub fn set(&self, key: &str, value: &str) -> CredStoreResult<()> {
        GENERIC_PASSWORD
            .save_query()
            .with_service(&self.service)
            .with_account(key)
            .value_data(value)
            .execute_upsert(self.backend.as_ref())
    }

    /// Returns the bytes stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `ItemNotFound` when the key is absent, or another
    /// [`StatusError`] for backend failures.
    pub fn get(&self, key: &str) -> CredStoreResult<Payload> {
        let found = GENERIC_PASSWORD
            .search_query()
            .with_service(&self.service)
            .with_account(key)
            .set_return(ReturnFlag::Data, true)
            .execute(self.backend.as_ref())?;
        found
            .data
            .ok_or_else(|| StatusError::unspecified("matched item carries no data"))
    }

    /// Returns the UTF-8 string stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `TypeMismatch` when the stored bytes are not valid UTF-8,
    /// plus everything [`get`](Self::get) can return.
    pub fn get_string(&self, key: &str) -> CredStoreResult<String> {
        let payload = self.get(key)?;
        String::from_utf8(payload.to_vec())
            .map_err(|_| StatusError::type_mismatch("stored bytes are not valid UTF-8"))
    }

    /// Removes the value stored under `key`. Removing an absent key
    /// succeeds.
    ///
    /// # Errors
    ///
    /// Returns a [`StatusError`] for backend failures other than an absent
    /// item.
    pub fn delete(&self, key: &str) -> CredStoreResult<()> {
        GENERIC_PASSWORD
            .delete_query()
            .with_service(&self.service)
            .with_account(key)
            .execute(self.backend.as_ref())
    }
}

impl<B: Backend + 'static> Store<B> {
    /// Asynchronous veneer over [`set`](Self::set).
    ///
    /// # Errors
    ///
    /// Returns the same errors as the synchronous form.
    pub async fn set_async(&self, key: &str, value: &str) -> CredStoreResult<()> {
        GENERIC_PASSWORD
            .save_query()
            .with_service(&self.service)
            .with_account(key)
            .value_data(value)
            .execute_upsert_async(Arc::clone(&self.backend))
            .await
    }

    /// Asynchronous veneer over [`get`](Self::get).
    ///
    /// # Errors
    ///
    /// Returns the same errors as the synchronous form.
    pub async fn get_async(&self, key: &str) -> CredStoreResult<Payload> {
        let found = GENERIC_PASSWORD
            .search_query()
            .with_service(&self.service)
            .with_account(key)
            .set_return(ReturnFlag::Data, true)
            .execute_async(Arc::clone(&self.backend))
            .await?;
        found
            .data
            .ok_or_else(|| StatusError::unspecified("matched item carries no data"))
    }

    /// Asynchronous veneer over [`get_string`](Self::get_string).
    ///
    /// # Errors
    ///
    /// Returns the same errors as the synchronous form.
    pub async fn get_string_async(&self, key: &str) -> CredStoreResult<String> {
        let payload = self.get_async(key).await?;
        String::from_utf8(payload.to_vec())
            .map_err(|_| StatusError::type_mismatch("stored bytes are not valid UTF-8"))
    }

    /// Asynchronous veneer over [`delete`](Self::delete).
    ///
    /// # Errors
    ///
    /// Returns the same errors as the synchronous form.
    pub async fn delete_async(&self, key: &str) -> CredStoreResult<()> {
        GENERIC_PASSWORD
            .delete_query()
            .with_service(&self.service)
            .with_account(key)
            .execute_async(Arc::clone(&self.backend))
            .await
    }
}
