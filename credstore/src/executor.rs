//! Thin executor translating backend statuses into typed errors.
//!
//! Each function performs exactly one backend call (upsert performs two) and
//! raises at most one [`StatusError`] per call. No retries happen here;
//! retry policy belongs to the caller or the backend.

use tracing::{debug, warn};

use crate::backend::{Backend, FoundItem};
use crate::error::{CredStoreResult, RawStatus, StatusError, StatusKind};
use crate::selector::Selector;

pub(crate) fn save<B: Backend + ?Sized>(backend: &B, selector: &Selector) -> CredStoreResult<()> {
    let status = backend.add(selector);
    debug!(op = "add", status = status.code());
    ensure_ok(backend, status)
}

/// Delete-then-add. Trades idempotence on conflict for losing
/// `DuplicateItem` as a distinguishable failure.
pub(crate) fn save_upsert<B: Backend + ?Sized>(
    backend: &B,
    selector: &Selector,
) -> CredStoreResult<()> {
    delete(backend, selector)?;
    save(backend, selector)
}

pub(crate) fn search<B: Backend + ?Sized>(
    backend: &B,
    selector: &Selector,
) -> CredStoreResult<FoundItem> {
    let (status, found) = backend.fetch(selector);
    debug!(op = "fetch", status = status.code(), matched = found.is_some());
    if !status.is_ok() {
        return Err(map_status(backend, status));
    }
    found.ok_or_else(|| StatusError::unspecified("backend reported success without a payload"))
}

pub(crate) fn update<B: Backend + ?Sized>(
    backend: &B,
    selector: &Selector,
    changes: &Selector,
) -> CredStoreResult<()> {
    let status = backend.modify(selector, changes);
    debug!(op = "modify", status = status.code());
    ensure_ok(backend, status)
}

/// Deleting an absent item is not an error: `ITEM_NOT_FOUND` from the
/// backend is normalized to success.
pub(crate) fn delete<B: Backend + ?Sized>(backend: &B, selector: &Selector) -> CredStoreResult<()> {
    let status = backend.remove(selector);
    debug!(op = "remove", status = status.code());
    if status == RawStatus::ITEM_NOT_FOUND {
        return Ok(());
    }
    ensure_ok(backend, status)
}

fn ensure_ok<B: Backend + ?Sized>(backend: &B, status: RawStatus) -> CredStoreResult<()> {
    if status.is_ok() {
        Ok(())
    } else {
        Err(map_status(backend, status))
    }
}

fn map_status<B: Backend + ?Sized>(backend: &B, status: RawStatus) -> StatusError {
    let error = StatusError::from_status(status, backend.describe(status));
    if error.kind() == StatusKind::Unspecified {
        warn!(status = status.code(), "unrecognized backend status");
    }
    error
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use crate::category::CategoryId;
    use crate::key::{AttributeKey, SelectorKey};
    use crate::value::Value;

    struct FailingBackend(RawStatus);

    impl Backend for FailingBackend {
        fn add(&self, _: &Selector) -> RawStatus {
            self.0
        }
        fn fetch(&self, _: &Selector) -> (RawStatus, Option<FoundItem>) {
            (self.0, None)
        }
        fn modify(&self, _: &Selector, _: &Selector) -> RawStatus {
            self.0
        }
        fn remove(&self, _: &Selector) -> RawStatus {
            self.0
        }
        fn describe(&self, _: RawStatus) -> Option<String> {
            Some("synthetic".to_string())
        }
    }

    fn selector() -> Selector {
        Selector::seeded(CategoryId::GenericPassword).with(
            SelectorKey::Attribute(AttributeKey::Account),
            Value::Text("alice".to_string()),
        )
    }

    #[test]
    fn test_delete_normalizes_item_not_found() {
        let backend = FailingBackend(RawStatus::ITEM_NOT_FOUND);
        assert!(delete(&backend, &selector()).is_ok());
    }

    #[test]
    fn test_delete_propagates_other_failures() {
        let backend = FailingBackend(RawStatus(77));
        let err = delete(&backend, &selector()).unwrap_err();
        assert_eq!(err.kind(), StatusKind::Unspecified);
        assert_eq!(err.status(), Some(RawStatus(77)));
        assert_eq!(err.message(), Some("synthetic"));
    }

    #[test]
    fn test_search_success_without_payload_is_unspecified() {
        struct NoPayload;
        impl Backend for NoPayload {
            fn add(&self, _: &Selector) -> RawStatus {
                RawStatus::OK
            }
            fn fetch(&self, _: &Selector) -> (RawStatus, Option<FoundItem>) {
                (RawStatus::OK, None)
            }
            fn modify(&self, _: &Selector, _: &Selector) -> RawStatus {
                RawStatus::OK
            }
            fn remove(&self, _: &Selector) -> RawStatus {
                RawStatus::OK
            }
        }
        let err = search(&NoPayload, &selector()).unwrap_err();
        assert_eq!(err.kind(), StatusKind::Unspecified);
        assert!(err.status().is_none());
    }

    #[test]
    fn test_search_no_match_is_item_not_found() {
        let backend = MemoryBackend::new();
        let err = search(&backend, &selector()).unwrap_err();
        assert_eq!(err.kind(), StatusKind::ItemNotFound);
    }

    #[test]
    fn test_save_upsert_replaces_existing() {
        let backend = MemoryBackend::new();
        save(&backend, &selector()).unwrap();
        // Plain save now conflicts, upsert does not.
        let err = save(&backend, &selector()).unwrap_err();
        assert_eq!(err.kind(), StatusKind::DuplicateItem);
        save_upsert(&backend, &selector()).unwrap();
        assert_eq!(backend.len(), 1);
    }
}
