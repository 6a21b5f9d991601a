//! Status codes and the typed error taxonomy.
//!
//! Backends report outcomes as raw [`RawStatus`] codes. This module maps
//! those codes into a small closed set of [`StatusKind`]s so that callers
//! can branch on the kind of failure without depending on the raw code.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for credential store operations.
pub type CredStoreResult<T> = Result<T, StatusError>;

/// A raw status code reported by a backend.
///
/// `0` is success. All other codes are failures; the well-known failure
/// codes below are part of the backend contract, everything else maps to
/// [`StatusKind::Unspecified`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RawStatus(pub i32);

impl RawStatus {
    /// The operation succeeded.
    pub const OK: Self = Self(0);
    /// No item matched the selector.
    pub const ITEM_NOT_FOUND: Self = Self(1);
    /// An item with the same identifying attributes already exists.
    pub const DUPLICATE_ITEM: Self = Self(2);
    /// A required selector attribute was absent or malformed.
    pub const MISSING_ATTRIBUTE: Self = Self(3);
    /// An attribute value's type did not match what its key expects.
    pub const TYPE_MISMATCH: Self = Self(4);

    /// Returns the numeric code.
    #[must_use]
    pub const fn code(self) -> i32 {
        self.0
    }

    /// Returns `true` if this status signals success.
    #[must_use]
    pub const fn is_ok(self) -> bool {
        self.0 == Self::OK.0
    }
}

impl fmt::Display for RawStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The closed set of failure kinds a credential store operation can surface.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    /// The fetch/modify target did not exist. Callers routinely treat this
    /// as a non-fatal, expected outcome.
    ItemNotFound,
    /// The add target already exists.
    DuplicateItem,
    /// A required selector attribute was absent or malformed.
    MissingRequiredAttribute,
    /// An attribute value's runtime type did not match what its key expects.
    TypeMismatch,
    /// Fallback for statuses this mapper does not recognize; the raw code
    /// is preserved for diagnosis.
    Unspecified,
}

/// A typed credential store failure.
///
/// Constructed by the status mapper from a backend code, or locally when a
/// detectable error (such as an untypeable attribute value) is rejected
/// before any backend round trip. Two errors of the same [`StatusKind`] can
/// be compared via [`StatusError::kind`] regardless of their raw codes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", render(.kind, .status, .message))]
pub struct StatusError {
    kind: StatusKind,
    status: Option<RawStatus>,
    message: Option<String>,
}

fn render(kind: &StatusKind, status: &Option<RawStatus>, message: &Option<String>) -> String {
    let mut out = kind.to_string();
    if let Some(status) = status {
        out.push_str(&format!(" (status {status})"));
    }
    if let Some(message) = message {
        out.push_str(": ");
        out.push_str(message);
    }
    out
}

impl StatusError {
    /// Maps a raw backend status to a typed error.
    ///
    /// Pure: the same inputs always produce the same error. Unrecognized
    /// codes map to [`StatusKind::Unspecified`] and keep the raw code.
    /// An absent description is simply carried as `None`.
    #[must_use]
    pub fn from_status(status: RawStatus, message: Option<String>) -> Self {
        let kind = match status {
            RawStatus::ITEM_NOT_FOUND => StatusKind::ItemNotFound,
            RawStatus::DUPLICATE_ITEM => StatusKind::DuplicateItem,
            RawStatus::MISSING_ATTRIBUTE => StatusKind::MissingRequiredAttribute,
            RawStatus::TYPE_MISMATCH => StatusKind::TypeMismatch,
            _ => StatusKind::Unspecified,
        };
        Self {
            kind,
            status: Some(status),
            message,
        }
    }

    /// Creates a local [`StatusKind::TypeMismatch`] error with no raw code.
    pub fn type_mismatch<S: Into<String>>(message: S) -> Self {
        Self {
            kind: StatusKind::TypeMismatch,
            status: None,
            message: Some(message.into()),
        }
    }

    /// Creates a local [`StatusKind::MissingRequiredAttribute`] error with
    /// no raw code.
    pub fn missing_attribute<S: Into<String>>(message: S) -> Self {
        Self {
            kind: StatusKind::MissingRequiredAttribute,
            status: None,
            message: Some(message.into()),
        }
    }

    /// Creates a local [`StatusKind::Unspecified`] error with no raw code.
    pub fn unspecified<S: Into<String>>(message: S) -> Self {
        Self {
            kind: StatusKind::Unspecified,
            status: None,
            message: Some(message.into()),
        }
    }

    /// The failure kind, for equality-based branching.
    #[must_use]
    pub const fn kind(&self) -> StatusKind {
        self.kind
    }

    /// The originating raw status code, if the backend reported one.
    #[must_use]
    pub const fn status(&self) -> Option<RawStatus> {
        self.status
    }

    /// The human-readable description, if one was available.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes_map_to_kinds() {
        let cases = [
            (RawStatus::ITEM_NOT_FOUND, StatusKind::ItemNotFound),
            (RawStatus::DUPLICATE_ITEM, StatusKind::DuplicateItem),
            (
                RawStatus::MISSING_ATTRIBUTE,
                StatusKind::MissingRequiredAttribute,
            ),
            (RawStatus::TYPE_MISMATCH, StatusKind::TypeMismatch),
        ];
        for (status, kind) in cases {
            let err = StatusError::from_status(status, None);
            assert_eq!(err.kind(), kind);
            assert_eq!(err.status(), Some(status));
        }
    }

    #[test]
    fn test_unknown_code_is_unspecified_and_keeps_raw_code() {
        let err = StatusError::from_status(RawStatus(-9999), None);
        assert_eq!(err.kind(), StatusKind::Unspecified);
        assert_eq!(err.status(), Some(RawStatus(-9999)));
        assert!(err.message().is_none());
    }

    #[test]
    fn test_kind_equality_ignores_raw_code() {
        let a = StatusError::from_status(RawStatus::ITEM_NOT_FOUND, None);
        let b = StatusError::type_mismatch("local");
        assert_ne!(a.kind(), b.kind());
        assert_eq!(a.kind(), StatusKind::ItemNotFound);
    }

    #[test]
    fn test_display_includes_code_and_message() {
        let err = StatusError::from_status(
            RawStatus::DUPLICATE_ITEM,
            Some("item already exists".to_string()),
        );
        let rendered = format!("{err}");
        assert!(rendered.contains("duplicate_item"));
        assert!(rendered.contains("status 2"));
        assert!(rendered.contains("item already exists"));
    }

    #[test]
    fn test_local_errors_have_no_status() {
        let err = StatusError::missing_attribute("attribute value is null");
        assert_eq!(err.kind(), StatusKind::MissingRequiredAttribute);
        assert!(err.status().is_none());
        assert_eq!(err.message(), Some("attribute value is null"));
    }
}
